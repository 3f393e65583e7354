use clap::Parser;
use std::sync::Arc;

pub mod types;
pub mod validation;

pub use types::{Args, CleanArgs};

use crate::error::TripError;
use crate::model::Itinerary;

/// Parses and validates the command line.
///
/// # Errors
///
/// Will return `Err` if the arguments are invalid or the itinerary fails to load
pub fn args_checks() -> Result<CleanArgs, TripError> {
    let mut xx = Args::parse();
    xx.validate()?;
    CleanArgs::new(xx)
}

impl CleanArgs {
    /// # Errors
    ///
    /// Will return `Err` if the selected itinerary cannot be built
    pub fn new(args: Args) -> Result<Self, TripError> {
        let itinerary = match args.itinerary {
            Some(doc) => Itinerary::from_doc(doc)?,
            None => Itinerary::load_variant(args.variant)?,
        };
        Ok(CleanArgs {
            itinerary: Arc::new(itinerary),
            bind: args.bind,
            port: args.port,
            directions_key: args.directions_key,
            replay: args.replay,
            viewport_width: args.viewport_width,
        })
    }
}
