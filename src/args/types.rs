use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use crate::model::Itinerary;
use crate::model::itinerary::{ItineraryDoc, Variant};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Built-in itinerary to show.
    #[arg(short = 'v', long, value_enum, default_value = "europe")]
    pub variant: Variant,
    /// Itinerary JSON file; overrides --variant.
    #[arg(
        short = 'i',
        long,
        value_name = "ITINERARY_JSON",
        value_parser = crate::args::validation::check_itinerary_file
    )]
    pub itinerary: Option<ItineraryDoc>,
    #[arg(long, value_name = "BIND_ADDR", default_value = "0.0.0.0")]
    pub bind: String,
    #[arg(short = 'p', long, value_name = "PORT", default_value = "5201")]
    pub port: u16,
    /// Google Directions API key. Without it every route query fails quietly.
    #[arg(long, value_name = "KEY", env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
    pub directions_key: Option<String>,
    /// Play a JSON script of user events against a headless map and exit.
    #[arg(
        long,
        value_name = "REPLAY_JSON",
        value_parser = crate::args::validation::check_readable_file
    )]
    pub replay: Option<PathBuf>,
    /// Viewport width the replay and the served view start with.
    #[arg(long, value_name = "PX", default_value = "1280")]
    pub viewport_width: u32,
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub itinerary: Arc<Itinerary>,
    pub bind: String,
    pub port: u16,
    pub directions_key: Option<String>,
    pub replay: Option<PathBuf>,
    pub viewport_width: u32,
}
