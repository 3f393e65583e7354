use std::{fs, path::PathBuf};

use super::types::Args;
use crate::model::itinerary::{Itinerary, ItineraryDoc};

impl Args {
    /// # Errors
    ///
    /// Will return `Err` if the listen port or viewport width is zero.
    pub fn validate(&mut self) -> Result<(), String> {
        if self.port == 0 {
            return Err("port must be non-zero".to_string());
        }
        if self.viewport_width == 0 {
            return Err("viewport width must be non-zero".to_string());
        }
        // an empty env var means "no key"
        if self
            .directions_key
            .as_deref()
            .is_some_and(|k| k.trim().is_empty())
        {
            self.directions_key = None;
        }
        Ok(())
    }
}

/// # Errors
///
/// Will return `Err` if the file is not readable
pub fn check_readable_file(file: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(file);
    if !path.is_file() || fs::metadata(&path).is_err() {
        return Err(format!("The file '{file}' is not readable."));
    }
    Ok(path)
}

/// Reads an itinerary document and makes sure its schedule joins cleanly.
///
/// # Errors
///
/// Will return `Err` if the file is not readable, is not valid json, or
/// describes an invalid itinerary.
pub fn check_itinerary_file(file: &str) -> Result<ItineraryDoc, String> {
    let path = check_readable_file(file)?;
    let contents = fs::read_to_string(&path)
        .map_err(|e| format!("The json file '{file}' could not be read: {e}"))?;
    let doc: ItineraryDoc = serde_json::from_str(&contents)
        .map_err(|e| format!("The json file '{file}' is not an itinerary: {e}"))?;
    Itinerary::from_doc(doc.clone()).map_err(|e| format!("{file}: {e}"))?;
    Ok(doc)
}
