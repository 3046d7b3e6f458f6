pub(crate) mod capabilities;

use std::{fs::File, io::BufReader, path::Path};

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    effects::{grid::GridConfig, particles::FieldConfig},
    foundation::error::{BackdropError, BackdropResult},
};

/// JSON loading and dumping for effect options.
pub trait JsonConfig: Serialize + DeserializeOwned {
    /// Parse options from a JSON reader. Missing fields take their defaults.
    fn from_reader<R: std::io::Read>(r: R) -> BackdropResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| BackdropError::serde(format!("parse config JSON: {e}")))
    }

    /// Parse options from a JSON file on disk.
    fn from_path(path: impl AsRef<Path>) -> BackdropResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BackdropError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty-printed JSON with every field spelled out.
    fn to_json_pretty(&self) -> BackdropResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BackdropError::serde(format!("serialize config JSON: {e}")))
    }
}

impl JsonConfig for FieldConfig {}
impl JsonConfig for GridConfig {}

#[cfg(test)]
#[path = "../tests/unit/config/json.rs"]
mod tests;
