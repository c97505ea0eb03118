use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::UflResult;

/// Engine settings loaded from a JSON job file. Missing fields fall back to
/// the command line or the library defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    pub up: Option<usize>,
    pub taps: Option<Vec<f64>>,
    pub threads: Option<usize>,
    pub baud_period_sec: Option<f64>,
}

impl JobConfig {
    pub fn from_file(path: &Path) -> UflResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let cfg: JobConfig = serde_json::from_reader(reader)?;
        log::debug!("job file {}: {:?}", path.display(), cfg);
        Ok(cfg)
    }

    pub fn from_json(s: &str) -> UflResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
