use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::message::Tracked;
use crate::tracker::MessageTracker;

pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackerConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl TrackerConfig {
    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let input = fs::read_to_string(path)?;
        Self::from_toml(&input).map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid tracker config {}: {err}", path.display()),
            )
        })
    }

    pub fn build<M: Tracked>(&self) -> MessageTracker<M> {
        MessageTracker::new(self.capacity)
    }
}
