//! ============================================================================
//! Kiosk Configuration
//! ============================================================================
//! Read from the environment (a `.env` file is loaded by the binary first):
//! - `TOUR_RNG_SEED`  - fixed seed for reproducible codes (demo only)
//! - `TOUR_AUDIO_DIR` - directory holding the `luisterpunt_<n>.mp3` recordings
//! ============================================================================

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::types::TourError;

pub const ENV_RNG_SEED: &str = "TOUR_RNG_SEED";
pub const ENV_AUDIO_DIR: &str = "TOUR_AUDIO_DIR";

/// Default directory for tour audio
pub const DEFAULT_AUDIO_DIR: &str = "audio";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourConfig {
    /// Seed for code generation; `None` seeds from the OS
    pub rng_seed: Option<u64>,
    /// Where the stop audio lives
    pub audio_dir: PathBuf,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            rng_seed: None,
            audio_dir: PathBuf::from(DEFAULT_AUDIO_DIR),
        }
    }
}

impl TourConfig {
    /// Build from the process environment
    pub fn from_env() -> Result<Self, TourError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TourError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(raw) = get(ENV_RNG_SEED) {
            let seed = raw.trim().parse::<u64>().map_err(|_| TourError::InvalidConfig {
                key: ENV_RNG_SEED.to_string(),
                value: raw.clone(),
            })?;
            config.rng_seed = Some(seed);
        }

        if let Some(dir) = get(ENV_AUDIO_DIR) {
            config.audio_dir = PathBuf::from(dir.trim());
        }

        debug!("Loaded tour config: {:?}", config);
        Ok(config)
    }
}
