//! Runtime configuration for the command-line shell.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::toast::DEFAULT_DISPLAY_INTERVAL;

pub const DATA_DIR_ENV: &str = "LOCALNOTES_DATA_DIR";
pub const TOAST_MS_ENV: &str = "LOCALNOTES_TOAST_MS";
const APP_DIR_NAME: &str = "localnotes";
const FALLBACK_DATA_DIR: &str = ".localnotes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub toast_interval: Duration,
}

impl AppConfig {
    /// Resolves the configuration from an explicit override and the process
    /// environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn resolve(data_dir: Option<PathBuf>) -> CoreResult<Self> {
        Self::from_sources(data_dir, |name| std::env::var(name).ok())
    }

    fn from_sources(
        data_dir: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> CoreResult<Self> {
        let data_dir = data_dir
            .or_else(|| {
                env(DATA_DIR_ENV)
                    .filter(|value| !value.trim().is_empty())
                    .map(PathBuf::from)
            })
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME)))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR));

        let toast_interval = match env(TOAST_MS_ENV) {
            Some(raw) => {
                let millis: u64 = raw.trim().parse().map_err(|_| {
                    CoreError::InvalidInput(format!("{TOAST_MS_ENV} must be milliseconds, got {raw}"))
                })?;
                Duration::from_millis(millis)
            }
            None => DEFAULT_DISPLAY_INTERVAL,
        };

        Ok(Self {
            data_dir,
            toast_interval,
        })
    }
}
