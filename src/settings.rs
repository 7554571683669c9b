//! Dashboard settings stored in ~/.opsboard/settings.json.
//!
//! Two knobs: the IANA timezone "today" is resolved in, and which day the
//! calendar grid starts the week on. Settings are cosmetic, so the lenient
//! loader degrades to defaults with a warn instead of failing the dashboard.

use std::fs;
use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar_grid::WeekStart;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Read(#[from] std::io::Error),
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSettings {
    /// IANA zone name, e.g. "Europe/Berlin".
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub week_start: WeekStart,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for BoardSettings {
    fn default() -> Self {
        BoardSettings {
            timezone: default_timezone(),
            week_start: WeekStart::default(),
        }
    }
}

impl BoardSettings {
    /// Parsed dashboard timezone; unknown names fall back to UTC with a warn.
    pub fn tz(&self) -> Tz {
        match self.timezone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                log::warn!(
                    "settings: unknown timezone \"{}\", falling back to UTC",
                    self.timezone
                );
                Tz::UTC
            }
        }
    }

    pub fn load(path: &Path) -> Result<BoardSettings, SettingsError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Resolve ~/.opsboard/settings.json. A missing or unusable file means
    /// defaults; this never fails.
    pub fn load_default() -> BoardSettings {
        let Some(home) = dirs::home_dir() else {
            log::warn!("settings: no home directory, using defaults");
            return BoardSettings::default();
        };
        Self::load_or_default(&home.join(".opsboard").join("settings.json"))
    }

    fn load_or_default(path: &Path) -> BoardSettings {
        if !path.exists() {
            return BoardSettings::default();
        }
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!(
                    "settings: {} is unusable ({}), using defaults",
                    path.display(),
                    err
                );
                BoardSettings::default()
            }
        }
    }
}
