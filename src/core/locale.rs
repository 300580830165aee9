//! User-facing message language

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language used for messages shown to the student
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Hebrew, the language of the degree catalogs
    #[default]
    He,
    /// English
    En,
}

impl Locale {
    /// Short code stored in the configuration file
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::He => "he",
            Self::En => "en",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "he" | "heb" | "hebrew" => Ok(Self::He),
            "en" | "eng" | "english" => Ok(Self::En),
            _ => Err(format!("Unknown locale: '{s}' (expected 'he' or 'en')")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
