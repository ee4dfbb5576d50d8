//! Log level definitions
//!
//! Levels are plain integers where a *higher* value means more verbose
//! output. A category or sink configured at level `L` accepts any record
//! requested at a level `<= L`. The named constants mark the conventional
//! severity bands, but any intermediate integer is a valid level.

use crate::core::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Level(pub u8);

impl Level {
    /// Nothing is logged.
    pub const OFF: Level = Level(0);
    pub const ERROR: Level = Level(1);
    pub const WARN: Level = Level(3);
    pub const INFO: Level = Level(5);
    pub const DEBUG: Level = Level(7);
    pub const TRACE: Level = Level(9);

    pub fn to_str(&self) -> &'static str {
        match self.0 {
            0 => "OFF",
            1..=2 => "ERROR",
            3..=4 => "WARN",
            5..=6 => "INFO",
            7..=8 => "DEBUG",
            _ => "TRACE",
        }
    }

    pub(crate) fn as_u8(self) -> u8 {
        self.0
    }

    pub(crate) fn from_u8(raw: u8) -> Self {
        Level(raw)
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self.0 {
            0..=2 => Red,
            3..=4 => Yellow,
            5..=6 => Green,
            7..=8 => Blue,
            _ => BrightBlack,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(raw) = s.parse::<u8>() {
            return Ok(Level(raw));
        }
        match s.to_uppercase().as_str() {
            "OFF" => Ok(Level::OFF),
            "ERROR" => Ok(Level::ERROR),
            "WARN" | "WARNING" => Ok(Level::WARN),
            "INFO" => Ok(Level::INFO),
            "DEBUG" => Ok(Level::DEBUG),
            "TRACE" => Ok(Level::TRACE),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}
