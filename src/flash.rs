//! One-shot flash messages shown on the next page view.

use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    #[default]
    Warning,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => bail!("Unknown flash level: {}", other),
        }
    }
}

/// Flash messages grouped by level.
///
/// Lives in the session between two requests. Flashing a level replaces the
/// messages previously stored for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashBag {
    messages: HashMap<Level, Vec<String>>,
}

impl FlashBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `message` under `level`.
    pub fn flash(&mut self, message: impl Into<String>, level: Level) {
        self.messages.insert(level, vec![message.into()]);
    }

    /// First message for `level`, or an empty string.
    pub fn first(&self, level: Level) -> &str {
        self.messages
            .get(&level)
            .and_then(|messages| messages.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn has(&self, level: Level) -> bool {
        self.messages.get(&level).is_some_and(|m| !m.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.messages.values().all(Vec::is_empty)
    }
}
