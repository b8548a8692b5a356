use std::{fmt::Display, sync::OnceLock};

use regex::Regex;
use serde::{de::Visitor, Deserialize, Serialize};
use thiserror::Error;

use crate::FALLBACK_DISPLAY_NAME;

/// Name shown in game and used to derive the offline identity.
#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
pub struct DisplayName(String);

impl Default for DisplayName {
    fn default() -> Self {
        Self(String::from(FALLBACK_DISPLAY_NAME))
    }
}

struct DisplayNameVisitor;

impl<'de> Visitor<'de> for DisplayNameVisitor {
    type Value = DisplayName;

    fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("string")
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        self.visit_str(v.as_str())
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        DisplayName::new(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for DisplayName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(DisplayNameVisitor)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid display name `{0}`. Use A-Z, a-z, 0-9 and `_` only")]
    InvalidDisplayName(String),
}

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("pattern is valid"))
}

impl DisplayName {
    pub fn new(s: impl Into<String>) -> Result<Self, ValidationError> {
        let s = s.into();
        if pattern().is_match(&s) {
            Ok(DisplayName(s))
        } else {
            Err(ValidationError::InvalidDisplayName(s))
        }
    }

    /// Like [`DisplayName::new`] but falls back to the default name.
    pub fn sanitize(s: &str) -> Self {
        Self::new(s).unwrap_or_else(|err| {
            tracing::warn!("{err}. Using `{FALLBACK_DISPLAY_NAME}`");
            Self::default()
        })
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

impl Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
