//! Display color tokens

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A CSS color, normalized to its hex form (e.g. `#6366f1`).
///
/// Colors come from external data (course colors, task categories) and may be written in any CSS notation.
/// They are parsed once, so that two notations of the same color compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorToken(String);

impl ColorToken {
    /// Parse any CSS color notation (`#abc`, `rgb(...)`, `indigo`...)
    pub fn parse(raw: &str) -> Option<Self> {
        match csscolorparser::parse(raw.trim()) {
            Ok(color) => Some(Self(color.to_hex_string())),
            Err(err) => {
                log::debug!("Ignoring invalid color {:?}: {}", raw, err);
                None
            }
        }
    }

    /// Used for built-in colors, that are already written in their normalized form
    pub(crate) fn from_static(hex: &'static str) -> Self {
        Self(hex.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns this color as a CSS `rgba(...)` string with the given opacity
    pub fn with_alpha(&self, alpha: f64) -> String {
        let channel = |range: std::ops::Range<usize>| {
            self.0.get(range)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .unwrap_or(0)
        };
        format!("rgba({},{},{},{})", channel(1..3), channel(3..5), channel(5..7), alpha)
    }
}

impl Display for ColorToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}
