//! Progress statistics
//!
//! XP and level rules belong to the study API. This crate only fetches the latest stats
//! whenever a mutation may have changed them, and hands them over untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An opaque statistics snapshot
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stats {
    content: Value,
}

impl Stats {
    pub fn new(content: Value) -> Self {
        Self { content }
    }

    pub fn as_json(&self) -> &Value {
        &self.content
    }

    /// Convenience accessor for a top-level numeric field (e.g. `xp`)
    pub fn number(&self, field: &str) -> Option<f64> {
        self.content.get(field).and_then(Value::as_f64)
    }
}
