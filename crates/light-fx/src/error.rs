//! Error types for light effects.

use thiserror::Error;

/// Errors reported by effect construction and stepping.
///
/// All of these are caller mistakes detected at the call that introduced
/// the bad input. Nothing here is transient, so nothing is retried.
#[derive(Debug, Error)]
pub enum EffectError {
    /// A parameter was out of range when the effect was created.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },

    /// An operation was called with bad arguments or in the wrong phase.
    #[error("invalid call: {0}")]
    InvalidCall(String),

    /// Effect parameters could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl EffectError {
    pub(crate) fn param(name: &'static str, value: f32, reason: &'static str) -> Self {
        Self::InvalidParameter { name, value, reason }
    }

    pub(crate) fn call(msg: impl Into<String>) -> Self {
        Self::InvalidCall(msg.into())
    }
}
