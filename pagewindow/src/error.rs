use alloc::string::String;

use thiserror::Error;

/// Rejected Page Buffer mutation. The buffer is left unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BufferError<K> {
    #[error("page {id:?} is already in the window")]
    DuplicateId { id: K },
}

/// A failed fetch reported by the page source.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("page source failed: {message}")]
pub struct SourceError {
    message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Invalid [`crate::WindowOptions`]. The previous options stay in effect.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("max_page_buffer must be at least 1")]
    ZeroPageBuffer,
    #[error("{name} must be within [0, 1], got {value}")]
    RatioOutOfRange { name: &'static str, value: f32 },
    #[error("pause_ratio ({pause}) must not be below trigger_ratio ({trigger})")]
    PauseBelowTrigger { trigger: f32, pause: f32 },
}
