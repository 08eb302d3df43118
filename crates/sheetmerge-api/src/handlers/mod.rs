//! HTTP request handlers for the sheetmerge API

pub mod data;
pub mod uploads;

use serde::Serialize;

/// Acknowledgment body for successful mutations
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
