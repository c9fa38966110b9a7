//! JSON bodies exchanged on the reminder API.

use reminder_rl::envs::reminder::{MISSED, REMIND_EARLY};
use serde::{Deserialize, Serialize};

pub const GET_REMINDER: &str = "/get-reminder";
pub const UPDATE_QLEARNING: &str = "/update-qlearning";

pub const DEFAULT_STATE: &str = MISSED;
pub const DEFAULT_ACTION: &str = REMIND_EARLY;

pub const UPDATED_MESSAGE: &str = "Q-learning updated successfully!";
pub const INVALID_STATE: &str = "Invalid state";
pub const INVALID_STATE_OR_ACTION: &str = "Invalid state or action";
pub const INTERNAL_ERROR: &str = "Internal Server Error";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderRequest {
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub state: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderResponse {
    pub reminder: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub message: String,
    pub q_table: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: INTERNAL_ERROR.to_string(),
            message: Some(message.into()),
        }
    }
}
