use crate::protocol::*;
use reminder_rl::envs::reminder::{ON_TIME, REMIND_ON_TIME};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server rejected request ({status}): {error}")]
    Rejected {
        status: u16,
        error: String,
        message: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Blocking client for a running reminder server.
/// NOTE: Do not call from inside an async runtime.
#[derive(Debug)]
pub struct ReminderClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ReminderClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = base_url.replace("//localhost:", "//127.0.0.1:");
        if base_url.ends_with('/') {
            _ = base_url.remove(base_url.len() - 1);
        }

        Ok(Self {
            base_url,
            client: reqwest::blocking::Client::builder().build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn get_reminder(&self, state: &str) -> Result<String> {
        let body = ReminderRequest {
            state: state.to_string(),
        };
        let res: ReminderResponse = self.http_post(GET_REMINDER, &body)?;

        Ok(res.reminder)
    }

    pub fn update(&self, state: &str, action: &str) -> Result<UpdateResponse> {
        let body = UpdateRequest {
            state: state.to_string(),
            action: action.to_string(),
        };

        self.http_post(UPDATE_QLEARNING, &body)
    }

    /// Reports that a reminded person confirmed in time.
    pub fn confirm_on_time(&self) -> Result<UpdateResponse> {
        self.update(ON_TIME, REMIND_ON_TIME)
    }

    fn make_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn http_post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.make_url(path);
        debug!(url = %url, "POST");

        let res = self
            .client
            .post(&url)
            .headers(Self::construct_common_headers())
            .json(body)
            .send()?;

        let status = res.status();
        if status.is_success() {
            return Ok(res.json::<T>()?);
        }

        Err(rejection(status.as_u16(), &res.text()?))
    }

    fn construct_common_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

/// Error bodies from something other than the reminder server (a proxy page,
/// an empty 404) keep their status and carry the raw text.
fn rejection(status: u16, text: &str) -> ClientError {
    match serde_json::from_str::<ErrorBody>(text) {
        Ok(err) => ClientError::Rejected {
            status,
            error: err.error,
            message: err.message,
        },
        Err(_) => ClientError::Rejected {
            status,
            error: text.to_string(),
            message: None,
        },
    }
}
