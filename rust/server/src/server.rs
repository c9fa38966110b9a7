//! HTTP front end for the reminder agent.
//!
//! Two POST routes share one agent. Recommendations take a read lock for the
//! row scan, reported outcomes take the write lock for the whole
//! read-modify-write, so no request sees a half-updated row.

use crate::config::ServerConfig;
use crate::protocol::*;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use reminder_rl::{Agent, Hyperparameters, Reminder, RlError, TrainingReport};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

type Body = Map<String, Value>;

#[derive(Clone)]
pub struct AppState {
    agent: Arc<RwLock<Agent<Reminder>>>,
}

impl AppState {
    pub fn new(agent: Agent<Reminder>) -> Self {
        Self {
            agent: Arc::new(RwLock::new(agent)),
        }
    }

    /// Builds the agent and runs the startup training pass before anything
    /// can query it.
    pub fn trained(
        hyperparameters: Hyperparameters,
        rng: &mut dyn rand::RngCore,
    ) -> reminder_rl::Result<(Self, TrainingReport)> {
        let mut agent = Agent::reminder(hyperparameters)?;
        let report = agent.warm_up(rng);
        debug!("Trained Q-table:\n{}", agent.table());

        Ok((Self::new(agent), report))
    }

    pub fn agent(&self) -> &Arc<RwLock<Agent<Reminder>>> {
        &self.agent
    }
}

#[derive(Debug)]
pub enum ApiError {
    InvalidState,
    InvalidStateOrAction,
    Internal(String),
}

impl From<RlError> for ApiError {
    fn from(e: RlError) -> Self {
        match e {
            RlError::InvalidState(_) => Self::InvalidState,
            RlError::InvalidStateOrAction { .. } => Self::InvalidStateOrAction,
            e => Self::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::Internal(e.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::InvalidState => (StatusCode::BAD_REQUEST, ErrorBody::new(INVALID_STATE)),
            Self::InvalidStateOrAction => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new(INVALID_STATE_OR_ACTION),
            ),
            Self::Internal(message) => {
                error!(message = %message, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::internal(message))
            }
        };

        (status, Json(body)).into_response()
    }
}

/// A missing key falls back to `default`; a present key that is not a string
/// can never name a state or action.
fn field<'a>(body: &'a Body, key: &str, default: &'a str) -> Option<&'a str> {
    match body.get(key) {
        None => Some(default),
        Some(v) => v.as_str(),
    }
}

async fn get_reminder(
    State(state): State<AppState>,
    payload: Result<Json<Body>, JsonRejection>,
) -> Result<Json<ReminderResponse>, ApiError> {
    let Json(body) = payload?;
    debug!(body = ?body, "Received reminder request");

    let name = field(&body, "state", DEFAULT_STATE).ok_or(ApiError::InvalidState)?;
    let agent = state.agent.read().await;
    let reminder = agent
        .select(name)
        .inspect_err(|_| warn!(state = name, "Unknown state"))?
        .to_string();

    info!(state = name, reminder = %reminder, "Selected reminder");

    Ok(Json(ReminderResponse { reminder }))
}

async fn update_qlearning(
    State(state): State<AppState>,
    payload: Result<Json<Body>, JsonRejection>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let Json(body) = payload?;
    debug!(body = ?body, "Received update request");

    let (name, action) = match (
        field(&body, "state", DEFAULT_STATE),
        field(&body, "action", DEFAULT_ACTION),
    ) {
        (Some(s), Some(a)) => (s, a),
        _ => return Err(ApiError::InvalidStateOrAction),
    };

    let snapshot = state
        .agent
        .write()
        .await
        .update(name, action)
        .inspect_err(|_| warn!(state = name, action, "Unknown state or action"))?;

    info!(state = name, action, "Q-learning updated");

    Ok(Json(UpdateResponse {
        message: UPDATED_MESSAGE.to_string(),
        q_table: snapshot.values,
    }))
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(GET_REMINDER, post(get_reminder))
        .route(UPDATE_QLEARNING, post(update_qlearning))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    axum::serve(listener, router(state)).await?;

    Ok(())
}

pub async fn run(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;

    info!(address = %addr, "Reminder server started");

    serve(listener, state).await
}
