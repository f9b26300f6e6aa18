//! Route handlers.
//!
//! Each handler deserializes its request, makes one synchronous call into
//! the issuer, and maps the outcome to a response. No handler awaits
//! anything besides its extractors.

use axum::Json;
use axum::extract::State;
use keyforge_protocol::{CreateSessionRequest, IssueTokenRequest};
use serde_json::{Value, json};

use crate::KeyforgeError;
use crate::server::AppState;

/// `GET /api/public-key`: the PEM text relying parties verify against.
pub(crate) async fn public_key(State(state): State<AppState>) -> String {
    state.issuer().public_key_pem().to_owned()
}

/// `POST /api/create-session`: registers a roster, returns the bare id.
pub(crate) async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> String {
    state.issuer().create_session(request.users).into_inner()
}

/// `POST /api/issue-token`: returns the compact token for a roster member.
pub(crate) async fn issue_token(
    State(state): State<AppState>,
    Json(request): Json<IssueTokenRequest>,
) -> Result<String, KeyforgeError> {
    let token = state.issuer().issue(&request.session_id, &request.user)?;
    Ok(token)
}

pub(crate) async fn healthz() -> Json<Value> {
    Json(json!({ "ok": true, "service": "keyforge" }))
}
