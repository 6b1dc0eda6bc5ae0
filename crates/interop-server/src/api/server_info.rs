//! Status query endpoint.

use axum::{extract::State, http::Method, Json};
use interop_core::ServerStatus;
use std::sync::Arc;

use crate::resolver::{resolve_status, StatusQueryError};
use crate::state::{AppState, AuthenticatedUser};

/// Mounted for every method so that the method check happens after the
/// auth gate, inside the resolver.
pub async fn get_server_info(
    State(state): State<Arc<AppState>>,
    method: Method,
    caller: Option<AuthenticatedUser>,
) -> Result<Json<ServerStatus>, StatusQueryError> {
    resolve_status(state.store(), caller.as_ref(), &method)
        .await
        .map(Json)
}
