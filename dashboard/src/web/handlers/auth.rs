//! Login, logout and session endpoints

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Json};
use serde_json::json;

use shared::{ApiEnvelope, Component, component_info, component_warn};

use crate::core::auth::{AuthContext, expired_session_cookie, session_cookie};
use crate::error::{DashboardError, DashboardResult};
use crate::state::DashboardState;
use crate::traits::{CredentialStore, ProductSource};
use crate::types::{LoginRequest, LoginResponse};

/// Validate credentials and open a session - /api/auth
pub async fn login<P, C>(
    State(state): State<DashboardState<P, C>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> DashboardResult<impl IntoResponse>
where
    P: ProductSource + 'static,
    C: CredentialStore + 'static,
{
    let Json(request) = payload.map_err(|rejection| DashboardError::invalid_request(rejection.body_text()))?;

    // Blank checks trim; credentials are validated exactly as sent
    let username = request.username.as_deref().unwrap_or_default();
    let password = request.password.as_deref().unwrap_or_default();

    if username.trim().is_empty() || password.trim().is_empty() {
        return Err(DashboardError::MissingCredentials);
    }

    if !state.credentials.validate(username, password) {
        component_warn!(Component::Auth, "🚫 Rejected login for {}", username);
        return Err(DashboardError::InvalidCredentials);
    }

    let session = state.sessions.create(username).await;
    component_info!(Component::Auth, "✅ Login successful for {}", username);

    Ok((
        [(header::SET_COOKIE, session_cookie(&session.token))],
        Json(LoginResponse {
            success: true,
            message: "Login successful".to_string(),
            username: session.username,
        }),
    ))
}

/// Close the caller's session and expire the cookie - /api/logout
pub async fn logout<P, C>(State(state): State<DashboardState<P, C>>, headers: HeaderMap) -> impl IntoResponse
where
    P: ProductSource + 'static,
    C: CredentialStore + 'static,
{
    if let Some(token) = DashboardState::<P, C>::session_token(&headers) {
        state.sessions.end(token).await;
    }

    (
        [(header::SET_COOKIE, expired_session_cookie())],
        Json(json!({
            "success": true,
            "message": "Logged out",
        })),
    )
}

/// Who is calling - /api/session
pub async fn session<P, C>(
    State(state): State<DashboardState<P, C>>,
    headers: HeaderMap,
) -> Json<ApiEnvelope<AuthContext>>
where
    P: ProductSource + 'static,
    C: CredentialStore + 'static,
{
    Json(ApiEnvelope::ok(state.auth_context(&headers).await))
}
