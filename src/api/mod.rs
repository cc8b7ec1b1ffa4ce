//! Admin HTTP API for managing panels.
//!
//! Authentication happens upstream; the authenticated admin's user ID reaches
//! this layer in the `x-user-id` header and is used for audit events.

/// Panel CRUD and send endpoints
pub mod panels;

use crate::{
    audit::AuditSink, cache::PanelCache, errors::Error, i18n::Locales, platform::ChatPlatform,
};
use axum::{
    Json, Router,
    extract::{FromRequest, FromRequestParts, Request, rejection::JsonRejection},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::error;

/// Header carrying the authenticated admin's Discord user ID.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Shared state of the admin API.
#[derive(Clone)]
pub struct ApiState {
    /// Database connection for all panel operations
    pub database: DatabaseConnection,
    /// Chat platform the panels are posted on
    pub platform: Arc<dyn ChatPlatform>,
    /// Autocomplete cache, invalidated on every change
    pub cache: Arc<PanelCache>,
    /// Locale bundles used to render panels
    pub locales: Arc<Locales>,
    /// Where admin events go
    pub audit: Arc<dyn AuditSink>,
}

/// Builds the admin API router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route(
            "/api/admin/guilds/{guild}/panels",
            get(panels::list_panels)
                .post(panels::create_panel)
                .put(panels::update_panel)
                .delete(panels::delete_panel),
        )
        .route("/api/admin/guilds/{guild}/panels/send", post(panels::send_panel))
        .with_state(state)
}

/// The admin making the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser(pub String);

impl<S: Send + Sync> FromRequestParts<S> for AdminUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| Self(value.to_string()))
            .ok_or(Error::Unauthorized)
    }
}

/// JSON body whose rejections use the API's error format.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(|rejection| Error::validation(rejection.body_text()))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation { .. } | Self::Conflict { .. } => StatusCode::BAD_REQUEST,
            Self::PanelNotFound { .. } | Self::ChannelNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("Admin API request failed: {self}");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
