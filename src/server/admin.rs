//! Admin routes: auth, the console's section switch, the generic CRUD
//! surface, message status updates, settings and image uploads.
//!
//! Everything except login and the session probe requires an
//! authenticated session; the guard is checked here on top of whatever
//! access policy the backend itself enforces.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::error;

use crate::admin::{Panel, Section};
use crate::database::models::{MessageStatus, SiteSettings};
use crate::database::{AuthError, Draftable, Entity};
use crate::i18n::LanguageStore;

use super::state::AppState;

/// Entity collections addressable through the generic CRUD routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Categories,
    Images,
    Blog,
    Team,
    Events,
    Journey,
    Stats,
    Programs,
    Messages,
}

impl Kind {
    fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "categories" => Some(Kind::Categories),
            "images" => Some(Kind::Images),
            "blog" => Some(Kind::Blog),
            "team" => Some(Kind::Team),
            "events" => Some(Kind::Events),
            "journey" => Some(Kind::Journey),
            "stats" => Some(Kind::Stats),
            "programs" => Some(Kind::Programs),
            "messages" => Some(Kind::Messages),
            _ => None,
        }
    }
}

/// Run one generic panel operation against the panel matching `kind`.
macro_rules! with_panel {
    ($kind:expr, $state:expr, $panel:ident => $body:expr) => {
        match $kind {
            Kind::Categories => {
                let $panel = &$state.console.categories;
                $body
            }
            Kind::Images => {
                let $panel = &$state.console.images;
                $body
            }
            Kind::Blog => {
                let $panel = &$state.console.posts;
                $body
            }
            Kind::Team => {
                let $panel = &$state.console.team;
                $body
            }
            Kind::Events => {
                let $panel = &$state.console.events;
                $body
            }
            Kind::Journey => {
                let $panel = &$state.console.journey;
                $body
            }
            Kind::Stats => {
                let $panel = &$state.console.stats;
                $body
            }
            Kind::Programs => {
                let $panel = &$state.console.programs;
                $body
            }
            Kind::Messages => {
                let $panel = &$state.console.messages;
                $body
            }
        }
    };
}

fn require_auth(state: &AppState) -> Result<(), Response> {
    if state.console.guard.is_authenticated() {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "authentication required" })),
        )
            .into_response())
    }
}

fn unknown_kind() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "unknown content type" })),
    )
        .into_response()
}

// ── Auth ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub async fn login(State(state): State<AppState>, Json(form): Json<LoginForm>) -> Response {
    match state.console.guard.sign_in(&form.email, &form.password).await {
        Ok(()) => Json(json!({ "state": state.console.guard.state() })).into_response(),
        Err(err) => {
            let message = match &err {
                AuthError::InvalidCredentials => {
                    state.lang.translate("admin.login.invalid_credentials")
                }
                AuthError::NotConfigured => state.lang.translate("admin.login.not_configured"),
                AuthError::Other(text) => text.clone(),
            };
            (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
        }
    }
}

pub async fn logout(State(state): State<AppState>) -> Response {
    state.console.guard.logout().await;
    Json(json!({ "state": state.console.guard.state() })).into_response()
}

pub async fn session(State(state): State<AppState>) -> Response {
    Json(json!({ "state": state.console.guard.state() })).into_response()
}

// ── Section switch ──────────────────────────────────────────────────

pub async fn get_section(State(state): State<AppState>) -> Response {
    if let Err(resp) = require_auth(&state) {
        return resp;
    }
    Json(json!({ "section": state.console.section().as_slug() })).into_response()
}

#[derive(Deserialize)]
pub struct SectionChange {
    pub section: String,
}

pub async fn switch_section(
    State(state): State<AppState>,
    Json(change): Json<SectionChange>,
) -> Response {
    if let Err(resp) = require_auth(&state) {
        return resp;
    }
    match Section::from_slug(&change.section) {
        Some(section) => {
            state.console.switch_section(section);
            Json(json!({ "section": section.as_slug() })).into_response()
        }
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "unknown section" })),
        )
            .into_response(),
    }
}

// ── Overview ────────────────────────────────────────────────────────

pub async fn overview(State(state): State<AppState>) -> Response {
    if let Err(resp) = require_auth(&state) {
        return resp;
    }
    match state.console.overview().await {
        Ok(overview) => Json(overview).into_response(),
        Err(err) => {
            error!("Failed to build overview: {err}");
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}

// ── Generic CRUD surface ────────────────────────────────────────────

pub async fn list_items(State(state): State<AppState>, Path(kind): Path<String>) -> Response {
    if let Err(resp) = require_auth(&state) {
        return resp;
    }
    let Some(kind) = Kind::from_slug(&kind) else {
        return unknown_kind();
    };
    with_panel!(kind, state, panel => list_panel(panel).await)
}

async fn list_panel<E: Entity>(panel: &Panel<E>) -> Response {
    panel.load().await;
    match serde_json::to_value(panel.items()) {
        Ok(items) => Json(json!({ "items": items, "status": panel.status() })).into_response(),
        Err(err) => {
            error!("Failed to serialize {}: {err}", E::TABLE);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn save_item(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = require_auth(&state) {
        return resp;
    }
    let Some(kind) = Kind::from_slug(&kind) else {
        return unknown_kind();
    };
    with_panel!(kind, state, panel => save_panel(panel, &state.lang, body).await)
}

async fn save_panel<E: Entity>(panel: &Panel<E>, lang: &LanguageStore, body: Value) -> Response {
    let draft: E = match serde_json::from_value(body) {
        Ok(draft) => draft,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response();
        }
    };

    let saved = panel.save(draft).await;
    let status = panel.status();
    let code = if saved { StatusCode::OK } else { StatusCode::BAD_GATEWAY };
    (
        code,
        Json(json!({
            "saved": saved,
            "status": status,
            "banner": status.banner_key().map(|key| lang.translate(key)),
        })),
    )
        .into_response()
}

/// Seed a blank draft for the admin's create form.
pub async fn new_draft(State(state): State<AppState>, Path(kind): Path<String>) -> Response {
    if let Err(resp) = require_auth(&state) {
        return resp;
    }
    let Some(kind) = Kind::from_slug(&kind) else {
        return unknown_kind();
    };
    match kind {
        // Messages arrive from the public form only.
        Kind::Messages => StatusCode::METHOD_NOT_ALLOWED.into_response(),
        Kind::Images => {
            let draft = state.console.begin_image_draft().await;
            draft_reply(draft)
        }
        Kind::Categories => draft_panel(&state.console.categories).await,
        Kind::Blog => draft_panel(&state.console.posts).await,
        Kind::Team => draft_panel(&state.console.team).await,
        Kind::Events => draft_panel(&state.console.events).await,
        Kind::Journey => draft_panel(&state.console.journey).await,
        Kind::Stats => draft_panel(&state.console.stats).await,
        Kind::Programs => draft_panel(&state.console.programs).await,
    }
}

async fn draft_panel<E: Draftable>(panel: &Panel<E>) -> Response {
    // Load first so the draft gets the next sort position.
    panel.load().await;
    draft_reply(panel.begin_create())
}

/// The draft currently being edited, if any.
pub async fn current_draft(State(state): State<AppState>, Path(kind): Path<String>) -> Response {
    if let Err(resp) = require_auth(&state) {
        return resp;
    }
    let Some(kind) = Kind::from_slug(&kind) else {
        return unknown_kind();
    };
    with_panel!(kind, state, panel => match serde_json::to_value(panel.draft()) {
        Ok(draft) => Json(json!({ "draft": draft })).into_response(),
        Err(err) => {
            error!("Failed to serialize draft: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    })
}

/// Close the open form and dismiss any pending delete confirmation.
/// A save already in flight is not aborted.
pub async fn cancel_edits(State(state): State<AppState>, Path(kind): Path<String>) -> Response {
    if let Err(resp) = require_auth(&state) {
        return resp;
    }
    let Some(kind) = Kind::from_slug(&kind) else {
        return unknown_kind();
    };
    with_panel!(kind, state, panel => {
        panel.close_draft();
        panel.cancel_delete();
        StatusCode::NO_CONTENT.into_response()
    })
}

fn draft_reply<E: Entity>(draft: E) -> Response {
    match serde_json::to_value(&draft) {
        Ok(value) => Json(json!({ "draft": value })).into_response(),
        Err(err) => {
            error!("Failed to serialize draft for {}: {err}", E::TABLE);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirmed: bool,
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    Query(query): Query<DeleteQuery>,
) -> Response {
    if let Err(resp) = require_auth(&state) {
        return resp;
    }
    let Some(kind) = Kind::from_slug(&kind) else {
        return unknown_kind();
    };
    with_panel!(kind, state, panel => delete_panel(panel, &id, query.confirmed).await)
}

async fn delete_panel<E: Entity>(panel: &Panel<E>, id: &str, confirmed: bool) -> Response {
    if !confirmed {
        // First half of the handshake: remember the request and ask the
        // client to come back with ?confirmed=true.
        panel.request_delete(id);
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "confirm_required": true,
                "pending": panel.pending_delete(),
            })),
        )
            .into_response();
    }

    panel.request_delete(id);
    let deleted = panel.confirm_delete().await;
    let code = if deleted { StatusCode::OK } else { StatusCode::BAD_GATEWAY };
    (
        code,
        Json(json!({ "deleted": deleted, "status": panel.status() })),
    )
        .into_response()
}

// ── Messages ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct StatusChange {
    pub status: MessageStatus,
}

pub async fn message_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(change): Json<StatusChange>,
) -> Response {
    if let Err(resp) = require_auth(&state) {
        return resp;
    }
    if state.console.set_message_status(&id, change.status).await {
        Json(json!({ "updated": true })).into_response()
    } else {
        (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "updated": false })),
        )
            .into_response()
    }
}

// ── Settings ────────────────────────────────────────────────────────

pub async fn get_settings(State(state): State<AppState>) -> Response {
    if let Err(resp) = require_auth(&state) {
        return resp;
    }
    state.console.load_settings().await;
    Json(json!({
        "settings": state.console.settings(),
        "status": state.console.settings_banner.get(),
    }))
    .into_response()
}

pub async fn put_settings(
    State(state): State<AppState>,
    Json(snapshot): Json<SiteSettings>,
) -> Response {
    if let Err(resp) = require_auth(&state) {
        return resp;
    }
    let saved = state.console.save_settings(snapshot).await;
    let code = if saved { StatusCode::OK } else { StatusCode::BAD_GATEWAY };
    (
        code,
        Json(json!({
            "saved": saved,
            "settings": state.console.settings(),
            "status": state.console.settings_banner.get(),
        })),
    )
        .into_response()
}

// ── Uploads ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UploadQuery {
    pub name: String,
}

pub async fn upload(
    State(state): State<AppState>,
    Path(folder): Path<String>,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Err(resp) = require_auth(&state) {
        return resp;
    }
    if !matches!(folder.as_str(), "gallery" | "team" | "blog") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "unknown upload folder" })),
        )
            .into_response();
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    match state
        .console
        .upload_image(&folder, &query.name, &content_type, body.to_vec())
        .await
    {
        Some(url) => Json(json!({ "url": url })).into_response(),
        None => (StatusCode::BAD_GATEWAY, Json(json!({ "url": Value::Null }))).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_panel_kind_has_a_slug() {
        for (slug, kind) in [
            ("categories", Kind::Categories),
            ("images", Kind::Images),
            ("blog", Kind::Blog),
            ("team", Kind::Team),
            ("events", Kind::Events),
            ("journey", Kind::Journey),
            ("stats", Kind::Stats),
            ("programs", Kind::Programs),
            ("messages", Kind::Messages),
        ] {
            assert_eq!(Kind::from_slug(slug), Some(kind));
        }
        assert_eq!(Kind::from_slug("settings"), None);
    }
}
