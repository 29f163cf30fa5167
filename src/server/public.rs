//! Public routes: page view models, language switching, snapshot
//! refresh and the contact form.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::i18n::Lang;
use crate::pages;
use crate::pages::contact::SubmitError;

use super::state::AppState;

/// Wrap a page body with the document-level language attribute and the
/// cache's loading flag.
fn page<T: Serialize>(state: &AppState, body: T) -> Response {
    let font_class = if state.lang.is_hi() {
        "font-hindi"
    } else {
        "font-english"
    };
    Json(json!({
        "lang": state.lang.html_lang(),
        "font_class": font_class,
        "loading": state.store.is_loading(),
        "page": body,
    }))
    .into_response()
}

pub async fn home(State(state): State<AppState>) -> Response {
    let data = state.store.snapshot();
    page(&state, pages::home::view(&data, &state.lang))
}

pub async fn about(State(state): State<AppState>) -> Response {
    let data = state.store.snapshot();
    page(&state, pages::about::view(&data, &state.lang))
}

pub async fn work(State(state): State<AppState>) -> Response {
    let data = state.store.snapshot();
    page(&state, pages::work::view(&data, &state.lang))
}

#[derive(Deserialize)]
pub struct GalleryQuery {
    pub category: Option<String>,
}

pub async fn gallery(
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> Response {
    let data = state.store.snapshot();
    page(
        &state,
        pages::gallery::view(&data, &state.lang, query.category.as_deref()),
    )
}

pub async fn blog_list(State(state): State<AppState>) -> Response {
    let data = state.store.snapshot();
    page(&state, pages::blog::list(&data, &state.lang))
}

pub async fn blog_detail(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let data = state.store.snapshot();
    match pages::blog::detail(&data, &state.lang, &id) {
        Some(view) => page(&state, view),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "lang": state.lang.html_lang(),
                "error": state.lang.translate("blog.not_found"),
                "back": state.lang.translate("blog.back"),
            })),
        )
            .into_response(),
    }
}

pub async fn team(State(state): State<AppState>) -> Response {
    let data = state.store.snapshot();
    page(&state, pages::team::view(&data, &state.lang))
}

pub async fn contact(State(state): State<AppState>) -> Response {
    let data = state.store.snapshot();
    page(&state, pages::contact::view(&data, &state.lang))
}

pub async fn submit_contact(
    State(state): State<AppState>,
    Json(form): Json<pages::contact::ContactForm>,
) -> Response {
    match pages::contact::submit(&state.gateway, &form).await {
        Ok(()) => Json(json!({
            "sent": true,
            "message": state.lang.translate("contact.success"),
        }))
        .into_response(),
        Err(SubmitError::Invalid(errors)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "sent": false, "errors": errors })),
        )
            .into_response(),
        Err(SubmitError::Send(err)) => {
            error!("Contact submission failed: {err}");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({
                    "sent": false,
                    "message": state.lang.translate("contact.send_error"),
                })),
            )
                .into_response()
        }
    }
}

#[derive(Deserialize)]
pub struct LangChange {
    pub lang: Lang,
}

pub async fn get_lang(State(state): State<AppState>) -> Response {
    Json(json!({ "lang": state.lang.html_lang() })).into_response()
}

/// Switch the active language; the preference persists across restarts.
pub async fn set_lang(State(state): State<AppState>, Json(change): Json<LangChange>) -> Response {
    state.lang.set_lang(change.lang);
    Json(json!({ "lang": state.lang.html_lang() })).into_response()
}

/// Manual refresh of the public content snapshot.
pub async fn refresh(State(state): State<AppState>) -> Response {
    state.store.refresh().await;
    StatusCode::NO_CONTENT.into_response()
}
