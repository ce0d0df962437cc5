use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::Html,
    Extension, Form, Json,
};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::FormInput;
use crate::panel::{PanelSnapshot, ResultsPanel};
use crate::session::SessionId;
use crate::view::page::render_page;

use super::AppState;

async fn page(state: &AppState, panel: &ResultsPanel, previous: &FormInput) -> AppResult<Html<String>> {
    let panel = panel.snapshot().await;
    let html = render_page(
        &panel.content,
        previous,
        state.config.default_top_k,
        &state.config.default_language,
    )?;
    Ok(Html(html))
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// The form page with whatever this session's results area currently shows
pub async fn index(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> AppResult<Html<String>> {
    let panel = state.sessions.panel(&session).await;
    page(&state, &panel, &FormInput::default()).await
}

/// Runs one form submission and shows the page with the session's resulting panel
pub async fn submit(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    form: Result<Form<FormInput>, FormRejection>,
) -> AppResult<Html<String>> {
    let Form(form) = form.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;

    let panel = state.sessions.panel(&session).await;
    state.submissions.submit(&panel, &form).await;
    page(&state, &panel, &form).await
}

/// This session's results area alone, as JSON
pub async fn results(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Json<PanelSnapshot> {
    let panel = state.sessions.panel(&session).await.snapshot().await;
    Json(PanelSnapshot::from(&panel))
}
