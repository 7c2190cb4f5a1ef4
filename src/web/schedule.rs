use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use tracing::debug;

use super::views::{render_dashboard, render_page};
use super::AppState;
use crate::form::{Field, Level};
use crate::page::{Navigator, RouteRecorder, SchedulePage};

/// Form state as posted by the page. Empty strings mean "not chosen".
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ScheduleForm {
    #[serde(default)]
    field: String,
    #[serde(default)]
    level: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    slot: String,
}

/// Replay the submitted inputs through a fresh page, in the order a user would enter them.
async fn load_page(
    state: &AppState,
    form: &ScheduleForm,
    navigator: Arc<dyn Navigator>,
) -> SchedulePage {
    let page = SchedulePage::new(Arc::clone(&state.api), navigator);
    page.set_field(Field::parse(&form.field)).await;
    page.set_level(Level::parse(&form.level)).await;
    page.set_title(form.title.as_str());
    page.set_notes(form.notes.as_str());
    if !form.slot.is_empty() && !page.select_slot_by_id(&form.slot) {
        debug!("Slot {} is not in the current availability list", form.slot);
    }
    page
}

pub(crate) async fn schedule_page(
    State(state): State<AppState>,
    Query(form): Query<ScheduleForm>,
) -> Html<String> {
    let page = load_page(&state, &form, Arc::new(RouteRecorder::default())).await;
    Html(render_page(&page.snapshot()))
}

pub(crate) async fn submit_schedule(
    State(state): State<AppState>,
    Form(form): Form<ScheduleForm>,
) -> Response {
    let navigator = Arc::new(RouteRecorder::default());
    let page = load_page(&state, &form, navigator.clone()).await;
    let outcome = page.submit().await;

    if let Some(route) = navigator.take() {
        return Redirect::to(&route).into_response();
    }
    debug!("Submission ended with {:?}", outcome);
    Html(render_page(&page.snapshot())).into_response()
}

pub(crate) async fn dashboard_handler() -> Html<String> {
    Html(render_dashboard())
}
