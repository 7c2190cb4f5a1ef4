pub mod schedule;
pub mod views;

use std::sync::Arc;

use anyhow::Result;
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::client::InterviewApi;
use crate::page::DASHBOARD_ROUTE;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: Arc<dyn InterviewApi>,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/schedule") }))
        .route(
            "/schedule",
            get(schedule::schedule_page).post(schedule::submit_schedule),
        )
        .route(DASHBOARD_ROUTE, get(schedule::dashboard_handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

pub async fn serve(api: Arc<dyn InterviewApi>, addr: &str) -> Result<()> {
    let app = router(AppState { api });

    let listener = TcpListener::bind(addr).await?;
    info!("Schedule page listening on http://{}/schedule", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
