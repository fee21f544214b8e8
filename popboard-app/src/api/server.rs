use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get},
    Router,
};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::api::routes::{
    active_popups, delete_active_segment, delete_popup, list_popups, save_popup, AppState,
};
use popboard_core::PopupRepository;

pub const BODY_LIMIT: usize = 10 * 1024 * 1024;

pub fn router(repo: Arc<dyn PopupRepository>, static_dir: PathBuf) -> Router {
    let state = Arc::new(AppState { repo });

    Router::new()
        .route("/api/popups", get(list_popups).post(save_popup))
        .route(
            "/api/popups/active",
            get(active_popups).delete(delete_active_segment),
        )
        .route("/api/popups/:id", delete(delete_popup))
        .with_state(state)
        .fallback_service(ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn run(repo: Arc<dyn PopupRepository>, addr: SocketAddr, static_dir: PathBuf) -> anyhow::Result<()> {
    let app = router(repo, static_dir);

    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    tracing::info!("listening on http://{local}");
    tracing::info!("popup service ready");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
