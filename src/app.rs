use std::net::SocketAddr;
use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use crate::state::AppState;
use crate::{messages, profiles};

pub fn build_app(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    let mut router = Router::new()
        .merge(messages::router())
        .merge(profiles::router())
        .route("/health", get(|| async { "ok" }));

    if static_dir.is_dir() {
        router = router.fallback_service(ServeDir::new(static_dir));
    } else {
        tracing::warn!(dir = %static_dir.display(), "static directory missing; not serving assets");
    }

    router
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "3000".into())
    )
        .parse()?;

    tracing::info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
