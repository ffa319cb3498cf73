use dotenvy::dotenv;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use anyhow::Context;

mod config {
    pub mod settings;
}
mod handlers {
    pub mod consultant;
}
mod utils {
    pub mod rate_limit;
}

use config::settings::Settings;
use handlers::consultant::{self, AdviceSource, GeminiConsultant};
use utils::rate_limit::ClientLimiter;

const LIMITER_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

async fn health_check() -> &'static str {
    "OK"
}

pub struct AppState {
    consultant: Arc<dyn AdviceSource>,
    limiter: ClientLimiter,
}

fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/consultant", post(consultant::ask_consultant))
        .with_state(state)
}

/// API routes plus the built single-page app, with unknown paths falling
/// back to `index.html` so client-side routes survive a reload.
fn build_router(state: Arc<AppState>, static_dir: &Path, development: bool) -> Router {
    let spa = ServeDir::new(static_dir)
        .fallback(ServeFile::new(static_dir.join("index.html")));

    let app = api_routes(state)
        .fallback_service(spa)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        );

    if development {
        // trunk serves the frontend from another port while developing
        app.layer(
            CorsLayer::new()
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_origin(Any)
                .allow_headers([axum::http::header::CONTENT_TYPE])
        )
    } else {
        app
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::from_env()?;

    let consultant = GeminiConsultant::new(
        &settings.llm_endpoint,
        settings.gemini_api_key.clone(),
        settings.llm_model.clone(),
    )?;

    let state = Arc::new(AppState {
        consultant: Arc::new(consultant),
        limiter: ClientLimiter::per_minute(settings.consultant_rate_per_minute),
    });

    let state_for_pruning = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LIMITER_PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            state_for_pruning.limiter.prune();
        }
    });

    let app = build_router(state, &settings.static_dir, settings.development);

    use tokio::net::TcpListener;

    let addr = SocketAddr::from(([127, 0, 0, 1], settings.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(
        "Serving {} and the API on http://{}",
        settings.static_dir.display(),
        addr
    );
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .context("Server error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use consultant::{ConsultantError, ConsultantResponse, MockAdviceSource, SYNCING_REPLY, OFFLINE_REPLY};
    use nonzero_ext::nonzero;
    use tower::ServiceExt;

    fn router(mock: MockAdviceSource) -> Router {
        let state = Arc::new(AppState {
            consultant: Arc::new(mock),
            limiter: ClientLimiter::per_minute(nonzero!(2u32)),
        });
        api_routes(state)
    }

    fn ask_via(prompt: &str, forwarded_for: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/consultant")
            .header("content-type", "application/json")
            .header("x-forwarded-for", forwarded_for)
            .body(Body::from(serde_json::json!({ "prompt": prompt }).to_string()))
            .unwrap()
    }

    fn ask(prompt: &str) -> Request<Body> {
        ask_via(prompt, "198.51.100.4")
    }

    async fn reply_of(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice::<ConsultantResponse>(&bytes).unwrap().reply
    }

    #[tokio::test]
    async fn health_says_ok() {
        let response = router(MockAdviceSource::new())
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn prompt_is_prefixed_and_forwarded() {
        let mut mock = MockAdviceSource::new();
        mock.expect_advise()
            .withf(|prompt| prompt == "Architecture query: automate my shop")
            .times(1)
            .returning(|_| Box::pin(async { Ok("Use a WhatsApp bot.".to_string()) }));

        let response = router(mock).oneshot(ask("  automate my shop ")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(reply_of(response).await, "Use a WhatsApp bot.");
    }

    #[tokio::test]
    async fn empty_prompt_is_rejected_without_calling_the_llm() {
        let mut mock = MockAdviceSource::new();
        mock.expect_advise().times(0);

        let response = router(mock).oneshot(ask("   ")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn failures_become_fallback_replies() {
        let mut mock = MockAdviceSource::new();
        mock.expect_advise()
            .returning(|_| Box::pin(async { Err(ConsultantError::Upstream("timeout".to_string())) }));
        let response = router(mock).oneshot(ask("hi")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(reply_of(response).await, SYNCING_REPLY);

        let mut mock = MockAdviceSource::new();
        mock.expect_advise()
            .returning(|_| Box::pin(async { Err(ConsultantError::MissingKey) }));
        let response = router(mock).oneshot(ask("hi")).await.unwrap();
        assert_eq!(reply_of(response).await, OFFLINE_REPLY);
    }

    #[tokio::test]
    async fn third_question_in_a_minute_is_throttled() {
        let mut mock = MockAdviceSource::new();
        mock.expect_advise()
            .times(2)
            .returning(|_| Box::pin(async { Ok("ok".to_string()) }));
        let app = router(mock);

        for _ in 0..2 {
            let response = app.clone().oneshot(ask("hi")).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
        let response = app.oneshot(ask("hi")).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn rotating_client_supplied_hops_does_not_reset_the_budget() {
        let mut mock = MockAdviceSource::new();
        mock.expect_advise()
            .times(2)
            .returning(|_| Box::pin(async { Ok("ok".to_string()) }));
        let app = router(mock);

        let mut allowed = 0;
        for i in 0..10 {
            let forwarded = format!("10.9.9.{}, 198.51.100.4", i);
            let response = app.clone().oneshot(ask_via("hi", &forwarded)).await.unwrap();
            if response.status() == StatusCode::OK {
                allowed += 1;
            } else {
                assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
            }
        }
        assert_eq!(allowed, 2);
    }

    #[tokio::test]
    async fn unknown_paths_fall_back_to_the_app_shell() {
        let dir = std::env::temp_dir().join(format!("zentrix-static-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<html>shell</html>").unwrap();

        let state = Arc::new(AppState {
            consultant: Arc::new(MockAdviceSource::new()),
            limiter: ClientLimiter::per_minute(nonzero!(2u32)),
        });
        let response = build_router(state, &dir, false)
            .oneshot(Request::builder().uri("/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<html>shell</html>");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
