use lambda_http::{run, service_fn, Error};
use salvay_shared::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .without_time()
        .init();

    let config = aws_config::load_from_env().await;
    let state = Arc::new(AppState::new(&config));

    run(service_fn(move |event| {
        let state = state.clone();
        async move { http_handler::function_handler(event, state).await }
    }))
    .await
}
