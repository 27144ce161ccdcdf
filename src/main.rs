use tracing::{Level, error, info};
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // A missing .env is fine; a malformed one is reported once logging is up.
    let dotenv = dotenvy::dotenv();

    let filter = ai_llm_service::telemetry::env_filter_with_level("info", Level::INFO);

    // Provider traffic is rendered by the library's own layer.
    let app_layer = fmt::layer()
        .with_target(false)
        .with_filter(filter::filter_fn(|meta| {
            !meta
                .target()
                .starts_with(ai_llm_service::telemetry::TARGET_PREFIX)
        }));

    tracing_subscriber::registry()
        .with(filter)
        .with(app_layer)
        .with(ai_llm_service::telemetry::layer())
        .init();

    if let Err(e) = dotenv {
        if !e.not_found() {
            error!(error = %e, "failed to load .env");
            std::process::exit(1);
        }
    }

    info!("starting persona chat backend");

    if let Err(e) = api::start().await {
        error!(error = %e, "fatal");
        std::process::exit(1);
    }
}
