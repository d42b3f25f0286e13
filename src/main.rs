use std::env;
use std::io;
use std::time::Duration;

use secure_recipe::app::Application;
use secure_recipe::client::{client::DEFAULT_TIMEOUT, RecipeClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they do not mix with the menu
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Get configuration from environment variables
    let base_url = env::var("SECURE_RECIPE_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:8000/api/v1".to_string());

    let timeout = match env::var("SECURE_RECIPE_TIMEOUT_SECS") {
        Ok(secs) => Duration::from_secs(secs.trim().parse()?),
        Err(_) => DEFAULT_TIMEOUT,
    };

    tracing::info!("Using recipe service at {}", base_url);
    let client = RecipeClient::with_timeout(base_url, timeout);

    let stdin = io::stdin();
    let mut app = Application::new(client, stdin.lock(), io::stdout());
    app.run().await?;

    Ok(())
}
