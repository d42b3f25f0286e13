#![allow(dead_code)]

use secure_recipe::RecipeClient;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const API_PREFIX: &str = "/api/v1";
pub const TEST_TOKEN: &str = "fake_token_provided";

pub struct TestEnvironment {
    pub server: MockServer,
    pub client: RecipeClient,
}

impl TestEnvironment {
    /// A client pointed at a fresh mock server, logged out.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let client = RecipeClient::new(format!("{}{}", server.uri(), API_PREFIX));
        Self { server, client }
    }

    /// Same as [`TestEnvironment::new`] but with a session key already set.
    pub async fn logged_in() -> Self {
        let mut env = Self::new().await;
        env.client.set_token(TEST_TOKEN.to_string());
        env
    }
}

pub fn api_path(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

pub fn auth_value() -> String {
    format!("Token {}", TEST_TOKEN)
}

/// A recipe object the way the service sends it.
pub fn recipe_json(id: u64, title: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "author": "author1",
        "title": title,
        "description": "description1",
        "ingredients": [{"name": "ingredient", "quantity": 1, "unit": "n/a"}],
        "created_at": created_at,
        "updated_at": created_at,
    })
}

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("secure_recipe=debug"))
        .with_test_writer()
        .try_init();
}
