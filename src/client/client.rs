use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::{
    auth::{preview, SessionAuth},
    types::*,
};
use crate::domain::{json, Email, Id, Name, Password, Recipe, Title, Username};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Whether an endpoint needs the session key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    /// Refused locally when logged out.
    Required,
    /// Sent when available.
    Optional,
}

pub struct RecipeClient {
    base_url: String,
    client: Client,
    timeout: Duration,
    auth: SessionAuth,
}

impl RecipeClient {
    pub fn new(base_url: String) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: String, timeout: Duration) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = Client::new();
        Self {
            auth: SessionAuth::new(base_url.clone(), client.clone(), timeout),
            client,
            timeout,
            base_url,
        }
    }

    // Session operations
    pub async fn login(&mut self, username: &Username, password: &Password) -> Result<(), ApiError> {
        self.auth.login(username, password).await
    }

    pub async fn logout(&mut self) -> Result<(), ApiError> {
        self.auth.logout().await
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    pub fn get_token_preview(&self) -> Option<String> {
        self.auth.get_token().map(preview)
    }

    pub fn set_token(&mut self, token: String) {
        self.auth.set_token(token);
    }

    pub fn get_token(&self) -> Option<&str> {
        self.auth.get_token()
    }

    pub async fn sign_up(
        &self,
        username: &Username,
        email: &Email,
        password1: &Password,
        password2: &Password,
    ) -> Result<(), ApiError> {
        let url = format!("{}/auth/registration/", self.base_url);
        let request = SignUpRequest {
            username,
            email,
            password1,
            password2,
        };

        tracing::info!("Registering new user: {}", username);
        self.send(self.client.post(&url).json(&request), "sign up")
            .await?;
        Ok(())
    }

    pub async fn role(&self) -> Result<Role, ApiError> {
        let url = format!("{}/auth/user/", self.base_url);
        let request = self.authorize(self.client.get(&url), Access::Required)?;
        let response = self.send(request, "get account details").await?;

        let account: AccountResponse = decode(response, "get account details").await?;
        Role::try_from(account.type_account)
    }

    // Recipe queries
    pub async fn all_recipes(&self) -> Result<Vec<Recipe>, ApiError> {
        self.fetch_recipes("/recipes/", Access::Optional, "get recipes").await
    }

    pub async fn recipe(&self, id: Id) -> Result<Recipe, ApiError> {
        let path = format!("/recipes/{}/", id);
        let value = self.fetch_json(&path, Access::Optional, "get recipe").await?;
        Ok(json::recipe_from_json(&value)?)
    }

    pub async fn sorted_by_date(&self) -> Result<Vec<Recipe>, ApiError> {
        self.fetch_recipes("/recipes/sort-by-date/", Access::Optional, "sort recipes by date")
            .await
    }

    pub async fn sorted_by_title(&self) -> Result<Vec<Recipe>, ApiError> {
        self.fetch_recipes("/recipes/sort-by-title/", Access::Optional, "sort recipes by title")
            .await
    }

    pub async fn my_recipes_sorted_by_date(&self) -> Result<Vec<Recipe>, ApiError> {
        self.fetch_recipes(
            "/personal-area/sort-by-date/",
            Access::Required,
            "sort my recipes by date",
        )
        .await
    }

    pub async fn my_recipes_sorted_by_title(&self) -> Result<Vec<Recipe>, ApiError> {
        self.fetch_recipes(
            "/personal-area/sort-by-title/",
            Access::Required,
            "sort my recipes by title",
        )
        .await
    }

    pub async fn filter_by_author(&self, author: &Username) -> Result<Vec<Recipe>, ApiError> {
        let path = format!("/recipes/by-author/{}/", urlencoding::encode(author.value()));
        self.fetch_recipes(&path, Access::Optional, "filter recipes by author")
            .await
    }

    pub async fn filter_by_title(&self, title: &Title) -> Result<Vec<Recipe>, ApiError> {
        let path = format!("/recipes/by-title/{}/", urlencoding::encode(title.value()));
        self.fetch_recipes(&path, Access::Optional, "filter recipes by title")
            .await
    }

    pub async fn filter_by_ingredient(&self, ingredient: &Name) -> Result<Vec<Recipe>, ApiError> {
        let path = format!(
            "/recipes/by-ingredient/{}/",
            urlencoding::encode(ingredient.value())
        );
        self.fetch_recipes(&path, Access::Optional, "filter recipes by ingredient")
            .await
    }

    // Personal area
    pub async fn add_recipe(&self, draft: &RecipeDraft) -> Result<Recipe, ApiError> {
        let url = format!("{}/personal-area/", self.base_url);
        let request = self.authorize(self.client.post(&url).json(draft), Access::Required)?;

        let value: Value = decode(self.send(request, "add recipe").await?, "add recipe").await?;
        let recipe = json::recipe_from_json(&value)?;
        tracing::info!("Added recipe {}", recipe.id());
        Ok(recipe)
    }

    pub async fn update_recipe(&self, id: Id, draft: &RecipeDraft) -> Result<Recipe, ApiError> {
        let url = format!("{}/personal-area/{}/", self.base_url, id);
        let request = self.authorize(self.client.put(&url).json(draft), Access::Required)?;

        let value: Value =
            decode(self.send(request, "update recipe").await?, "update recipe").await?;
        let recipe = json::recipe_from_json(&value)?;
        tracing::info!("Updated recipe {}", recipe.id());
        Ok(recipe)
    }

    pub async fn delete_recipe(&self, id: Id) -> Result<(), ApiError> {
        let url = format!("{}/personal-area/{}/", self.base_url, id);
        let request = self.authorize(self.client.delete(&url), Access::Required)?;

        self.send(request, "delete recipe").await?;
        tracing::info!("Deleted recipe {}", id);
        Ok(())
    }

    fn authorize(&self, request: RequestBuilder, access: Access) -> Result<RequestBuilder, ApiError> {
        match (access, self.auth.is_authenticated()) {
            (_, true) => Ok(request.header("Authorization", self.auth.auth_header()?)),
            (Access::Optional, false) => Ok(request),
            (Access::Required, false) => {
                tracing::error!("Attempted to make authenticated request without a session key");
                Err(ApiError::NotAuthenticated)
            }
        }
    }

    async fn fetch_json(&self, path: &str, access: Access, what: &str) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Making request to {}: {}", what, url);

        let request = self.authorize(self.client.get(&url), access)?;
        decode(self.send(request, what).await?, what).await
    }

    async fn fetch_recipes(&self, path: &str, access: Access, what: &str) -> Result<Vec<Recipe>, ApiError> {
        let value = self.fetch_json(path, access, what).await?;
        let recipes = json::recipes_from_json(&value)?;
        tracing::debug!("Successfully retrieved {} recipes", recipes.len());
        Ok(recipes)
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response, ApiError> {
        let response = request.timeout(self.timeout).send().await.map_err(|e| {
            tracing::error!("Network error during {}: {}", what, e);
            ApiError::Transport(e)
        })?;

        let status = response.status();
        tracing::debug!("{} response status: {}", what, status);

        if !status.is_success() {
            let error = rejection(response).await;
            tracing::error!("Failed to {}: {}", what, error);
            return Err(error);
        }
        Ok(response)
    }
}

/// Reads the body of a successful response. A body that does not decode is
/// [`ApiError::Malformed`], never a transport failure.
pub(crate) async fn decode<T: DeserializeOwned>(
    response: Response,
    what: &str,
) -> Result<T, ApiError> {
    response.json().await.map_err(|e| {
        tracing::error!("Failed to parse {} response: {}", what, e);
        ApiError::Malformed(format!("{what}: {e}"))
    })
}

/// Turns a non-success response into [`ApiError::Rejected`], preferring the
/// service's `detail` message over the raw body.
pub(crate) async fn rejection(response: Response) -> ApiError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error response".to_string());

    let detail = match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(map)) => map
            .get("detail")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| Value::Object(map).to_string()),
        _ if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
        _ => body,
    };

    ApiError::Rejected {
        status: status.as_u16(),
        detail,
    }
}
