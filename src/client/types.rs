//! Request and response types for the Secure Recipe API.
//!
//! Request bodies are built from validated domain values, which serialise as
//! their bare primitives, so a body can only ever carry values the service
//! would accept.
//!
//! ## Key Types
//!
//! - [`RecipeDraft`] - body of "add recipe" and "update recipe"
//! - [`Role`] - account type reported by the service
//! - [`ApiError`] - everything that can go wrong talking to the service

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    push_distinct, Description, Email, Ingredient, JsonError, Password, Recipe, RecipeError,
    Title, Username,
};

/// Credentials sent to `/auth/login/`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a Username,
    pub password: &'a Password,
}

/// Session key returned by `/auth/login/`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub key: String,
}

/// Registration payload for `/auth/registration/`.
#[derive(Debug, Serialize)]
pub struct SignUpRequest<'a> {
    pub username: &'a Username,
    pub email: &'a Email,
    pub password1: &'a Password,
    pub password2: &'a Password,
}

/// Account details returned by `/auth/user/`.
#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    #[serde(rename = "type-account")]
    pub type_account: i64,
}

/// Account type of the logged-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
    Moderator,
}

impl TryFrom<i64> for Role {
    type Error = ApiError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Role::User),
            1 => Ok(Role::Admin),
            2 => Ok(Role::Moderator),
            other => Err(ApiError::Malformed(format!("unknown account type {other}"))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::User => "normal user",
            Role::Admin => "admin",
            Role::Moderator => "moderator",
        };
        write!(f, "You are logged as {label}")
    }
}

/// Body of the "add recipe" and "update recipe" requests.
///
/// Holds the same ingredient rules as a built [`Recipe`]: at least one, and no
/// repeated names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDraft {
    title: Title,
    description: Description,
    ingredients: Vec<Ingredient>,
}

impl RecipeDraft {
    pub fn new(
        title: Title,
        description: Description,
        ingredients: Vec<Ingredient>,
    ) -> Result<Self, RecipeError> {
        if ingredients.is_empty() {
            return Err(RecipeError::NoIngredients);
        }
        let mut distinct = Vec::with_capacity(ingredients.len());
        for ingredient in ingredients {
            push_distinct(&mut distinct, ingredient)?;
        }
        Ok(Self {
            title,
            description,
            ingredients: distinct,
        })
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }
}

impl From<&Recipe> for RecipeDraft {
    fn from(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title().clone(),
            description: recipe.description().clone(),
            ingredients: recipe.ingredients().to_vec(),
        }
    }
}

/// Errors returned by [`RecipeClient`](crate::client::RecipeClient).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The call needs a session key and there is none.
    #[error("You are not logged in. Please log in first.")]
    NotAuthenticated,

    /// The service answered with a non-success status. `detail` is the
    /// service's own message when it sent one.
    #[error("{detail}")]
    Rejected { status: u16, detail: String },

    #[error("Failed to reach the recipe service: {0}")]
    Transport(#[from] reqwest::Error),

    /// A recipe payload did not satisfy the domain rules.
    #[error("Invalid recipe from the service: {0}")]
    Payload(#[from] JsonError),

    #[error("Unexpected response from the recipe service: {0}")]
    Malformed(String),
}
