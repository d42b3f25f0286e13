//! # Secure Recipe HTTP Client
//!
//! Thin async client for the remote recipe service. Responses carrying recipes
//! are turned into validated [`Recipe`](crate::domain::Recipe)s; anything the
//! service refuses comes back as [`ApiError::Rejected`] with the service's own
//! message.
//!
//! ## Modules
//!
//! - [`auth`] - session key handling (login/logout)
//! - [`client`] - the [`RecipeClient`] with one method per endpoint
//! - [`types`] - request/response payloads and [`ApiError`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use secure_recipe::client::RecipeClient;
//! use secure_recipe::domain::{Password, Username};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut client = RecipeClient::new("http://localhost:8000/api/v1".to_string());
//!
//! client.login(&Username::new("username")?, &Password::new("password1234")?).await?;
//!
//! let recipes = client.sorted_by_title().await?;
//! println!("Found {} recipes", recipes.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
#[allow(clippy::module_inception)]
pub mod client;
pub mod types;

pub use client::RecipeClient;
pub use types::*;
