//! # Secure Recipe Library
//!
//! Command-line client for the Secure Recipe service. It consists of three
//! components:
//!
//! ## Domain Module
//!
//! The [`domain`] module holds the validated value types, the recipe aggregate
//! with its single-use builder, and the mapping between the service's JSON and
//! these types. It is pure: no I/O.
//!
//! ## Client Module
//!
//! The [`client`] module is the HTTP client for the service: login/logout,
//! sign up, recipe queries and the personal area.
//!
//! ## App Module
//!
//! The [`app`] module is the interactive menu that ties the two together.
//!
//! ## Quick Start
//!
//! ```
//! use serde_json::json;
//! use secure_recipe::domain::json::recipe_from_json;
//!
//! let recipe = recipe_from_json(&json!({
//!     "id": 1,
//!     "title": "Tea",
//!     "author": "author",
//!     "description": "Boil the water.",
//!     "created_at": "2022-12-01",
//!     "ingredients": [{"name": "water", "quantity": 1, "unit": "l"}],
//! }))
//! .unwrap();
//! assert_eq!(recipe.title().value(), "Tea");
//! assert_eq!(recipe.updated_at(), None);
//! ```

pub mod app;
pub mod client;
pub mod domain;

pub use app::Application;
pub use client::RecipeClient;
