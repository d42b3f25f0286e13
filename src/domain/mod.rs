//! # Recipe domain
//!
//! Validated value types, the [`Recipe`]/[`Ingredient`] aggregate and the
//! mapping between the service's wire JSON and these types. Everything here is
//! pure: no I/O, no shared state.
//!
//! ## Modules
//!
//! - [`values`] - single-field types checked at construction (`Title`, `Quantity`, ...)
//! - [`ingredient`] - name, quantity and unit of one ingredient
//! - [`recipe`] - the recipe aggregate and its single-use builder
//! - [`json`] - wire JSON to domain and back
//! - [`error`] - error types for all of the above

pub mod error;
pub mod ingredient;
pub mod json;
pub mod recipe;
pub mod values;

pub use error::{Constraint, JsonError, RecipeError, ValidationError};
pub use ingredient::Ingredient;
pub use recipe::{push_distinct, BuilderStage, Recipe, RecipeBuilder};
pub use values::*;
