//! Error types for the recipe domain.
//!
//! Each layer of the domain has its own error enum:
//!
//! - [`ValidationError`] - a raw value was rejected by a value type constructor
//! - [`RecipeError`] - the recipe builder refused an operation
//! - [`JsonError`] - a wire payload could not be mapped to domain objects

use thiserror::Error;

/// Which constraint of a value type was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Too short or too long.
    Length,
    /// Contains characters outside the allowed set, or has the wrong shape.
    Pattern,
    /// Numeric value outside the allowed range.
    Range,
    /// Not one of the enumerated values.
    Membership,
}

/// A raw value was rejected by a value type constructor.
///
/// Carries the field name and the violated constraint; the `Display` output is
/// the hint shown to the user when prompting again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("The {field} is invalid. {}", .constraint.hint())]
pub struct ValidationError {
    field: &'static str,
    constraint: Constraint,
}

impl ValidationError {
    pub fn new(field: &'static str, constraint: Constraint) -> Self {
        Self { field, constraint }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn constraint(&self) -> Constraint {
        self.constraint
    }
}

impl Constraint {
    fn hint(&self) -> &'static str {
        match self {
            Constraint::Length | Constraint::Pattern => "Check the length or the syntax.",
            Constraint::Range => "Check that the number is within the allowed range.",
            Constraint::Membership => "Check that the value is one of the allowed ones.",
        }
    }
}

/// The recipe builder refused an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeError {
    /// `build()` was called before any ingredient was added.
    #[error("A recipe must have at least one ingredient")]
    NoIngredients,

    /// An ingredient with the same name is already part of the recipe.
    #[error("The ingredient '{0}' is already in the recipe")]
    DuplicateIngredient(String),

    /// The builder already handed out its recipe.
    #[error("This recipe builder has already been used")]
    BuilderConsumed,
}

/// A wire payload could not be mapped to domain objects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JsonError {
    #[error("Missing field '{0}'")]
    MissingField(&'static str),

    #[error("Field '{field}' must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Field '{field}' is not a YYYY-MM-DD date: '{value}'")]
    InvalidDate { field: &'static str, value: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Recipe(#[from] RecipeError),
}
