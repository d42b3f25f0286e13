//! The recipe aggregate and its builder.
//!
//! A [`Recipe`] has no public constructor and no public way to change its
//! ingredient list: the only way to get one is through a [`RecipeBuilder`],
//! which lives in this module and is therefore the only code allowed to call
//! [`Recipe::add_ingredient`].

use std::fmt;

use chrono::NaiveDate;

use crate::domain::error::RecipeError;
use crate::domain::ingredient::Ingredient;
use crate::domain::values::{Description, Id, Title, Username};

/// Date format used for display and on the wire.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A recipe as published on the service.
///
/// Invariants: at least one ingredient, and no two ingredients share a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    id: Id,
    title: Title,
    author: Username,
    description: Description,
    created_at: NaiveDate,
    updated_at: Option<NaiveDate>,
    ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// Starts building a recipe. Ingredients are added through the builder.
    pub fn builder(
        id: Id,
        title: Title,
        author: Username,
        description: Description,
        created_at: NaiveDate,
        updated_at: Option<NaiveDate>,
    ) -> RecipeBuilder {
        RecipeBuilder {
            stage: Stage::Empty(Recipe {
                id,
                title,
                author,
                description,
                created_at,
                updated_at,
                ingredients: Vec::new(),
            }),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn author(&self) -> &Username {
        &self.author
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn created_at(&self) -> NaiveDate {
        self.created_at
    }

    /// `None` when the recipe was never updated.
    pub fn updated_at(&self) -> Option<NaiveDate> {
        self.updated_at
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn has_ingredient(&self, ingredient: &Ingredient) -> bool {
        self.ingredients.iter().any(|i| i.name() == ingredient.name())
    }

    fn add_ingredient(&mut self, ingredient: Ingredient) -> Result<(), RecipeError> {
        push_distinct(&mut self.ingredients, ingredient)
    }
}

/// Appends `ingredient` unless an ingredient with the same name is already in
/// `ingredients`. Shared by the builder and anything collecting ingredients
/// before a recipe exists.
pub fn push_distinct(
    ingredients: &mut Vec<Ingredient>,
    ingredient: Ingredient,
) -> Result<(), RecipeError> {
    if ingredients.iter().any(|i| i.name() == ingredient.name()) {
        return Err(RecipeError::DuplicateIngredient(
            ingredient.name().value().to_string(),
        ));
    }
    ingredients.push(ingredient);
    Ok(())
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Recipe #{}: {}", self.id, self.title)?;
        writeln!(f, "Author: {}", self.author)?;
        writeln!(f, "Created at: {}", self.created_at.format(DATE_FORMAT))?;
        if let Some(updated_at) = self.updated_at {
            writeln!(f, "Updated at: {}", updated_at.format(DATE_FORMAT))?;
        }
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Ingredients:")?;
        for ingredient in &self.ingredients {
            writeln!(f, "  - {ingredient}")?;
        }
        Ok(())
    }
}

/// Where a [`RecipeBuilder`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderStage {
    /// No ingredient added yet; `build()` would fail.
    Empty,
    /// At least one ingredient; ready to build.
    Partial,
    /// The recipe has been handed out; every further call fails.
    Consumed,
}

#[derive(Debug)]
enum Stage {
    Empty(Recipe),
    Partial(Recipe),
    Consumed,
}

/// Single-use builder for [`Recipe`].
///
/// ```
/// use chrono::NaiveDate;
/// use secure_recipe::domain::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let created = NaiveDate::from_ymd_opt(2022, 12, 1).unwrap();
/// let mut builder = Recipe::builder(
///     Id::new(1)?,
///     Title::new("Lemonade")?,
///     Username::new("author")?,
///     Description::new("Squeeze, stir, serve.")?,
///     created,
///     None,
/// );
/// let recipe = builder
///     .with_ingredient(Ingredient::new(Name::new("lemon")?, Quantity::new(3)?, Unit::new("n/a")?))?
///     .build()?;
/// assert_eq!(recipe.ingredients().len(), 1);
/// assert!(builder.build().is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RecipeBuilder {
    stage: Stage,
}

impl RecipeBuilder {
    /// Appends an ingredient whose name is not yet in the recipe.
    pub fn with_ingredient(&mut self, ingredient: Ingredient) -> Result<&mut Self, RecipeError> {
        let recipe = match &mut self.stage {
            Stage::Empty(recipe) | Stage::Partial(recipe) => recipe,
            Stage::Consumed => return Err(RecipeError::BuilderConsumed),
        };
        recipe.add_ingredient(ingredient)?;

        if let Stage::Empty(_) = self.stage {
            if let Stage::Empty(recipe) = std::mem::replace(&mut self.stage, Stage::Consumed) {
                self.stage = Stage::Partial(recipe);
            }
        }
        Ok(self)
    }

    /// Hands out the finished recipe. An empty builder stays usable; a
    /// successful call leaves the builder consumed.
    pub fn build(&mut self) -> Result<Recipe, RecipeError> {
        match std::mem::replace(&mut self.stage, Stage::Consumed) {
            Stage::Partial(recipe) => Ok(recipe),
            Stage::Empty(recipe) => {
                self.stage = Stage::Empty(recipe);
                Err(RecipeError::NoIngredients)
            }
            Stage::Consumed => Err(RecipeError::BuilderConsumed),
        }
    }

    pub fn stage(&self) -> BuilderStage {
        match self.stage {
            Stage::Empty(_) => BuilderStage::Empty,
            Stage::Partial(_) => BuilderStage::Partial,
            Stage::Consumed => BuilderStage::Consumed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::{Name, Quantity, Unit};
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 12, 1).unwrap()
    }

    fn builder() -> RecipeBuilder {
        Recipe::builder(
            Id::new(1).unwrap(),
            Title::new("title").unwrap(),
            Username::new("username").unwrap(),
            Description::new("description1").unwrap(),
            date(),
            Some(date()),
        )
    }

    fn ingredient(name: &str, quantity: i64, unit: &str) -> Ingredient {
        Ingredient::new(
            Name::new(name).unwrap(),
            Quantity::new(quantity).unwrap(),
            Unit::new(unit).unwrap(),
        )
    }

    #[test]
    fn test_build_with_one_ingredient() {
        let recipe = builder()
            .with_ingredient(ingredient("name", 10, "n/a"))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(recipe.id().value(), 1);
        assert_eq!(recipe.title().value(), "title");
        assert_eq!(recipe.author().value(), "username");
        assert_eq!(recipe.description().value(), "description1");
        assert_eq!(recipe.created_at(), date());
        assert_eq!(recipe.updated_at(), Some(date()));
        assert_eq!(recipe.ingredients(), &[ingredient("name", 10, "n/a")]);
    }

    #[test]
    fn test_build_without_ingredients_fails_and_keeps_builder() {
        let mut builder = builder();
        assert_eq!(builder.build(), Err(RecipeError::NoIngredients));
        assert_eq!(builder.stage(), BuilderStage::Empty);

        builder.with_ingredient(ingredient("salt", 1, "g")).unwrap();
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_duplicate_name_rejected_regardless_of_quantity_and_unit() {
        let mut builder = builder();
        builder.with_ingredient(ingredient("water", 1, "l")).unwrap();

        let error = builder
            .with_ingredient(ingredient("water", 500, "ml"))
            .unwrap_err();
        assert_eq!(error, RecipeError::DuplicateIngredient("water".to_string()));

        let recipe = builder.build().unwrap();
        assert_eq!(recipe.ingredients().len(), 1);
    }

    #[test]
    fn test_push_distinct_refuses_repeated_name() {
        let mut ingredients = vec![ingredient("salt", 1, "g")];

        push_distinct(&mut ingredients, ingredient("pepper", 1, "g")).unwrap();
        assert_eq!(
            push_distinct(&mut ingredients, ingredient("salt", 2, "kg")),
            Err(RecipeError::DuplicateIngredient("salt".to_string()))
        );
        assert_eq!(ingredients, vec![ingredient("salt", 1, "g"), ingredient("pepper", 1, "g")]);
    }

    #[test]
    fn test_ingredients_keep_insertion_order() {
        let recipe = builder()
            .with_ingredient(ingredient("flour", 500, "g"))
            .unwrap()
            .with_ingredient(ingredient("egg", 2, "n/a"))
            .unwrap()
            .with_ingredient(ingredient("milk", 1, "cup"))
            .unwrap()
            .build()
            .unwrap();

        let names: Vec<&str> = recipe.ingredients().iter().map(|i| i.name().value()).collect();
        assert_eq!(names, vec!["flour", "egg", "milk"]);
    }

    #[test]
    fn test_stages() {
        let mut builder = builder();
        assert_eq!(builder.stage(), BuilderStage::Empty);
        builder.with_ingredient(ingredient("salt", 1, "g")).unwrap();
        assert_eq!(builder.stage(), BuilderStage::Partial);
        builder.build().unwrap();
        assert_eq!(builder.stage(), BuilderStage::Consumed);
    }

    #[test]
    fn test_consumed_builder_rejects_everything() {
        let mut builder = builder();
        builder.with_ingredient(ingredient("salt", 1, "g")).unwrap();
        builder.build().unwrap();

        assert_eq!(builder.build(), Err(RecipeError::BuilderConsumed));
        assert_eq!(
            builder.with_ingredient(ingredient("pepper", 1, "g")).unwrap_err(),
            RecipeError::BuilderConsumed
        );
    }

    #[test]
    fn test_display_lists_ingredients() {
        let recipe = builder()
            .with_ingredient(ingredient("water", 1, "l"))
            .unwrap()
            .build()
            .unwrap();
        let text = recipe.to_string();
        assert!(text.contains("Recipe #1: title"));
        assert!(text.contains("  - 1 l water"));
        assert!(text.contains("Updated at: 2022-12-01"));
    }
}
