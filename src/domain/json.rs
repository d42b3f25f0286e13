//! Mapping between the service's wire JSON and the domain types.
//!
//! Incoming payloads are read field by field so that a missing key, a value of
//! the wrong JSON type and a value rejected by a value type each surface as a
//! distinct [`JsonError`]. Nothing is coerced: `"1"` is not a quantity.

use chrono::NaiveDate;
use serde_json::{json, Map, Value};

use crate::domain::error::JsonError;
use crate::domain::ingredient::Ingredient;
use crate::domain::recipe::{Recipe, DATE_FORMAT};
use crate::domain::values::{Description, Id, Name, Quantity, Title, Unit, Username};

type Object = Map<String, Value>;

fn as_object<'a>(value: &'a Value, what: &'static str) -> Result<&'a Object, JsonError> {
    value.as_object().ok_or(JsonError::WrongType {
        field: what,
        expected: "an object",
    })
}

fn required<'a>(obj: &'a Object, field: &'static str) -> Result<&'a Value, JsonError> {
    obj.get(field).ok_or(JsonError::MissingField(field))
}

fn string_field<'a>(obj: &'a Object, field: &'static str) -> Result<&'a str, JsonError> {
    required(obj, field)?.as_str().ok_or(JsonError::WrongType {
        field,
        expected: "a string",
    })
}

fn integer_field(obj: &Object, field: &'static str) -> Result<i64, JsonError> {
    required(obj, field)?.as_i64().ok_or(JsonError::WrongType {
        field,
        expected: "an integer",
    })
}

/// Parses `YYYY-MM-DD` and nothing else (no time part, no unpadded fields).
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, JsonError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .filter(|date| date.format(DATE_FORMAT).to_string() == value)
        .ok_or_else(|| JsonError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

fn date_field(obj: &Object, field: &'static str) -> Result<NaiveDate, JsonError> {
    parse_date(field, string_field(obj, field)?)
}

fn optional_date_field(obj: &Object, field: &'static str) -> Result<Option<NaiveDate>, JsonError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => date_field(obj, field).map(Some),
    }
}

/// Builds an [`Ingredient`] from `{"name": str, "quantity": int, "unit": str}`.
pub fn ingredient_from_json(value: &Value) -> Result<Ingredient, JsonError> {
    let obj = as_object(value, "ingredient")?;
    let name = Name::new(string_field(obj, "name")?)?;
    let quantity = Quantity::new(integer_field(obj, "quantity")?)?;
    let unit = Unit::new(string_field(obj, "unit")?)?;
    Ok(Ingredient::new(name, quantity, unit))
}

/// Builds a [`Recipe`] from the service's recipe object.
///
/// `updated_at` may be absent or `null`. An empty ingredient list fails with
/// the builder's "at least one ingredient" error.
pub fn recipe_from_json(value: &Value) -> Result<Recipe, JsonError> {
    let obj = as_object(value, "recipe")?;

    let id = Id::new(integer_field(obj, "id")?)?;
    let title = Title::new(string_field(obj, "title")?)?;
    let author = Username::new(string_field(obj, "author")?)?;
    let description = Description::new(string_field(obj, "description")?)?;
    let created_at = date_field(obj, "created_at")?;
    let updated_at = optional_date_field(obj, "updated_at")?;
    let ingredients = required(obj, "ingredients")?
        .as_array()
        .ok_or(JsonError::WrongType {
            field: "ingredients",
            expected: "a list",
        })?;

    let mut builder = Recipe::builder(id, title, author, description, created_at, updated_at);
    for ingredient in ingredients {
        builder.with_ingredient(ingredient_from_json(ingredient)?)?;
    }
    Ok(builder.build()?)
}

/// Accepts either a list of recipe objects or a single one.
pub fn recipes_from_json(value: &Value) -> Result<Vec<Recipe>, JsonError> {
    match value {
        Value::Array(items) => items.iter().map(recipe_from_json).collect(),
        other => recipe_from_json(other).map(|recipe| vec![recipe]),
    }
}

pub fn ingredient_to_json(ingredient: &Ingredient) -> Value {
    json!({
        "name": ingredient.name().value(),
        "quantity": ingredient.quantity().value(),
        "unit": ingredient.unit().value(),
    })
}

/// Inverse of [`recipe_from_json`]. `updated_at` is written only when the
/// recipe has one, so an incoming `"updated_at": null` comes back without the key.
pub fn recipe_to_json(recipe: &Recipe) -> Value {
    let mut obj = json!({
        "id": recipe.id().value(),
        "title": recipe.title().value(),
        "author": recipe.author().value(),
        "description": recipe.description().value(),
        "created_at": recipe.created_at().format(DATE_FORMAT).to_string(),
        "ingredients": recipe.ingredients().iter().map(ingredient_to_json).collect::<Vec<_>>(),
    });
    if let (Some(updated_at), Some(map)) = (recipe.updated_at(), obj.as_object_mut()) {
        map.insert(
            "updated_at".to_string(),
            Value::String(updated_at.format(DATE_FORMAT).to_string()),
        );
    }
    obj
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{Constraint, RecipeError};
    use pretty_assertions::assert_eq;

    fn recipe_json() -> Value {
        json!({
            "id": 1,
            "title": "title",
            "author": "author",
            "description": "description1",
            "ingredients": [{"name": "ingredient", "quantity": 1, "unit": "n/a"}],
            "created_at": "2022-12-01",
            "updated_at": "2022-12-01",
        })
    }

    fn without(mut value: Value, key: &str) -> Value {
        value.as_object_mut().unwrap().remove(key);
        value
    }

    #[test]
    fn test_ingredient_from_json() {
        let ingredient =
            ingredient_from_json(&json!({"name": "water", "quantity": 1, "unit": "l"})).unwrap();
        assert_eq!(ingredient.name().value(), "water");
        assert_eq!(ingredient.quantity().value(), 1);
        assert_eq!(ingredient.unit().value(), "l");
    }

    #[test]
    fn test_ingredient_quantity_as_string_is_a_type_error() {
        let error =
            ingredient_from_json(&json!({"name": "water", "quantity": "1", "unit": "l"}))
                .unwrap_err();
        assert_eq!(
            error,
            JsonError::WrongType {
                field: "quantity",
                expected: "an integer"
            }
        );
    }

    #[test]
    fn test_ingredient_float_quantity_is_a_type_error() {
        let error =
            ingredient_from_json(&json!({"name": "water", "quantity": 1.5, "unit": "l"}))
                .unwrap_err();
        assert!(matches!(error, JsonError::WrongType { field: "quantity", .. }));
    }

    #[test]
    fn test_ingredient_validation_failure_propagates() {
        let error =
            ingredient_from_json(&json!({"name": "water", "quantity": 1, "unit": "kilograms"}))
                .unwrap_err();
        match error {
            JsonError::Validation(e) => {
                assert_eq!(e.field(), "unit");
                assert_eq!(e.constraint(), Constraint::Membership);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_recipe_from_json() {
        let recipe = recipe_from_json(&recipe_json()).unwrap();
        assert_eq!(recipe.title().value(), "title");
        assert_eq!(recipe.description().value(), "description1");
        assert_eq!(recipe.ingredients().len(), 1);
        assert_eq!(
            recipe.updated_at(),
            NaiveDate::from_ymd_opt(2022, 12, 1)
        );
    }

    #[test]
    fn test_recipe_missing_required_fields() {
        for key in ["id", "title", "author", "description", "created_at", "ingredients"] {
            let error = recipe_from_json(&without(recipe_json(), key)).unwrap_err();
            assert_eq!(error, JsonError::MissingField(key), "removing {key}");
        }
    }

    #[test]
    fn test_recipe_without_updated_at_was_never_updated() {
        let recipe = recipe_from_json(&without(recipe_json(), "updated_at")).unwrap();
        assert_eq!(recipe.updated_at(), None);

        let mut value = recipe_json();
        value["updated_at"] = Value::Null;
        assert_eq!(recipe_from_json(&value).unwrap().updated_at(), None);
    }

    #[test]
    fn test_recipe_with_empty_ingredients_fails_in_builder() {
        let mut value = recipe_json();
        value["ingredients"] = json!([]);
        assert_eq!(
            recipe_from_json(&value).unwrap_err(),
            JsonError::Recipe(RecipeError::NoIngredients)
        );
    }

    #[test]
    fn test_recipe_with_duplicate_ingredients_fails() {
        let mut value = recipe_json();
        value["ingredients"] = json!([
            {"name": "salt", "quantity": 1, "unit": "g"},
            {"name": "salt", "quantity": 2, "unit": "kg"},
        ]);
        assert_eq!(
            recipe_from_json(&value).unwrap_err(),
            JsonError::Recipe(RecipeError::DuplicateIngredient("salt".to_string()))
        );
    }

    #[test]
    fn test_recipe_dates_are_strict() {
        for date in ["2022-12-01T15:15:12.376396Z", "01/12/2022", "2022-1-1", "2022-13-01"] {
            let mut value = recipe_json();
            value["created_at"] = json!(date);
            assert!(
                matches!(recipe_from_json(&value), Err(JsonError::InvalidDate { field: "created_at", .. })),
                "accepted {date}"
            );
        }
    }

    #[test]
    fn test_negative_id_is_rejected() {
        let mut value = recipe_json();
        value["id"] = json!(-1);
        assert!(matches!(recipe_from_json(&value), Err(JsonError::Validation(_))));
    }

    #[test]
    fn test_round_trip() {
        let value = recipe_json();
        assert_eq!(recipe_to_json(&recipe_from_json(&value).unwrap()), value);

        let value = without(recipe_json(), "updated_at");
        assert_eq!(recipe_to_json(&recipe_from_json(&value).unwrap()), value);
    }

    #[test]
    fn test_round_trip_of_null_updated_at_drops_the_key() {
        let mut value = recipe_json();
        value["updated_at"] = Value::Null;

        let recipe = recipe_from_json(&value).unwrap();
        let out = recipe_to_json(&recipe);
        assert_eq!(out, without(recipe_json(), "updated_at"));
        assert_eq!(recipe_from_json(&out).unwrap(), recipe);
    }

    #[test]
    fn test_recipes_from_json_accepts_list_or_single() {
        let list = json!([recipe_json(), recipe_json()]);
        assert_eq!(recipes_from_json(&list).unwrap().len(), 2);
        assert_eq!(recipes_from_json(&recipe_json()).unwrap().len(), 1);
        assert!(recipes_from_json(&json!({"detail": "testing"})).is_err());
    }
}
