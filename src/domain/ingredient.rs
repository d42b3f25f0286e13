use std::fmt;

use serde::Serialize;

use crate::domain::values::{Name, Quantity, Unit};

/// One line of a recipe's ingredient list.
///
/// Serialises to the wire shape `{"name", "quantity", "unit"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Ingredient {
    name: Name,
    quantity: Quantity,
    unit: Unit,
}

impl Ingredient {
    pub fn new(name: Name, quantity: Quantity, unit: Unit) -> Self {
        Self {
            name,
            quantity,
            unit,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.quantity, self.unit, self.name)
    }
}
