//! Validated value types.
//!
//! Every type here wraps a single primitive and can only be obtained through a
//! constructor that checks its length/charset, range or membership rule. Once
//! built, a value never changes, so holding one is proof that it is valid.
//!
//! All of them serialise as their bare primitive, which is the shape the remote
//! service expects in request bodies.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::{Constraint, ValidationError};

static TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z ]+$").expect("Invalid title regex pattern"));
static DESCRIPTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9 '!;.,\n]+$").expect("Invalid description regex pattern")
});
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-ZÀ-ÖØ-öø-ÿ ]+$").expect("Invalid name regex pattern"));
static USERNAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_\-.]+$").expect("Invalid username regex pattern")
});
static PASSWORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_\-@#*.!?$^=+]+$").expect("Invalid password regex pattern")
});
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9\-]+(\.[a-zA-Z0-9\-]+)*\.[a-zA-Z]{2,}$")
        .expect("Invalid email regex pattern")
});

/// Units accepted by the remote service.
pub const UNITS: [&str; 7] = ["kg", "g", "l", "cl", "ml", "cup", "n/a"];

/// Checks the character count first, then the charset.
fn check_text(
    field: &'static str,
    value: &str,
    min_len: usize,
    max_len: usize,
    pattern: &Regex,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min_len || len > max_len {
        return Err(ValidationError::new(field, Constraint::Length));
    }
    if !pattern.is_match(value) {
        return Err(ValidationError::new(field, Constraint::Pattern));
    }
    Ok(())
}

/// Generates the shared surface of a string value type: constructor, accessor,
/// `Display`, `FromStr`, `TryFrom<String>` and transparent serde.
macro_rules! text_value {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal, len = $min:literal..=$max:literal, pattern = $pattern:ident,
        derive($($derive:ident),*)
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize $(, $derive)*)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                check_text($field, &value, $min, $max, &$pattern)?;
                Ok(Self(value))
            }

            pub fn value(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

text_value! {
    /// Recipe title: 1-30 ASCII letters and spaces.
    #[derive(Debug)]
    Title, field = "title", len = 1..=30, pattern = TITLE_PATTERN, derive(PartialOrd, Ord)
}

text_value! {
    /// Recipe description: 1-500 characters of letters, digits, spaces,
    /// newlines and `'!;.,`.
    #[derive(Debug)]
    Description, field = "description", len = 1..=500, pattern = DESCRIPTION_PATTERN, derive(PartialOrd, Ord)
}

text_value! {
    /// Ingredient name: 1-30 letters (accented Latin letters included) and spaces.
    #[derive(Debug)]
    Name, field = "name", len = 1..=30, pattern = NAME_PATTERN, derive(PartialOrd, Ord)
}

text_value! {
    /// Account name, also used as the recipe author: 4-30 characters of
    /// letters, digits and `_-.`.
    #[derive(Debug)]
    Username, field = "username", len = 4..=30, pattern = USERNAME_PATTERN, derive(PartialOrd, Ord)
}

text_value! {
    /// Account password: 8-30 characters of letters, digits and `_-@#*.!?$^=+`.
    ///
    /// `Debug` is redacted.
    Password, field = "password", len = 8..=30, pattern = PASSWORD_PATTERN, derive(PartialOrd, Ord)
}

text_value! {
    /// Email address: 8-30 ASCII characters shaped like `local@domain.tld`.
    #[derive(Debug)]
    Email, field = "email", len = 8..=30, pattern = EMAIL_PATTERN, derive()
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(********)")
    }
}

/// Measurement unit, restricted to [`UNITS`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Unit(String);

impl Unit {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !UNITS.contains(&value.as_str()) {
            return Err(ValidationError::new("unit", Constraint::Membership));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Unit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Unit {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Unit> for String {
    fn from(value: Unit) -> Self {
        value.0
    }
}

/// Server-assigned recipe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct Id(u64);

impl Id {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| ValidationError::new("id", Constraint::Range))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for Id {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Id> for u64 {
    fn from(value: Id) -> Self {
        value.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Id {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::new("id", Constraint::Pattern))?;
        Self::new(value)
    }
}

/// Ingredient amount in `1..=1000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 1000;

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        match u32::try_from(value) {
            Ok(v) if (Self::MIN..=Self::MAX).contains(&v) => Ok(Self(v)),
            _ => Err(ValidationError::new("quantity", Constraint::Range)),
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Quantity {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Quantity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::new("quantity", Constraint::Pattern))?;
        Self::new(value)
    }
}
