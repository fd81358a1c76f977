//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce the per-field rules of a client record (trimmed,
//! non-empty strings, normalized email, non-negative price) so that once a
//! value reaches the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Accepted email shape: non-space characters, `@`, non-space, `.`, non-space.
pub static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is a valid regex"));

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("Please enter a valid email")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided price was negative or not a finite number.
    #[error("price must be a non-negative number")]
    InvalidPrice,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if EMAIL_PATTERN.is_match(&normalized) {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Trims an optional free-form value, dropping it when nothing is left.
pub fn trimmed_optional<S: AsRef<str>>(value: Option<S>) -> Option<String> {
    value
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Unique identifier for a stored client.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "i32", into = "i32")]
pub struct ClientId(i32);

impl ClientId {
    /// Creates a new identifier ensuring it is greater than zero.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveId)
        }
    }

    /// Returns the raw `i32` backing this identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for ClientId {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClientId> for i32 {
    fn from(value: ClientId) -> Self {
        value.0
    }
}

/// Lower-cased, trimmed and validated client email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ClientEmail(String);

impl ClientEmail {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ClientEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ClientEmail {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ClientEmail {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClientEmail> for String {
    fn from(value: ClientEmail) -> Self {
        value.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = value.into().trim().to_string();
                if trimmed.is_empty() {
                    return Err(TypeConstraintError::EmptyString);
                }
                Ok(Self(trimmed))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
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

non_empty_string_newtype!(
    ClientName,
    "Customer name wrapper enforcing trimmed, non-empty values."
);

non_empty_string_newtype!(
    ItemName,
    "Purchased product name enforcing trimmed, non-empty values."
);

non_empty_string_newtype!(Brand, "Product brand label, compared by exact value.");

non_empty_string_newtype!(Size, "Product size label, compared by exact value.");

non_empty_string_newtype!(
    ImageUrl,
    "Product image location enforcing trimmed, non-empty values."
);

/// Non-negative, finite product price.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    /// Rejects negative, `NaN` and infinite amounts.
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidPrice)
        }
    }

    /// Returns the raw amount.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Price {
    type Error = TypeConstraintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_email_is_trimmed_and_lowercased() {
        let email = ClientEmail::new("  Jane.Doe@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "jane.doe@example.com");
    }

    #[test]
    fn client_email_requires_at_and_dot() {
        assert_eq!(
            ClientEmail::new("jane.example.com"),
            Err(TypeConstraintError::InvalidEmail)
        );
        assert_eq!(
            ClientEmail::new("jane@localhost"),
            Err(TypeConstraintError::InvalidEmail)
        );
        assert_eq!(
            ClientEmail::new("ja ne@example.com"),
            Err(TypeConstraintError::InvalidEmail)
        );
        assert_eq!(ClientEmail::new(""), Err(TypeConstraintError::InvalidEmail));
    }

    #[test]
    fn non_empty_strings_are_trimmed() {
        assert_eq!(Brand::new("  Nike ").unwrap().as_str(), "Nike");
        assert_eq!(Size::new("   "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn brand_comparison_is_case_sensitive() {
        assert_ne!(Brand::new("Nike").unwrap(), Brand::new("nike").unwrap());
    }

    #[test]
    fn price_rejects_negative_and_nan() {
        assert!(Price::new(0.0).is_ok());
        assert_eq!(Price::new(19.99).unwrap().get(), 19.99);
        assert_eq!(Price::new(-0.01), Err(TypeConstraintError::InvalidPrice));
        assert_eq!(Price::new(f64::NAN), Err(TypeConstraintError::InvalidPrice));
        assert_eq!(
            Price::new(f64::INFINITY),
            Err(TypeConstraintError::InvalidPrice)
        );
    }

    #[test]
    fn client_id_must_be_positive() {
        assert_eq!(ClientId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(ClientId::new(3).unwrap().get(), 3);
    }

    #[test]
    fn deserialization_applies_constraints() {
        let email: ClientEmail = serde_json::from_str(r#"" Bob@Example.com""#).unwrap();
        assert_eq!(email.as_str(), "bob@example.com");
        assert!(serde_json::from_str::<ClientEmail>(r#""bob""#).is_err());
        assert!(serde_json::from_str::<Brand>(r#""  ""#).is_err());
        assert!(serde_json::from_str::<Price>("-1.5").is_err());
        assert_eq!(serde_json::to_string(&Size::new("M").unwrap()).unwrap(), r#""M""#);
    }

    #[test]
    fn trimmed_optional_drops_blank_values() {
        assert_eq!(trimmed_optional(Some("  ")), None);
        assert_eq!(trimmed_optional(Some(" 555 ")), Some("555".to_string()));
        assert_eq!(trimmed_optional::<&str>(None), None);
    }
}
