use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::item::Item;
use crate::domain::types::{ClientEmail, ClientName};
use crate::forms::FormError;

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed("is required")));
    }
    Ok(())
}

fn validate_email(value: &str) -> Result<(), ValidationError> {
    ClientEmail::new(value).map(|_| ()).map_err(|_| {
        ValidationError::new("email").with_message(Cow::Borrowed("Please enter a valid email"))
    })
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Client record as submitted by a caller.
///
/// Derived `brands`/`sizes` are not part of the form; if a caller sends them
/// they are ignored.
pub struct ClientForm {
    #[validate(custom(function = validate_not_blank))]
    pub name: String,
    #[validate(custom(function = validate_email))]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<ItemForm>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// A purchased product inside a [`ClientForm`].
pub struct ItemForm {
    pub id: i64,
    #[validate(custom(function = validate_not_blank))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(custom(function = validate_not_blank))]
    pub brand: String,
    #[validate(custom(function = validate_not_blank))]
    pub size: String,
    #[validate(custom(function = validate_not_blank))]
    pub image_url: String,
}

/// Validated, strongly typed content of a [`ClientForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientPayload {
    pub name: ClientName,
    pub email: ClientEmail,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub items: Vec<Item>,
}

impl TryFrom<ItemForm> for Item {
    type Error = FormError;

    fn try_from(form: ItemForm) -> Result<Self, Self::Error> {
        Ok(Item::try_new(
            form.id,
            form.name,
            form.price,
            form.brand,
            form.size,
            form.image_url,
        )?)
    }
}

impl TryFrom<ClientForm> for ClientPayload {
    type Error = FormError;

    fn try_from(form: ClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let items = form
            .items
            .into_iter()
            .map(Item::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: ClientName::new(form.name)?,
            email: ClientEmail::new(form.email)?,
            phone: form.phone,
            address: form.address,
            items,
        })
    }
}

impl From<ClientPayload> for NewClient {
    fn from(payload: ClientPayload) -> Self {
        NewClient::new(
            payload.name,
            payload.email,
            payload.phone,
            payload.address,
            payload.items,
        )
    }
}

impl From<ClientPayload> for UpdateClient {
    fn from(payload: ClientPayload) -> Self {
        UpdateClient::new(
            payload.name,
            payload.email,
            payload.phone,
            payload.address,
            payload.items,
        )
    }
}
