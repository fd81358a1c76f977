use serde::{Deserialize, Serialize};

use crate::domain::types::{Brand, ImageUrl, ItemName, Price, Size, TypeConstraintError};

/// Purchased product embedded in a client record.
///
/// Items have no lifecycle of their own: they are created, replaced and
/// deleted together with the owning client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Catalogue identifier of the product.
    pub id: i64,
    pub name: ItemName,
    pub price: Price,
    pub brand: Brand,
    pub size: Size,
    pub image_url: ImageUrl,
}

impl Item {
    /// Builds an item from raw values, validating every field.
    pub fn try_new(
        id: i64,
        name: impl Into<String>,
        price: f64,
        brand: impl Into<String>,
        size: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            id,
            name: ItemName::new(name)?,
            price: Price::new(price)?,
            brand: Brand::new(brand)?,
            size: Size::new(size)?,
            image_url: ImageUrl::new(image_url)?,
        })
    }
}
