use std::collections::HashSet;
use std::ops::Deref;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::item::Item;
use crate::domain::types::{Brand, ClientEmail, ClientId, ClientName, Size, trimmed_optional};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: ClientName,
    pub email: ClientEmail,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Distinct brands of `items`, maintained by the store.
    pub brands: Vec<Brand>,
    /// Distinct sizes of `items`, maintained by the store.
    pub sizes: Vec<Size>,
    pub items: Vec<Item>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload for creating a client.
///
/// `brands` and `sizes` are accepted for shape compatibility only; they are
/// overwritten from `items` before the record is written.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub name: ClientName,
    pub email: ClientEmail,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub brands: Vec<Brand>,
    #[serde(default)]
    pub sizes: Vec<Size>,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl NewClient {
    #[must_use]
    pub fn new(
        name: ClientName,
        email: ClientEmail,
        phone: Option<String>,
        address: Option<String>,
        items: Vec<Item>,
    ) -> Self {
        Self {
            name,
            email,
            phone: trimmed_optional(phone),
            address: trimmed_optional(address),
            brands: Vec::new(),
            sizes: Vec::new(),
            items,
        }
    }

    /// Trims contact fields and recomputes the derived summaries ahead of
    /// persistence.
    pub(crate) fn normalize(mut self) -> Normalized<Self> {
        self.phone = trimmed_optional(self.phone);
        self.address = trimmed_optional(self.address);
        let summary = ItemSummary::from_items(&self.items);
        self.brands = summary.brands;
        self.sizes = summary.sizes;
        Normalized(self)
    }
}

/// Full replacement of a stored client's state, items included.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClient {
    pub name: ClientName,
    pub email: ClientEmail,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub brands: Vec<Brand>,
    #[serde(default)]
    pub sizes: Vec<Size>,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl UpdateClient {
    #[must_use]
    pub fn new(
        name: ClientName,
        email: ClientEmail,
        phone: Option<String>,
        address: Option<String>,
        items: Vec<Item>,
    ) -> Self {
        Self {
            name,
            email,
            phone: trimmed_optional(phone),
            address: trimmed_optional(address),
            brands: Vec::new(),
            sizes: Vec::new(),
            items,
        }
    }

    /// Trims contact fields and recomputes the derived summaries ahead of
    /// persistence.
    pub(crate) fn normalize(mut self) -> Normalized<Self> {
        self.phone = trimmed_optional(self.phone);
        self.address = trimmed_optional(self.address);
        let summary = ItemSummary::from_items(&self.items);
        self.brands = summary.brands;
        self.sizes = summary.sizes;
        Normalized(self)
    }
}

impl From<Client> for UpdateClient {
    fn from(client: Client) -> Self {
        Self {
            name: client.name,
            email: client.email,
            phone: client.phone,
            address: client.address,
            brands: client.brands,
            sizes: client.sizes,
            items: client.items,
        }
    }
}

/// Distinct brand and size values carried by a list of items.
///
/// Values keep the order of their first occurrence; matching is exact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemSummary {
    pub brands: Vec<Brand>,
    pub sizes: Vec<Size>,
}

impl ItemSummary {
    pub fn from_items(items: &[Item]) -> Self {
        let mut seen_brands = HashSet::with_capacity(items.len());
        let mut seen_sizes = HashSet::with_capacity(items.len());
        let mut summary = Self::default();

        for item in items {
            if seen_brands.insert(&item.brand) {
                summary.brands.push(item.brand.clone());
            }
            if seen_sizes.insert(&item.size) {
                summary.sizes.push(item.size.clone());
            }
        }

        summary
    }
}

/// A client payload whose derived fields have been recomputed.
///
/// Only the normalizer can produce this wrapper, and the storage models only
/// accept it, so every write carries fresh `brands` and `sizes`.
#[derive(Clone, Debug, PartialEq)]
pub struct Normalized<T>(T);

impl<T> Normalized<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Normalized<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
