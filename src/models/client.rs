use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde_json::Value;

use crate::domain::client::{
    Client as DomainClient, NewClient as DomainNewClient, Normalized,
    UpdateClient as DomainUpdateClient,
};
use crate::domain::item::Item as DomainItem;
use crate::domain::types::{
    Brand, ClientEmail, ClientId, ClientName, Size, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`] without its items.
pub struct Client {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub brands: String, // JSON array
    pub sizes: String,  // JSON array
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::client_items)]
#[diesel(belongs_to(Client, foreign_key = client_id))]
#[diesel(primary_key(client_id, position))]
/// Row of an item embedded in a client; `position` keeps list order.
pub struct ClientItem {
    pub client_id: i32,
    pub position: i32,
    pub item_id: i64,
    pub name: String,
    pub price: f64,
    pub brand: String,
    pub size: String,
    pub image_url: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub brands: String,
    pub sizes: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Client`] record.
pub struct UpdateClient<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub brands: String,
    pub sizes: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::client_items)]
/// Insertable form of [`ClientItem`].
pub struct NewClientItem<'a> {
    pub client_id: i32,
    pub position: i32,
    pub item_id: i64,
    pub name: &'a str,
    pub price: f64,
    pub brand: &'a str,
    pub size: &'a str,
    pub image_url: &'a str,
}

impl<'a> NewClientItem<'a> {
    pub fn new(client_id: i32, position: i32, item: &'a DomainItem) -> Self {
        Self {
            client_id,
            position,
            item_id: item.id,
            name: item.name.as_str(),
            price: item.price.get(),
            brand: item.brand.as_str(),
            size: item.size.as_str(),
            image_url: item.image_url.as_str(),
        }
    }
}

fn encode_list<'a>(values: impl Iterator<Item = &'a str>) -> String {
    Value::from(values.collect::<Vec<_>>()).to_string()
}

fn decode_list(column: &str, raw: &str) -> Result<Vec<String>, TypeConstraintError> {
    serde_json::from_str(raw)
        .map_err(|e| TypeConstraintError::InvalidValue(format!("{column}: {e}")))
}

impl<'a> From<&'a Normalized<DomainNewClient>> for NewClient<'a> {
    fn from(client: &'a Normalized<DomainNewClient>) -> Self {
        Self {
            name: client.name.as_str(),
            email: client.email.as_str(),
            phone: client.phone.as_deref(),
            address: client.address.as_deref(),
            brands: encode_list(client.brands.iter().map(Brand::as_str)),
            sizes: encode_list(client.sizes.iter().map(Size::as_str)),
        }
    }
}

impl<'a> From<&'a Normalized<DomainUpdateClient>> for UpdateClient<'a> {
    fn from(client: &'a Normalized<DomainUpdateClient>) -> Self {
        Self {
            name: client.name.as_str(),
            email: client.email.as_str(),
            phone: client.phone.as_deref(),
            address: client.address.as_deref(),
            brands: encode_list(client.brands.iter().map(Brand::as_str)),
            sizes: encode_list(client.sizes.iter().map(Size::as_str)),
        }
    }
}

impl TryFrom<ClientItem> for DomainItem {
    type Error = TypeConstraintError;

    fn try_from(item: ClientItem) -> Result<Self, Self::Error> {
        DomainItem::try_new(
            item.item_id,
            item.name,
            item.price,
            item.brand,
            item.size,
            item.image_url,
        )
    }
}

impl TryFrom<(Client, Vec<ClientItem>)> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from((client, mut items): (Client, Vec<ClientItem>)) -> Result<Self, Self::Error> {
        items.sort_by_key(|item| item.position);

        let brands = decode_list("brands", &client.brands)?
            .into_iter()
            .map(Brand::new)
            .collect::<Result<Vec<_>, _>>()?;
        let sizes = decode_list("sizes", &client.sizes)?
            .into_iter()
            .map(Size::new)
            .collect::<Result<Vec<_>, _>>()?;
        let items = items
            .into_iter()
            .map(DomainItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: ClientId::new(client.id)?,
            name: ClientName::new(client.name)?,
            email: ClientEmail::new(client.email)?,
            phone: client.phone,
            address: client.address,
            brands,
            sizes,
            items,
            created_at: client.created_at,
            updated_at: client.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_items() -> Vec<DomainItem> {
        vec![
            DomainItem::try_new(10, "Runner", 120.0, "Nike", "M", "/img/10.png").unwrap(),
            DomainItem::try_new(11, "Trainer", 90.0, "Adidas", "M", "/img/11.png").unwrap(),
        ]
    }

    fn sample_domain_new() -> DomainNewClient {
        DomainNewClient::new(
            ClientName::new("John").unwrap(),
            ClientEmail::new("john@example.com").unwrap(),
            Some("123".to_string()),
            None,
            sample_items(),
        )
    }

    #[test]
    fn from_normalized_new_encodes_summaries() {
        let normalized = sample_domain_new().normalize();
        let new: NewClient = (&normalized).into();
        assert_eq!(new.name, "John");
        assert_eq!(new.email, "john@example.com");
        assert_eq!(new.phone, Some("123"));
        assert_eq!(new.address, None);
        assert_eq!(new.brands, r#"["Nike","Adidas"]"#);
        assert_eq!(new.sizes, r#"["M"]"#);
    }

    #[test]
    fn from_normalized_update_encodes_empty_summaries() {
        let domain = DomainUpdateClient::new(
            ClientName::new("Jane").unwrap(),
            ClientEmail::new("jane@example.com").unwrap(),
            None,
            Some("addr2".to_string()),
            Vec::new(),
        );
        let normalized = domain.normalize();
        let update: UpdateClient = (&normalized).into();
        assert_eq!(update.name, "Jane");
        assert_eq!(update.phone, None);
        assert_eq!(update.address, Some("addr2"));
        assert_eq!(update.brands, "[]");
        assert_eq!(update.sizes, "[]");
    }

    #[test]
    fn new_client_item_borrows_domain_item() {
        let items = sample_items();
        let row = NewClientItem::new(7, 1, &items[1]);
        assert_eq!(row.client_id, 7);
        assert_eq!(row.position, 1);
        assert_eq!(row.item_id, 11);
        assert_eq!(row.brand, "Adidas");
        assert_eq!(row.price, 90.0);
    }

    #[test]
    fn client_with_items_into_domain() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let db_client = Client {
            id: 1,
            name: "n".to_string(),
            email: "e@example.com".to_string(),
            phone: None,
            address: Some("a".to_string()),
            brands: r#"["Nike"]"#.to_string(),
            sizes: r#"["L","M"]"#.to_string(),
            created_at: now,
            updated_at: now,
        };
        let row = |position: i32, size: &str| ClientItem {
            client_id: 1,
            position,
            item_id: i64::from(position) + 100,
            name: format!("Item {position}"),
            price: 5.0,
            brand: "Nike".to_string(),
            size: size.to_string(),
            image_url: "/img.png".to_string(),
        };

        let domain = DomainClient::try_from((db_client, vec![row(1, "M"), row(0, "L")])).unwrap();

        assert_eq!(domain.id.get(), 1);
        assert_eq!(domain.email.as_str(), "e@example.com");
        assert_eq!(domain.brands, vec![Brand::new("Nike").unwrap()]);
        assert_eq!(domain.sizes.len(), 2);
        assert_eq!(domain.items.len(), 2);
        assert_eq!(domain.items[0].id, 100);
        assert_eq!(domain.items[1].size.as_str(), "M");
        assert_eq!(domain.created_at, now);
    }

    #[test]
    fn corrupt_summary_column_is_rejected() {
        let now = Utc::now().naive_utc();
        let db_client = Client {
            id: 1,
            name: "n".to_string(),
            email: "e@example.com".to_string(),
            phone: None,
            address: None,
            brands: "not json".to_string(),
            sizes: "[]".to_string(),
            created_at: now,
            updated_at: now,
        };

        let result = DomainClient::try_from((db_client, Vec::new()));

        assert!(matches!(result, Err(TypeConstraintError::InvalidValue(_))));
    }
}
