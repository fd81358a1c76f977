//! Diesel implementation of the client ports.
//!
//! A client row and its item rows are always written in one transaction, so a
//! rejected write never leaves items and derived summaries out of step.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::item::Item;
use crate::domain::types::{ClientEmail, ClientId};
use crate::models::client::{
    Client as DbClient, ClientItem as DbClientItem, NewClient as DbNewClient,
    NewClientItem as DbNewClientItem, UpdateClient as DbUpdateClient,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientReader, ClientWriter, DieselRepository};
use crate::schema::{client_items, clients};

/// Loads the items of a client row and assembles the domain aggregate.
fn load_client(conn: &mut SqliteConnection, db_client: DbClient) -> RepositoryResult<Client> {
    let items = DbClientItem::belonging_to(&db_client)
        .select(DbClientItem::as_select())
        .order(client_items::position.asc())
        .load::<DbClientItem>(conn)?;

    Ok(Client::try_from((db_client, items))?)
}

/// Item rows per `INSERT`; each row binds eight parameters and SQLite caps the
/// number of bound parameters in a single statement.
const ITEM_INSERT_BATCH: usize = 1000;

fn insert_items(conn: &mut SqliteConnection, client_id: i32, items: &[Item]) -> RepositoryResult<()> {
    let rows = items
        .iter()
        .enumerate()
        .map(|(position, item)| {
            let position = i32::try_from(position).map_err(|_| {
                RepositoryError::ValidationError("too many items for one client".to_string())
            })?;
            Ok(DbNewClientItem::new(client_id, position, item))
        })
        .collect::<RepositoryResult<Vec<_>>>()?;

    for batch in rows.chunks(ITEM_INSERT_BATCH) {
        diesel::insert_into(client_items::table)
            .values(batch)
            .execute(conn)?;
    }
    Ok(())
}

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        let mut conn = self.conn()?;
        let db_client = clients::table
            .find(id.get())
            .select(DbClient::as_select())
            .first(&mut conn)
            .optional()?;

        db_client
            .map(|db_client| load_client(&mut conn, db_client))
            .transpose()
    }

    fn get_client_by_email(&self, email: &ClientEmail) -> RepositoryResult<Option<Client>> {
        let mut conn = self.conn()?;
        let db_client = clients::table
            .filter(clients::email.eq(email.as_str()))
            .select(DbClient::as_select())
            .first(&mut conn)
            .optional()?;

        db_client
            .map(|db_client| load_client(&mut conn, db_client))
            .transpose()
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        let normalized = new_client.clone().normalize();
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_client = diesel::insert_into(clients::table)
                .values(DbNewClient::from(&normalized))
                .returning(DbClient::as_returning())
                .get_result(conn)?;

            insert_items(conn, db_client.id, &normalized.items)?;
            load_client(conn, db_client)
        })
    }

    fn update_client(
        &self,
        client_id: ClientId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client> {
        let normalized = updates.clone().normalize();
        let changeset = DbUpdateClient::from(&normalized);
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_client = diesel::update(clients::table.find(client_id.get()))
                .set((&changeset, clients::updated_at.eq(diesel::dsl::now)))
                .returning(DbClient::as_returning())
                .get_result(conn)?;

            // Items are replaced as a whole list.
            diesel::delete(client_items::table.filter(client_items::client_id.eq(db_client.id)))
                .execute(conn)?;
            insert_items(conn, db_client.id, &normalized.items)?;
            load_client(conn, db_client)
        })
    }

    fn delete_client(&self, client_id: ClientId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(client_items::table.filter(client_items::client_id.eq(client_id.get())))
                .execute(conn)?;
            let deleted = diesel::delete(clients::table.find(client_id.get())).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        })
    }
}
