use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::{ClientEmail, ClientId};
use crate::forms::client::{ClientForm, ClientPayload};
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult};

fn validate_form(form: ClientForm) -> ServiceResult<ClientPayload> {
    ClientPayload::try_from(form).map_err(|err| {
        log::error!("Failed to validate client form: {err}");
        ServiceError::from(err)
    })
}

/// Validates the form and stores a new client with its items.
pub fn create_client<R>(repo: &R, form: ClientForm) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    let new_client = NewClient::from(validate_form(form)?);

    let client = repo.create_client(&new_client).map_err(|err| {
        log::error!("Failed to create client {}: {err}", new_client.email);
        ServiceError::from(err)
    })?;

    log::info!(
        "Created client {} with {} item(s)",
        client.id,
        client.items.len()
    );
    Ok(client)
}

/// Replaces the stored state of a client, items included.
pub fn update_client<R>(repo: &R, client_id: ClientId, form: ClientForm) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    let updates = UpdateClient::from(validate_form(form)?);

    let client = repo.update_client(client_id, &updates).map_err(|err| {
        log::error!("Failed to update client {client_id}: {err}");
        ServiceError::from(err)
    })?;

    log::info!("Updated client {client_id}");
    Ok(client)
}

/// Fetches a client, failing with [`ServiceError::NotFound`] when absent.
pub fn get_client<R>(repo: &R, client_id: ClientId) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    repo.get_client_by_id(client_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

pub fn find_client_by_email<R>(repo: &R, email: &str) -> ServiceResult<Option<Client>>
where
    R: ClientReader + ?Sized,
{
    let email = ClientEmail::new(email)?;
    repo.get_client_by_email(&email).map_err(ServiceError::from)
}

/// Removes a client together with its items.
pub fn delete_client<R>(repo: &R, client_id: ClientId) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    repo.delete_client(client_id).map_err(|err| {
        log::error!("Failed to delete client {client_id}: {err}");
        ServiceError::from(err)
    })?;

    log::info!("Deleted client {client_id}");
    Ok(())
}
