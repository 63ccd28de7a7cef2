use super::EndpointError;
use crate::{endpoints::VehicleType, Id};
use reqwest::{Client, Method};
use serde_derive::{Deserialize, Serialize};

/// List every document requirement, across all vehicle types.
pub async fn get_document_settings(
    client: &Client,
    hostname: &str,
    token: &str,
) -> Result<Vec<DocumentSetting>, EndpointError> {
    let response = super::send::<()>(
        client,
        hostname,
        Method::GET,
        "admin/vehicle-document-settings",
        Some(token),
        &[],
        None,
    )
    .await?;

    let body = response.text().await?;
    log::trace!("Response: {}", body);

    super::parse(&body)
}

/// List the document requirements for one vehicle type, by its name.
pub async fn get_document_settings_for_vehicle_type(
    client: &Client,
    hostname: &str,
    token: &str,
    vehicle_type_name: &str,
) -> Result<Vec<DocumentSetting>, EndpointError> {
    let path = format!(
        "admin/vehicle-document-settings/vehicle-type/{}",
        vehicle_type_name
    );
    let response = super::send::<()>(
        client,
        hostname,
        Method::GET,
        &path,
        Some(token),
        &[],
        None,
    )
    .await?;

    let body = response.text().await?;
    log::trace!("Response: {}", body);

    super::parse(&body)
}

pub async fn get_document_setting(
    client: &Client,
    hostname: &str,
    token: &str,
    id: &Id,
) -> Result<DocumentSetting, EndpointError> {
    let path = format!("admin/vehicle-document-settings/{}", id);
    let response = super::send::<()>(
        client,
        hostname,
        Method::GET,
        &path,
        Some(token),
        &[],
        None,
    )
    .await?;

    let body = response.text().await?;
    log::trace!("Response: {}", body);

    super::parse(&body)
}

pub async fn create_document_setting(
    client: &Client,
    hostname: &str,
    token: &str,
    fields: &DocumentSettingFields,
) -> Result<DocumentSetting, EndpointError> {
    let response = super::send(
        client,
        hostname,
        Method::POST,
        "admin/vehicle-document-settings",
        Some(token),
        &[],
        Some(fields),
    )
    .await?;

    let body = response.text().await?;
    log::trace!("Response: {}", body);

    super::parse(&body)
}

/// Apply a partial update; `None` fields are left as they are.
pub async fn update_document_setting(
    client: &Client,
    hostname: &str,
    token: &str,
    id: &Id,
    update: &DocumentSettingUpdate,
) -> Result<DocumentSetting, EndpointError> {
    let path = format!("admin/vehicle-document-settings/{}", id);
    let response = super::send(
        client,
        hostname,
        Method::PATCH,
        &path,
        Some(token),
        &[],
        Some(update),
    )
    .await?;

    let body = response.text().await?;
    log::trace!("Response: {}", body);

    super::parse(&body)
}

pub async fn delete_document_setting(
    client: &Client,
    hostname: &str,
    token: &str,
    id: &Id,
) -> Result<(), EndpointError> {
    let path = format!("admin/vehicle-document-settings/{}", id);
    let response = super::send::<()>(
        client,
        hostname,
        Method::DELETE,
        &path,
        Some(token),
        &[],
        None,
    )
    .await?;

    let body = response.text().await?;
    log::trace!("Response: {}", body);

    super::parse_ack(&body)
}

/// Which document riders must upload for a given vehicle type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct DocumentSetting {
    pub id: Id,
    pub vehicle_type_id: Id,
    pub vehicle_type: VehicleType,
    pub doc_name: String,
    pub requires_expiration: bool,
    pub is_required: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// The writable fields of a document requirement, for creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSettingFields {
    pub vehicle_type_id: Id,
    pub doc_name: String,
    pub requires_expiration: bool,
    pub is_required: bool,
}

/// A partial update. `None` fields are not sent at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSettingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_expiration: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
}
