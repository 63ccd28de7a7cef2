use super::EndpointError;
use crate::Id;
use reqwest::{Client, Method};
use serde_derive::{Deserialize, Serialize};

/// List the vehicle types riders can register with.
///
/// Deleting a vehicle type only deactivates it; pass
/// `include_inactive = Some(true)` to see the deactivated ones too.
pub async fn get_vehicle_types(
    client: &Client,
    hostname: &str,
    token: &str,
    include_inactive: Option<bool>,
) -> Result<Vec<VehicleType>, EndpointError> {
    let mut query = Vec::new();
    if let Some(include_inactive) = include_inactive {
        query.push(("includeInactive", include_inactive.to_string()));
    }

    let response = super::send::<()>(
        client,
        hostname,
        Method::GET,
        "vehicle-types",
        Some(token),
        &query,
        None,
    )
    .await?;

    let body = response.text().await?;
    log::trace!("Response: {}", body);

    super::parse(&body)
}

pub async fn get_vehicle_type(
    client: &Client,
    hostname: &str,
    token: &str,
    id: &Id,
) -> Result<VehicleType, EndpointError> {
    let path = format!("vehicle-types/{}", id);
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

pub async fn create_vehicle_type(
    client: &Client,
    hostname: &str,
    token: &str,
    fields: &VehicleTypeFields,
) -> Result<VehicleType, EndpointError> {
    let response = super::send(
        client,
        hostname,
        Method::POST,
        "vehicle-types",
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
pub async fn update_vehicle_type(
    client: &Client,
    hostname: &str,
    token: &str,
    id: &Id,
    update: &VehicleTypeUpdate,
) -> Result<VehicleType, EndpointError> {
    let path = format!("vehicle-types/{}", id);
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

/// Soft-delete a vehicle type. Riders already registered with it keep it;
/// it just stops being offered. Undo with [`restore_vehicle_type()`].
pub async fn delete_vehicle_type(
    client: &Client,
    hostname: &str,
    token: &str,
    id: &Id,
) -> Result<(), EndpointError> {
    let path = format!("vehicle-types/{}", id);
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

/// Bring back a soft-deleted vehicle type.
pub async fn restore_vehicle_type(
    client: &Client,
    hostname: &str,
    token: &str,
    id: &Id,
) -> Result<(), EndpointError> {
    let path = format!("vehicle-types/{}/restore", id);
    let response = super::send::<()>(
        client,
        hostname,
        Method::POST,
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

/// A class of delivery vehicle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct VehicleType {
    pub id: Id,
    pub name: String,
    pub display_name: Option<String>,
    pub description: String,
    pub base_fee: f64,
    pub max_weight: Option<f64>,
    pub is_active: bool,
    pub deleted_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// The writable fields of a vehicle type, for creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleTypeFields {
    pub name: String,
    pub description: String,
    pub base_fee: f64,
    pub max_weight: Option<f64>,
    pub is_active: bool,
}

/// A partial update. `None` fields are not sent at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleTypeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vehicle_types_response() {
        let src = include_str!("vehicle_types_response_okay.json");

        let got: Vec<VehicleType> = super::super::parse(src).unwrap();

        assert_eq!(got.len(), 2);
        assert_eq!(got[0].name, "motorbike");
        assert_eq!(got[0].max_weight, Some(20.0));
        assert!(got[0].is_active);
        assert_eq!(got[1].name, "van");
        assert_eq!(got[1].max_weight, None);
        assert!(!got[1].is_active);
        assert_eq!(
            got[1].deleted_at.as_deref(),
            Some("2026-02-10T11:00:00.000Z")
        );
    }

    #[test]
    fn creation_sends_every_writable_field() {
        let fields = VehicleTypeFields {
            name: String::from("cargo-bike"),
            description: String::from("Pedal cargo bike for short hops"),
            base_fee: 900.0,
            max_weight: None,
            is_active: true,
        };

        let got = serde_json::to_value(&fields).unwrap();

        assert_eq!(
            got,
            serde_json::json!({
                "name": "cargo-bike",
                "description": "Pedal cargo bike for short hops",
                "baseFee": 900.0,
                "maxWeight": null,
                "isActive": true,
            })
        );
    }

    #[test]
    fn updates_only_send_what_changed() {
        let update = VehicleTypeUpdate {
            base_fee: Some(1100.0),
            ..VehicleTypeUpdate::default()
        };

        let got = serde_json::to_value(&update).unwrap();

        assert_eq!(got, serde_json::json!({ "baseFee": 1100.0 }));
    }
}
