use super::EndpointError;
use crate::Id;
use reqwest::{Client, Method};
use serde_derive::Deserialize;

/// List orders in the given status bucket (`pending`, `inProgress`,
/// `completed`, ...), with the server's pagination bookkeeping attached.
pub async fn get_orders(
    client: &Client,
    hostname: &str,
    token: &str,
    status: &str,
) -> Result<OrderPage, EndpointError> {
    let path = format!("admin/orders/{}", status);
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

/// Fetch everything the server knows about one order.
///
/// The payload's shape varies with the order's state (rider assignment,
/// reward status, drop-off details), so it comes back as raw JSON for the
/// caller to pick apart. The server serves this endpoint with or without
/// credentials; pass the token when you have one.
pub async fn get_order_details(
    client: &Client,
    hostname: &str,
    token: Option<&str>,
    order_id: &Id,
) -> Result<serde_json::Value, EndpointError> {
    let path = format!("admin/orders/details/{}", order_id);
    let response = super::send::<()>(
        client,
        hostname,
        Method::GET,
        &path,
        token,
        &[],
        None,
    )
    .await?;

    let body = response.text().await?;
    log::trace!("Response: {}", body);

    super::parse(&body)
}

/// One page of orders.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub pagination: Pagination,
}

/// A delivery order as it appears in the listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Order {
    pub id: Id,
    pub status: String,
    pub is_rider_assigned: bool,
    pub has_rewarded_rider: bool,
    pub delivery_fee: f64,
    pub total_amount: f64,
}

/// The server's pagination bookkeeping for a listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}
