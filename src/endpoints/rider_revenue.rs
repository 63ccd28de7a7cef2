use super::EndpointError;
use crate::Id;
use reqwest::{Client, Method};
use serde_derive::Deserialize;

/// Fetch what each rider earned over a date range.
pub async fn get_rider_revenue(
    client: &Client,
    hostname: &str,
    token: &str,
    start_date: &str,
    end_date: &str,
) -> Result<Vec<RiderRevenue>, EndpointError> {
    let query = [
        ("startDate", start_date.to_string()),
        ("endDate", end_date.to_string()),
    ];
    let response = super::send::<()>(
        client,
        hostname,
        Method::GET,
        "admin/riders/revenue",
        Some(token),
        &query,
        None,
    )
    .await?;

    let body = response.text().await?;
    log::trace!("Response: {}", body);

    super::parse(&body)
}

/// One rider's earnings over the requested range.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct RiderRevenue {
    pub rider_id: Id,
    pub first_name: String,
    pub last_name: String,
    /// The server sends the figures as strings.
    pub orders_fulfilled: String,
    pub total_earnings: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rider_revenue_response() {
        let src = include_str!("rider_revenue_response_okay.json");
        let should_be = vec![
            RiderRevenue {
                rider_id: Id::from("rdr_11"),
                first_name: String::from("Kemi"),
                last_name: String::from("Balogun"),
                orders_fulfilled: String::from("148"),
                total_earnings: String::from("96200.00"),
            },
            RiderRevenue {
                rider_id: Id::from("rdr_12"),
                first_name: String::from("Tunde"),
                last_name: String::from("Okafor"),
                orders_fulfilled: String::from("93"),
                total_earnings: String::from("61450.00"),
            },
        ];

        let got: Vec<RiderRevenue> = super::super::parse(src).unwrap();

        assert_eq!(got, should_be);
    }
}
