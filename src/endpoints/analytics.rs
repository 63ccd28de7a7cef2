use super::EndpointError;
use reqwest::{Client, Method};
use serde_derive::Deserialize;

/// Fetch the platform-wide activity summary for a date range.
pub async fn get_analytics(
    client: &Client,
    hostname: &str,
    token: &str,
    start_date: &str,
    end_date: &str,
) -> Result<AnalyticsSummary, EndpointError> {
    let query = [
        ("startDate", start_date.to_string()),
        ("endDate", end_date.to_string()),
    ];
    let response = super::send::<()>(
        client,
        hostname,
        Method::GET,
        "admin/analytics",
        Some(token),
        &query,
        None,
    )
    .await?;

    let body = response.text().await?;
    log::trace!("Response: {}", body);

    super::parse(&body)
}

/// Headline numbers for the dashboard's summary cards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct AnalyticsSummary {
    pub users_count: u64,
    pub riders: RiderCounts,
    pub orders_count: u64,
    pub orders_status: OrderStatusCounts,
    pub total_delivery_fee: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct RiderCounts {
    pub approved: u64,
    pub unapproved: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct OrderStatusCounts {
    pub pending: u64,
    pub in_progress: u64,
    pub completed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_analytics_response() {
        let src = include_str!("analytics_response_okay.json");
        let should_be = AnalyticsSummary {
            users_count: 1842,
            riders: RiderCounts {
                approved: 77,
                unapproved: 12,
            },
            orders_count: 5310,
            orders_status: OrderStatusCounts {
                pending: 14,
                in_progress: 9,
                completed: 5287,
            },
            total_delivery_fee: 812345.5,
        };

        let got: AnalyticsSummary = super::super::parse(src).unwrap();

        assert_eq!(got, should_be);
    }
}
