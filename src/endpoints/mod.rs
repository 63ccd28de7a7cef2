//! The Courier admin API's endpoints.
//!
//! Every endpoint is a free function taking the [`Client`] to send with, the
//! server's hostname, and (for everything except login) the bearer token of
//! an admin session. Responses arrive wrapped in a `{success, data?,
//! message?}` envelope; the functions here unwrap it and hand back the typed
//! payload.

mod analytics;
mod document_settings;
mod login;
mod notifications;
mod orders;
mod rider_documents;
mod rider_revenue;
mod users;
mod vehicle_types;

pub use analytics::{
    get_analytics, AnalyticsSummary, OrderStatusCounts, RiderCounts,
};
pub use document_settings::{
    create_document_setting, delete_document_setting, get_document_setting,
    get_document_settings, get_document_settings_for_vehicle_type,
    update_document_setting, DocumentSetting, DocumentSettingFields,
    DocumentSettingUpdate,
};
pub use login::{login, LoginPayload};
pub use notifications::{send_bulk_push, PushData};
pub use orders::{get_order_details, get_orders, Order, OrderPage, Pagination};
pub use rider_documents::{
    get_rider_documents, update_document_status, DocumentStatus,
    RiderDocument, RiderInfo, UnknownDocumentStatus,
};
pub use rider_revenue::{get_rider_revenue, RiderRevenue};
pub use users::{get_users, PlatformUser, UserPage};
pub use vehicle_types::{
    create_vehicle_type, delete_vehicle_type, get_vehicle_type,
    get_vehicle_types, restore_vehicle_type, update_vehicle_type, VehicleType,
    VehicleTypeFields, VehicleTypeUpdate,
};

use reqwest::{Client, Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_derive::Deserialize;
use std::fmt::Debug;
use url::Url;

/// Typical endpoint errors.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    /// The HTTP client encountered an error.
    #[error("Unable to send the request")]
    HttpClient(#[from] reqwest::Error),
    /// The endpoint URL couldn't be built.
    #[error("Unable to construct the request URL")]
    BadUrl(#[from] url::ParseError),
    /// Unable to parse the JSON in the response.
    #[error("Unable to parse the response")]
    ResponseParse(#[from] serde_json::Error),
    /// The server answered, but flagged the request as failed.
    #[error("The server rejected the request: {}", message.as_deref().unwrap_or("no reason given"))]
    Rejected {
        /// The human-readable reason, when the server sent one.
        message: Option<String>,
    },
    /// The server claimed success but sent no payload.
    #[error("The response was missing its payload")]
    MissingPayload,
}

/// The `{success, data?, message?}` envelope every response is wrapped in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

impl<T> Envelope<T> {
    fn into_result(self) -> Result<T, EndpointError> {
        match self {
            Envelope {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            Envelope {
                success: true,
                data: None,
                ..
            } => Err(EndpointError::MissingPayload),
            Envelope { message, .. } => Err(EndpointError::Rejected { message }),
        }
    }
}

/// Parse a response body into the envelope's payload.
fn parse<T>(body: &str) -> Result<T, EndpointError>
where
    T: DeserializeOwned,
{
    let doc: Envelope<T> = serde_json::from_str(body)?;
    doc.into_result()
}

/// Parse a response body for endpoints whose only payload is the success
/// flag itself (deletes and the like).
fn parse_ack(body: &str) -> Result<(), EndpointError> {
    let doc: Envelope<serde_json::Value> = serde_json::from_str(body)?;
    if doc.success {
        Ok(())
    } else {
        Err(EndpointError::Rejected {
            message: doc.message,
        })
    }
}

async fn send<D>(
    client: &Client,
    hostname: &str,
    method: Method,
    path: &str,
    token: Option<&str>,
    query: &[(&str, String)],
    body: Option<&D>,
) -> Result<Response, EndpointError>
where
    D: Debug + Serialize,
{
    let mut url = Url::parse(&format!("https://{}/{}", hostname, path))?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in query {
            pairs.append_pair(name, value);
        }
    }

    log::debug!("Sending a {} request to {}", method, url);

    let mut request = client.request(method, url);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }
    if let Some(body) = body {
        log::trace!("Payload: {:#?}", body);
        request = request.json(body);
    }

    // no error_for_status() here: the server still wraps 4xx responses in
    // the envelope, and the message inside is worth surfacing
    let response = request.send().await?;

    log::trace!("Status: {}", response.status());
    log::trace!("Headers: {:#?}", response.headers());

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_successful_envelope_yields_its_payload() {
        let src = r#"{"success": true, "data": 42}"#;

        let got: u64 = parse(src).unwrap();

        assert_eq!(got, 42);
    }

    #[test]
    fn a_failed_envelope_yields_the_server_message() {
        let src = r#"{"success": false, "message": "No such order"}"#;

        let err = parse::<u64>(src).unwrap_err();

        match err {
            EndpointError::Rejected { message } => {
                assert_eq!(message.as_deref(), Some("No such order"))
            },
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn success_without_a_payload_is_malformed() {
        let src = r#"{"success": true}"#;

        let err = parse::<u64>(src).unwrap_err();

        assert!(matches!(err, EndpointError::MissingPayload));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = parse::<u64>("<html>502 Bad Gateway</html>").unwrap_err();

        assert!(matches!(err, EndpointError::ResponseParse(_)));
    }

    #[test]
    fn acks_only_care_about_the_success_flag() {
        parse_ack(r#"{"success": true, "message": "Deleted"}"#).unwrap();

        let err =
            parse_ack(r#"{"success": false, "message": "Still referenced"}"#)
                .unwrap_err();
        assert!(matches!(err, EndpointError::Rejected { .. }));
    }
}
