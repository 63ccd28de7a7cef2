use super::EndpointError;
use crate::Id;
use reqwest::{Client, Method};
use serde_derive::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// List riders whose paperwork sits in the given review state, each with
/// their uploaded documents attached.
pub async fn get_rider_documents(
    client: &Client,
    hostname: &str,
    token: &str,
    status: DocumentStatus,
) -> Result<Vec<RiderInfo>, EndpointError> {
    let query = [("status", status.to_string())];
    let response = super::send::<()>(
        client,
        hostname,
        Method::GET,
        "admin/riders/document-status",
        Some(token),
        &query,
        None,
    )
    .await?;

    let body = response.text().await?;
    log::trace!("Response: {}", body);

    super::parse(&body)
}

/// Move one document through the review workflow.
///
/// Rejections should carry a reason; the server stores it and shows it to
/// the rider.
pub async fn update_document_status(
    client: &Client,
    hostname: &str,
    token: &str,
    document_id: &Id,
    status: DocumentStatus,
    rejection_reason: Option<&str>,
) -> Result<RiderDocument, EndpointError> {
    let path = format!("admin/riders/documents/{}/status", document_id);
    let data = Data {
        document_status: status,
        rejection_reason,
    };
    let response = super::send(
        client,
        hostname,
        Method::PATCH,
        &path,
        Some(token),
        &[],
        Some(&data),
    )
    .await?;

    let body = response.text().await?;
    log::trace!("Response: {}", body);

    super::parse(&body)
}

/// Where a document (or a rider's paperwork as a whole) sits in the review
/// workflow.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    /// Nothing uploaded yet.
    Initial,
    /// Uploaded, awaiting review.
    Pending,
    Approved,
    Rejected,
}

impl DocumentStatus {
    /// The wire name, as it appears in query strings and payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Initial => "INITIAL",
            DocumentStatus::Pending => "PENDING",
            DocumentStatus::Approved => "APPROVED",
            DocumentStatus::Rejected => "REJECTED",
        }
    }
}

impl Display for DocumentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = UnknownDocumentStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INITIAL" => Ok(DocumentStatus::Initial),
            "PENDING" => Ok(DocumentStatus::Pending),
            "APPROVED" => Ok(DocumentStatus::Approved),
            "REJECTED" => Ok(DocumentStatus::Rejected),
            _ => Err(UnknownDocumentStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown document status: {0}")]
pub struct UnknownDocumentStatus(String);

/// A rider and the paperwork they've submitted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct RiderInfo {
    pub id: Id,
    pub user_id: Id,
    pub vehicle_type: String,
    pub document_status: DocumentStatus,
    pub rejection_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub documents: Vec<RiderDocument>,
    pub user_name: String,
}

/// A single uploaded document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct RiderDocument {
    pub id: Id,
    pub doc_name: String,
    pub doc_url: String,
    pub document_status: DocumentStatus,
    pub expiration_date: Option<String>,
    pub rejection_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Data<'a> {
    document_status: DocumentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection_reason: Option<&'a str>,
}
