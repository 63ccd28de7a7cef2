use super::EndpointError;
use crate::AdminUser;
use reqwest::{Client, Method};
use serde_derive::{Deserialize, Serialize};

/// Exchange credentials for a bearer token.
///
/// This is the raw exchange with the server. It doesn't touch any session
/// state and doesn't care what role comes back; both of those decisions
/// belong to [`AuthGate::login()`][crate::AuthGate::login].
pub async fn login(
    client: &Client,
    hostname: &str,
    email_or_mobile: &str,
    password: &str,
) -> Result<LoginPayload, EndpointError> {
    let data = Data {
        email_or_mobile,
        password,
    };
    let response = super::send(
        client,
        hostname,
        Method::POST,
        "auth/login",
        None,
        &[],
        Some(&data),
    )
    .await?;

    let body = response.text().await?;
    log::trace!("Response: {}", body);

    let payload: LoginPayload = super::parse(&body)?;
    log::info!("Logged in as {}", payload.user.email);

    Ok(payload)
}

/// A successful credential exchange.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct LoginPayload {
    pub access_token: String,
    pub user: AdminUser,
}

#[derive(Debug, Copy, Clone, Serialize)]
struct Data<'a> {
    #[serde(rename = "emailOrMobile")]
    email_or_mobile: &'a str,
    password: &'a str,
}
