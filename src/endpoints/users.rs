use super::EndpointError;
use crate::Id;
use reqwest::{Client, Method};
use serde_derive::Deserialize;

/// List registered users with the given role, one page at a time.
///
/// `page` and `limit` are optional; leaving them out returns whatever the
/// server considers the first page.
pub async fn get_users(
    client: &Client,
    hostname: &str,
    token: &str,
    role: &str,
    page: Option<u32>,
    limit: Option<u32>,
) -> Result<UserPage, EndpointError> {
    let mut query = vec![("role", role.to_string())];
    if let Some(page) = page {
        query.push(("page", page.to_string()));
    }
    if let Some(limit) = limit {
        query.push(("limit", limit.to_string()));
    }

    let response = super::send::<()>(
        client,
        hostname,
        Method::GET,
        "admin/users",
        Some(token),
        &query,
        None,
    )
    .await?;

    let body = response.text().await?;
    log::trace!("Response: {}", body);

    super::parse(&body)
}

/// One page of users, plus the total count for pagination bookkeeping.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct UserPage {
    pub users: Vec<PlatformUser>,
    pub count: u64,
}

/// A registered user of the platform (customer or rider).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct PlatformUser {
    pub id: Id,
    /// Accounts registered by mobile number may have no email at all.
    pub email: Option<String>,
    pub mobile: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub profile_pic: String,
    pub country_code: String,
    pub registration_date: String,
    pub updated_at: String,
    pub registration_mode: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_users_response() {
        let src = include_str!("users_response_okay.json");

        let got: UserPage = super::super::parse(src).unwrap();

        assert_eq!(got.count, 1842);
        assert_eq!(got.users.len(), 2);
        assert_eq!(got.users[0].id, Id::from("usr_07"));
        assert_eq!(got.users[0].email, None);
        assert_eq!(got.users[0].mobile, "8023456789");
        assert_eq!(got.users[1].email.as_deref(), Some("z@courier.example"));
        assert_eq!(got.users[1].registration_mode, "email");
    }
}
