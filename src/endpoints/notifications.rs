use super::EndpointError;
use crate::Id;
use reqwest::{Client, Method};
use serde_derive::{Deserialize, Serialize};

/// Fan a push notification out to many users at once.
pub async fn send_bulk_push(
    client: &Client,
    hostname: &str,
    token: &str,
    title: &str,
    body_text: &str,
    user_ids: &[Id],
    data: Option<&PushData>,
) -> Result<(), EndpointError> {
    let data = Data {
        title,
        body: body_text,
        user_ids,
        data,
    };
    let response = super::send(
        client,
        hostname,
        Method::POST,
        "notification/push/send-bulk",
        Some(token),
        &[],
        Some(&data),
    )
    .await?;

    let body = response.text().await?;
    log::trace!("Response: {}", body);

    super::parse_ack(&body)
}

/// The optional payload delivered alongside a push notification.
///
/// `route` tells the app which screen to open when the notification is
/// tapped; anything else goes through verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Data<'a> {
    title: &'a str,
    body: &'a str,
    user_ids: &'a [Id],
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a PushData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_request_matches_the_wire_shape() {
        let mut extra = serde_json::Map::new();
        extra.insert(
            String::from("orderId"),
            serde_json::Value::from("ord_501"),
        );
        let push_data = PushData {
            route: Some(String::from("/orders")),
            extra,
        };
        let user_ids = [Id::from("usr_07"), Id::from("usr_08")];
        let data = Data {
            title: "Your rider is on the way",
            body: "Track your order in the app",
            user_ids: &user_ids,
            data: Some(&push_data),
        };

        let got = serde_json::to_value(&data).unwrap();

        assert_eq!(
            got,
            serde_json::json!({
                "title": "Your rider is on the way",
                "body": "Track your order in the app",
                "userIds": ["usr_07", "usr_08"],
                "data": {
                    "route": "/orders",
                    "orderId": "ord_501",
                },
            })
        );
    }

    #[test]
    fn the_payload_is_optional() {
        let data = Data {
            title: "Maintenance tonight",
            body: "The app will be briefly unavailable",
            user_ids: &[],
            data: None,
        };

        let got = serde_json::to_value(&data).unwrap();

        assert_eq!(
            got,
            serde_json::json!({
                "title": "Maintenance tonight",
                "body": "The app will be briefly unavailable",
                "userIds": [],
            })
        );
    }
}
