//! Integration tests for the messages API endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use serial_test::serial;
    use tower::util::ServiceExt;

    use crate::test_utils::{TEST_PIN, body_to_string, test_app};

    fn post_message(pin: Option<&str>, content: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .uri("/api/messages")
            .method("POST")
            .header("content-type", "application/json")
            .header("x-forwarded-for", "10.1.1.1");
        if let Some(pin) = pin {
            builder = builder.header("x-admin-pin", pin);
        }
        builder
            .body(Body::from(
                serde_json::json!({
                    "content": content,
                    "author": "Sophie"
                })
                .to_string(),
            ))
            .unwrap()
    }

    async fn list_messages(app: &Router) -> serde_json::Value {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/messages")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_string(response.into_body()).await;
        serde_json::from_str(&body).unwrap()
    }

    /// Tests the list is empty before any message is posted
    #[tokio::test]
    #[serial]
    async fn it_lists_no_messages_initially() {
        let app = test_app().await;
        let messages = list_messages(&app).await;
        assert!(messages.as_array().unwrap().is_empty());
    }

    /// Tests posting requires the admin pin
    #[tokio::test]
    #[serial]
    async fn it_requires_the_admin_pin_to_post() {
        let app = test_app().await;

        let response = app
            .oneshot(post_message(None, "Bonjour"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    /// Tests creating a message with the admin pin
    #[tokio::test]
    #[serial]
    async fn it_creates_a_message_with_the_admin_pin() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(post_message(Some(TEST_PIN), "Bonjour Mamy"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_to_string(response.into_body()).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["content"], "Bonjour Mamy");
        assert_eq!(json["author"], "Sophie");
        assert_eq!(json["timeAgo"], "À l'instant");

        // Default expiry is 24 hours after creation
        let created: chrono::NaiveDateTime =
            serde_json::from_value(json["createdAt"].clone()).unwrap();
        let expires: chrono::NaiveDateTime =
            serde_json::from_value(json["expiresAt"].clone()).unwrap();
        assert_eq!(expires - created, chrono::Duration::hours(24));

        let messages = list_messages(&app).await;
        assert_eq!(messages.as_array().unwrap().len(), 1);
    }

    /// Tests out-of-range expiry windows are rejected, not applied
    #[tokio::test]
    #[serial]
    async fn it_rejects_invalid_expiry_windows() {
        let app = test_app().await;

        // Zero and negative windows would break expiresAt > createdAt;
        // i64::MAX would overflow the datetime arithmetic
        for hours in [0_i64, -5, i64::MAX] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri("/api/messages")
                        .method("POST")
                        .header("content-type", "application/json")
                        .header("x-admin-pin", TEST_PIN)
                        .header("x-forwarded-for", "10.1.1.1")
                        .body(Body::from(
                            serde_json::json!({
                                "content": "Bonjour",
                                "author": "Sophie",
                                "expiresInHours": hours
                            })
                            .to_string(),
                        ))
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(
                response.status(),
                StatusCode::BAD_REQUEST,
                "expiresInHours = {}",
                hours
            );
        }

        // Nothing was persisted
        let messages = list_messages(&app).await;
        assert!(messages.as_array().unwrap().is_empty());
    }

    /// Tests the active message cap of 3
    #[tokio::test]
    #[serial]
    async fn it_rejects_a_fourth_active_message() {
        let app = test_app().await;

        for i in 0..3 {
            let response = app
                .clone()
                .oneshot(post_message(Some(TEST_PIN), &format!("Message {}", i)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .clone()
            .oneshot(post_message(Some(TEST_PIN), "Message de trop"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Still only 3 visible
        let messages = list_messages(&app).await;
        assert_eq!(messages.as_array().unwrap().len(), 3);
    }

    /// Tests creating then deleting removes the message from the list
    #[tokio::test]
    #[serial]
    async fn it_round_trips_create_then_delete() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(post_message(Some(TEST_PIN), "Éphémère"))
            .await
            .unwrap();
        let body = body_to_string(response.into_body()).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let id = json["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/messages/{}", id))
                    .method("DELETE")
                    .header("x-admin-pin", TEST_PIN)
                    .header("x-forwarded-for", "10.1.1.1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let messages = list_messages(&app).await;
        assert!(messages.as_array().unwrap().is_empty());
    }

    /// Tests deleting an unknown id returns 404
    #[tokio::test]
    #[serial]
    async fn it_returns_404_for_an_unknown_message() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/messages/999")
                    .method("DELETE")
                    .header("x-admin-pin", TEST_PIN)
                    .header("x-forwarded-for", "10.1.1.1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    /// Tests deleting with a wrong pin is unauthorized
    #[tokio::test]
    #[serial]
    async fn it_rejects_deletes_with_a_wrong_pin() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/messages/1")
                    .method("DELETE")
                    .header("x-admin-pin", "0000")
                    .header("x-forwarded-for", "10.1.1.1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
