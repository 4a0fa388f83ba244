use crate::helpers::TestApp;
use secrecy::Secret;
use serde_json::{json, Value};
use wiremock::{
    matchers::{any, method, path},
    Mock, ResponseTemplate,
};

#[tokio::test]
async fn subscribe_returns_200_and_relays_to_linkedin() {
    // given
    let app = TestApp::spawn().await;
    let body = json!({
        "email": "grace@example.com",
        "firstName": "Grace",
        "lastName": "Hopper",
        "source": "landing_page"
    });

    Mock::given(path("/newsletterSubscriptions"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.linkedin_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.airtable_server)
        .await;

    // when
    let response = app.post_newsletter(body.to_string()).await;

    // then
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse body");
    assert_eq!(body["message"], "Successfully subscribed!");
}

#[tokio::test]
async fn subscribe_succeeds_when_linkedin_is_not_configured() {
    // given
    let app = TestApp::spawn_with(|config| {
        config.linkedin.access_token = Secret::new(String::new());
    })
    .await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.linkedin_server)
        .await;

    // when
    let response = app
        .post_newsletter(json!({ "email": "grace@example.com" }).to_string())
        .await;

    // then
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn subscribe_returns_400_for_invalid_bodies() {
    // given
    let app = TestApp::spawn().await;
    let test_cases = vec![
        (json!({ "firstName": "Grace" }).to_string(), "missing email"),
        (json!({ "email": "grace" }).to_string(), "invalid email"),
        ("{".to_string(), "malformed json"),
    ];

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.linkedin_server)
        .await;

    for (body, description) in test_cases {
        // when
        let response = app.post_newsletter(body).await;

        // then
        assert_eq!(
            response.status(),
            400,
            "The API did not return 400 Bad Request when the payload was {description}"
        );
    }
}
