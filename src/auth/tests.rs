//! Authenticator and IAM token tests

use super::*;
use base64::Engine;
use std::collections::HashMap;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn iam_config(server: &MockServer) -> AuthConfig {
    AuthConfig::Iam {
        apikey: "my-apikey".to_string(),
        token_url: format!("{}/identity/token", server.uri()),
        client_id: None,
        client_secret: None,
    }
}

/// Apply `config` to a bare GET and return the finished request
async fn signed(config: AuthConfig) -> reqwest::Request {
    let req = reqwest::Client::new().get("https://example.com/v1/projects");
    Authenticator::new(config)
        .apply(req)
        .await
        .unwrap()
        .build()
        .unwrap()
}

fn header_value<'a>(req: &'a reqwest::Request, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn test_no_auth_leaves_request_alone() {
    let req = signed(AuthConfig::None).await;
    assert_eq!(header_value(&req, "Authorization"), None);
    assert_eq!(req.url().query(), None);
}

#[tokio::test]
async fn test_api_key_in_named_header_with_prefix() {
    let req = signed(AuthConfig::ApiKey {
        location: Location::Header,
        header_name: Some("X-API-Key".to_string()),
        query_param: None,
        prefix: Some("ApiKey ".to_string()),
        value: "k-123".to_string(),
    })
    .await;
    assert_eq!(header_value(&req, "X-API-Key"), Some("ApiKey k-123"));
}

#[tokio::test]
async fn test_api_key_defaults_to_authorization_header() {
    let req = signed(AuthConfig::ApiKey {
        location: Location::Header,
        header_name: None,
        query_param: None,
        prefix: None,
        value: "k-123".to_string(),
    })
    .await;
    assert_eq!(header_value(&req, "Authorization"), Some("k-123"));
}

#[tokio::test]
async fn test_api_key_in_query() {
    let req = signed(AuthConfig::ApiKey {
        location: Location::Query,
        header_name: None,
        query_param: None,
        prefix: None,
        value: "secret123".to_string(),
    })
    .await;
    assert_eq!(req.url().query(), Some("api_key=secret123"));
}

#[tokio::test]
async fn test_basic_auth() {
    let req = signed(AuthConfig::Basic {
        username: "user".to_string(),
        password: "pass".to_string(),
    })
    .await;

    let encoded = header_value(&req, "Authorization")
        .and_then(|v| v.strip_prefix("Basic "))
        .unwrap();
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .unwrap();
    assert_eq!(decoded, b"user:pass");
}

#[tokio::test]
async fn test_bearer_auth() {
    let req = signed(AuthConfig::Bearer {
        token: "my-bearer-token".to_string(),
    })
    .await;
    assert_eq!(
        header_value(&req, "Authorization"),
        Some("Bearer my-bearer-token")
    );
}

#[tokio::test]
async fn test_custom_headers() {
    let headers = HashMap::from([
        ("X-Tenant".to_string(), "acme".to_string()),
        ("X-Trace".to_string(), "on".to_string()),
    ]);
    let req = signed(AuthConfig::CustomHeaders { headers }).await;

    assert_eq!(header_value(&req, "X-Tenant"), Some("acme"));
    assert_eq!(header_value(&req, "X-Trace"), Some("on"));
}

/// Token endpoint answering `times` exchanges with `token`
async fn mount_token(server: &MockServer, token: &str, expires_in: i64, times: u64) {
    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": token,
            "token_type": "Bearer",
            "expires_in": expires_in
        })))
        .expect(times)
        .mount(server)
        .await;
}

async fn bearer(auth: &Authenticator) -> String {
    let req = auth
        .apply(reqwest::Client::new().get("https://example.com/v1/projects"))
        .await
        .unwrap()
        .build()
        .unwrap();
    header_value(&req, "Authorization").unwrap().to_string()
}

#[tokio::test]
async fn test_iam_token_exchange() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .and(header("Accept", "application/json"))
        .and(body_string_contains(
            "grant_type=urn%3Aibm%3Aparams%3Aoauth%3Agrant-type%3Aapikey",
        ))
        .and(body_string_contains("apikey=my-apikey"))
        .and(body_string_contains("response_type=cloud_iam"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "iam-token-123",
            "refresh_token": "not-used",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(iam_config(&mock_server));
    assert_eq!(bearer(&auth).await, "Bearer iam-token-123");
}

#[tokio::test]
async fn test_iam_client_credentials_sent_as_basic_auth() {
    let mock_server = MockServer::start().await;

    let expected = format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode("bx:bx")
    );
    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .and(header("Authorization", expected.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "with-client",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Iam {
        apikey: "my-apikey".to_string(),
        token_url: format!("{}/identity/token", mock_server.uri()),
        client_id: Some("bx".to_string()),
        client_secret: Some("bx".to_string()),
    });
    assert_eq!(bearer(&auth).await, "Bearer with-client");
}

#[tokio::test]
async fn test_iam_token_reused_until_expiry() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, "cached-token", 3600, 1).await;

    let auth = Authenticator::new(iam_config(&mock_server));
    for _ in 0..3 {
        assert_eq!(bearer(&auth).await, "Bearer cached-token");
    }
}

#[tokio::test]
async fn test_iam_token_inside_margin_is_refreshed() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, "short-lived", 5, 2).await;

    let auth = Authenticator::new(iam_config(&mock_server));
    bearer(&auth).await;
    bearer(&auth).await;
}

#[tokio::test]
async fn test_clear_cache_forces_new_exchange() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, "token", 3600, 2).await;

    let auth = Authenticator::new(iam_config(&mock_server));
    bearer(&auth).await;
    auth.clear_cache().await;
    bearer(&auth).await;
}

#[tokio::test]
async fn test_iam_rejected_apikey() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "errorCode": "BXNIM0415E",
            "errorMessage": "Provided API key could not be found"
        })))
        .mount(&mock_server)
        .await;

    let err = Authenticator::new(iam_config(&mock_server))
        .apply(reqwest::Client::new().get("https://example.com/v1/projects"))
        .await
        .unwrap_err();

    match err {
        crate::Error::TokenRequest { message } => {
            assert!(message.starts_with("IAM returned 400"));
            assert!(message.contains("BXNIM0415E"));
        }
        other => panic!("Expected TokenRequest, got {other:?}"),
    }
}

#[tokio::test]
async fn test_concurrent_requests_share_one_token_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"access_token": "shared", "expires_in": 3600}))
                .set_delay(std::time::Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(iam_config(&mock_server));
    let client = reqwest::Client::new();

    let (a, b, c) = tokio::join!(
        auth.apply(client.get("https://example.com/a")),
        auth.apply(client.get("https://example.com/b")),
        auth.apply(client.get("https://example.com/c")),
    );
    for req in [a, b, c] {
        let req = req.unwrap().build().unwrap();
        assert_eq!(header_value(&req, "Authorization"), Some("Bearer shared"));
    }
}

#[tokio::test]
async fn test_iam_empty_token_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"access_token": ""})),
        )
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(iam_config(&mock_server));
    let err = auth
        .apply(reqwest::Client::new().get("https://example.com/api"))
        .await
        .unwrap_err();

    assert!(matches!(err, crate::Error::Auth { .. }));
}
