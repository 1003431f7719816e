use pdconfig::diff::{Operation, UpdateRequest};
use pdconfig::{ConfigApi, ConfigApiError, ConfigClient};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// `admin:secret`
const BASIC_AUTH: &str = "Basic YWRtaW46c2VjcmV0";

fn client(server: &MockServer) -> ConfigClient {
    ConfigClient::with_base_url("admin".to_string(), "secret".to_string(), server.uri()).unwrap()
}

#[tokio::test]
async fn test_get_sends_basic_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/password-validators/strict"))
        .and(header("authorization", BASIC_AUTH))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schemas": ["urn:pingidentity:schemas:configuration:2.0:password-validator:length-based"],
            "id": "strict",
            "minPasswordLength": 12
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = client(&mock_server)
        .get("/password-validators/strict")
        .await
        .unwrap();

    assert_eq!(body["id"], "strict");
    assert_eq!(body["minPasswordLength"], 12);
}

#[tokio::test]
async fn test_create_posts_body() {
    let mock_server = MockServer::start().await;
    let request = json!({
        "schemas": ["urn:pingidentity:schemas:configuration:2.0:change-subscription-handler:logging"],
        "id": "audit",
        "enabled": true
    });

    Mock::given(method("POST"))
        .and(path("/change-subscription-handlers"))
        .and(body_json(&request))
        .respond_with(ResponseTemplate::new(200).set_body_json(&request))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = client(&mock_server)
        .create("/change-subscription-handlers", &request)
        .await
        .unwrap();
    assert_eq!(body["id"], "audit");
}

#[tokio::test]
async fn test_update_sends_operations() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/crypto-manager"))
        .and(body_json(json!({
            "operations": [
                {"op": "replace", "path": "sslCertNickname", "value": "server-cert"},
                {"op": "remove", "path": "sslProtocol"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schemas": ["urn:pingidentity:schemas:configuration:2.0:crypto-manager"],
            "sslCertNickname": "server-cert"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = UpdateRequest {
        operations: vec![
            Operation::replace("sslCertNickname", json!("server-cert")),
            Operation::clear("sslProtocol"),
        ],
    };
    let body = client(&mock_server)
        .update("/crypto-manager", &request)
        .await
        .unwrap();
    assert_eq!(body["sslCertNickname"], "server-cert");
}

#[tokio::test]
async fn test_delete_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/otp-delivery-mechanisms/sms"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    client(&mock_server)
        .delete("/otp-delivery-mechanisms/sms")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/password-validators/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "schemas": ["urn:ietf:params:scim:api:messages:2.0:Error"],
            "status": "404",
            "detail": "The Password Validator 'missing' does not exist"
        })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .get("/password-validators/missing")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(matches!(err, ConfigApiError::NotFound { ref path } if path == "/password-validators/missing"));
}

#[tokio::test]
async fn test_unauthorized_carries_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crypto-manager"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": "401",
            "detail": "Invalid credentials"
        })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .get("/crypto-manager")
        .await
        .unwrap_err();

    match err {
        ConfigApiError::Auth { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("expected Auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_uses_scim_type_or_raw_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/crypto-manager"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "400",
            "scimType": "invalidValue"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/crypto-manager"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let err = client
        .update("/crypto-manager", &UpdateRequest { operations: vec![] })
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigApiError::Api { status: 400, ref message } if message == "invalidValue"));

    let err = client.get("/crypto-manager").await.unwrap_err();
    assert!(matches!(err, ConfigApiError::Api { status: 500, ref message } if message == "internal failure"));
}

#[tokio::test]
async fn test_invalid_json_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crypto-manager"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .get("/crypto-manager")
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigApiError::InvalidResponse { .. }));
}
