use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::ConfigApiError;
use crate::resource::{RequiredAction, ResourceModel, object_id};
use crate::schema::{AttributeKind, Endpoint, ResourceSchema};
use crate::value::AttrValue;

pub const MESSAGES_URN: &str = "urn:pingidentity:schemas:configuration:messages:2.0";

/// The messages extension attached to configuration responses.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Messages {
    #[serde(default)]
    pub notifications: Vec<String>,
    #[serde(default)]
    pub required_actions: Vec<RequiredAction>,
}

/// Error body returned by the configuration API.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default, rename = "scimType")]
    pub scim_type: Option<String>,
}

impl ErrorResponse {
    /// Best human-readable message from a raw error body.
    pub fn message_from(body: &str) -> String {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(ErrorResponse {
                detail: Some(detail),
                ..
            }) => detail,
            Ok(ErrorResponse {
                scim_type: Some(scim_type),
                ..
            }) => scim_type,
            _ if body.trim().is_empty() => "empty response body".to_string(),
            _ => body.trim().to_string(),
        }
    }
}

/// Body of the POST that creates a new object of the planned sub-type.
///
/// Only defined attributes of the active sub-type are sent; the server
/// applies its own defaults to the rest.
pub fn add_request(schema: &ResourceSchema, planned: &ResourceModel) -> Value {
    let mut body = Map::new();
    body.insert(
        "schemas".to_string(),
        Value::Array(vec![Value::String(schema.type_urn(planned.sub_type()))]),
    );
    if let Some(key) = &planned.key {
        body.insert("id".to_string(), Value::String(key.clone()));
    }
    for attribute in schema.active_attributes(planned.sub_type()) {
        let value = planned.get(attribute.name);
        if attribute.presence.is_configurable() && value.is_defined() {
            body.insert(attribute.wire_name.to_string(), value.to_json());
        }
    }
    Value::Object(body)
}

/// Translates a configuration object into a model.
///
/// `key` is the key the object was requested under; collection objects
/// carry their own `id` which takes precedence. Sensitive attributes are
/// never echoed by the server, so they keep the value from `planned`.
pub fn read_object(
    schema: &ResourceSchema,
    path: &str,
    key: Option<&str>,
    body: &Value,
    planned: Option<&ResourceModel>,
) -> Result<ResourceModel, ConfigApiError> {
    let invalid = |message: String| ConfigApiError::InvalidResponse {
        path: path.to_string(),
        message,
    };
    let object = body
        .as_object()
        .ok_or_else(|| invalid("expected a JSON object".to_string()))?;

    let sub_type = if schema.is_polymorphic() {
        let urns = object
            .get("schemas")
            .and_then(Value::as_array)
            .map(|urns| urns.iter().filter_map(Value::as_str).collect::<Vec<_>>())
            .unwrap_or_default();
        Some(
            schema
                .sub_type_from_urns(urns)
                .ok_or_else(|| invalid(format!("no {} type in 'schemas'", schema.display_name)))?,
        )
    } else {
        None
    };

    let key = match schema.endpoint {
        Endpoint::Collection(_) => object
            .get("id")
            .and_then(Value::as_str)
            .or(key)
            .map(str::to_string),
        Endpoint::Nested { .. } => key.map(str::to_string),
        Endpoint::Singleton(_) => None,
    };

    let mut model = ResourceModel {
        id: Some(object_id(schema, key.as_deref())),
        key,
        sub_type,
        ..Default::default()
    };

    for attribute in schema.attributes {
        let value = if !attribute.applies_to(model.sub_type()) {
            AttrValue::Null
        } else if attribute.sensitive {
            planned
                .map(|planned| planned.get(attribute.name).clone())
                .filter(AttrValue::is_defined)
                .unwrap_or(AttrValue::Null)
        } else {
            match object.get(attribute.wire_name) {
                Some(raw) => AttrValue::from_json(attribute.kind, raw).ok_or_else(|| {
                    invalid(format!(
                        "expected {} for '{}'",
                        attribute.kind.label(),
                        attribute.wire_name
                    ))
                })?,
                None if attribute.kind == AttributeKind::StringSet => {
                    AttrValue::StringSet(BTreeSet::new())
                }
                None => AttrValue::Null,
            }
        };
        model.set(attribute.name, value);
    }

    if let Some(messages) = object.get(MESSAGES_URN) {
        let messages: Messages = serde_json::from_value(messages.clone())
            .map_err(|e| invalid(format!("malformed messages: {e}")))?;
        model.notifications = messages.notifications.into_iter().collect();
        model.required_actions = messages.required_actions;
    }

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{change_subscription_handler, otp_delivery_mechanism, replication_server};
    use serde_json::json;

    #[test]
    fn test_error_response_prefers_detail() {
        let body = r#"{"schemas":["urn:ietf:params:scim:api:messages:2.0:Error"],
                       "status":"400","scimType":"invalidValue","detail":"bad value"}"#;
        assert_eq!(ErrorResponse::message_from(body), "bad value");
    }

    #[test]
    fn test_error_response_falls_back_to_raw_body() {
        assert_eq!(ErrorResponse::message_from("Bad Gateway"), "Bad Gateway");
        assert_eq!(ErrorResponse::message_from(""), "empty response body");
        assert_eq!(
            ErrorResponse::message_from(r#"{"scimType":"mutability"}"#),
            "mutability"
        );
    }

    #[test]
    fn test_add_request_sends_only_defined_active_attributes() {
        let schema = &change_subscription_handler::RESOURCE;
        let mut planned = ResourceModel {
            key: Some("audit".to_string()),
            sub_type: Some("logging".to_string()),
            ..Default::default()
        };
        planned.set("enabled", AttrValue::Bool(true));
        planned.set("log_file", AttrValue::string("logs/change-notifications.log"));
        planned.set("change_subscription", AttrValue::Unknown);
        planned.set("description", AttrValue::Null);
        planned.set("script_class", AttrValue::string("ignored"));

        assert_eq!(
            add_request(schema, &planned),
            json!({
                "schemas": ["urn:pingidentity:schemas:configuration:2.0:change-subscription-handler:logging"],
                "id": "audit",
                "enabled": true,
                "logFile": "logs/change-notifications.log"
            })
        );
    }

    #[test]
    fn test_read_object_with_messages() {
        let schema = &change_subscription_handler::RESOURCE;
        let body = json!({
            "schemas": ["urn:pingidentity:schemas:configuration:2.0:change-subscription-handler:logging"],
            "id": "audit",
            "enabled": true,
            "logFile": "logs/change-notifications.log",
            "meta": {"resourceType": "Logging Change Subscription Handler"},
            "urn:pingidentity:schemas:configuration:messages:2.0": {
                "notifications": ["handler registered"],
                "requiredActions": [
                    {"property": "log-file", "type": "other", "synopsis": "check the log"}
                ]
            }
        });

        let model = read_object(schema, "/x", None, &body, None).unwrap();
        assert_eq!(model.key.as_deref(), Some("audit"));
        assert_eq!(model.id.as_deref(), Some("audit"));
        assert_eq!(model.sub_type(), Some("logging"));
        assert_eq!(model.get("enabled"), &AttrValue::Bool(true));
        assert_eq!(model.get("change_subscription"), &AttrValue::set(Vec::<String>::new()));
        assert!(model.get("description").is_null());
        assert!(model.get("script_class").is_null());
        assert!(model.notifications.contains("handler registered"));
        assert_eq!(model.required_actions[0].synopsis, "check the log");
    }

    #[test]
    fn test_read_object_rejects_unknown_type_urn() {
        let schema = &change_subscription_handler::RESOURCE;
        let body = json!({"schemas": ["urn:pingidentity:schemas:configuration:2.0:change-subscription-handler:syslog"]});
        let err = read_object(schema, "/x", None, &body, None).unwrap_err();
        assert!(matches!(err, ConfigApiError::InvalidResponse { .. }));
    }

    #[test]
    fn test_read_object_rejects_kind_mismatch() {
        let schema = &replication_server::RESOURCE;
        let body = json!({"replicationServerID": {"nested": true}});
        let err = read_object(schema, "/x", Some("Multimaster"), &body, None).unwrap_err();
        assert!(err.to_string().contains("replicationServerID"));
    }

    #[test]
    fn test_read_object_keeps_planned_sensitive_value() {
        let schema = &otp_delivery_mechanism::RESOURCE;
        let mut planned = ResourceModel::default();
        planned.set("twilio_auth_token", AttrValue::string("s3cret"));
        let body = json!({
            "schemas": ["urn:pingidentity:schemas:configuration:2.0:otp-delivery-mechanism:twilio"],
            "id": "sms",
            "enabled": true,
            "twilioAccountSID": "AC123",
            "senderPhoneNumber": ["+15555550100"]
        });

        let model = read_object(schema, "/x", None, &body, Some(&planned)).unwrap();
        assert_eq!(model.get("twilio_auth_token"), &AttrValue::string("s3cret"));

        let imported = read_object(schema, "/x", None, &body, None).unwrap();
        assert!(imported.get("twilio_auth_token").is_null());
    }

    #[test]
    fn test_read_nested_object_uses_requested_key() {
        let schema = &replication_server::RESOURCE;
        let body = json!({
            "schemas": ["urn:pingidentity:schemas:configuration:2.0:replication-server"],
            "replicationServerID": 1,
            "replicationPort": 8989
        });
        let model = read_object(schema, "/x", Some("Multimaster Synchronization"), &body, None)
            .unwrap();
        assert_eq!(model.key.as_deref(), Some("Multimaster Synchronization"));
        assert_eq!(model.get("replication_port"), &AttrValue::Int64(8989));
        assert_eq!(model.sub_type(), None);
    }
}
