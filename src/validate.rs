//! Cross-field rules between the `type` discriminant and the other attributes.

use crate::diagnostics::Diagnostics;
use crate::resource::ResourceModel;
use crate::schema::{Presence, ResourceSchema};
use crate::value::AttrValue;

/// Checks a desired model against its schema. Every violation is collected.
pub fn validate(schema: &ResourceSchema, model: &ResourceModel) -> Diagnostics {
    let mut diags = Diagnostics::new();
    let sub_type = check_sub_type(schema, model, &mut diags);

    for attribute in schema.attributes {
        let value = model.get(attribute.name);

        if let Some(sub_type) = sub_type
            && value.is_set()
            && !attribute.applies_to(Some(sub_type))
        {
            diags.error(
                Some(attribute.name),
                "Invalid attribute for type",
                format!(
                    "'{}' is only allowed when type is one of [{}], but type is \"{sub_type}\"",
                    attribute.name,
                    attribute.sub_types.join(", ")
                ),
            );
            continue;
        }

        if attribute.presence == Presence::Required && value.is_null() {
            diags.error(
                Some(attribute.name),
                "Missing required attribute",
                format!("'{}' must be set", attribute.name),
            );
        }

        if let Some(sub_type) = sub_type
            && attribute.required_for.contains(&sub_type)
            && !value.is_set()
            && !value.is_unknown()
        {
            diags.error(
                Some(attribute.name),
                "Missing required attribute for type",
                format!(
                    "'{}' must be set when type is \"{sub_type}\"",
                    attribute.name
                ),
            );
        }

        check_allowed_values(attribute.name, attribute.allowed_values, value, &mut diags);
    }

    diags
}

/// Returns the selected sub-type when it is valid for the schema.
fn check_sub_type<'a>(
    schema: &ResourceSchema,
    model: &'a ResourceModel,
    diags: &mut Diagnostics,
) -> Option<&'a str> {
    match (schema.is_polymorphic(), model.sub_type()) {
        (true, None) => {
            diags.error(
                Some("type"),
                "Missing required attribute",
                format!(
                    "{} requires 'type', one of [{}]",
                    schema.display_name,
                    schema.sub_type_names().join(", ")
                ),
            );
            None
        }
        (true, Some(sub_type)) if schema.sub_type(sub_type).is_none() => {
            diags.error(
                Some("type"),
                "Invalid attribute value",
                format!(
                    "\"{sub_type}\" is not a {} type; expected one of [{}]",
                    schema.display_name,
                    schema.sub_type_names().join(", ")
                ),
            );
            None
        }
        (true, Some(sub_type)) => Some(sub_type),
        (false, Some(_)) => {
            diags.error(
                Some("type"),
                "Unsupported attribute",
                format!("{} has no sub-types", schema.display_name),
            );
            None
        }
        (false, None) => None,
    }
}

fn check_allowed_values(
    name: &str,
    allowed: &[&str],
    value: &AttrValue,
    diags: &mut Diagnostics,
) {
    if allowed.is_empty() {
        return;
    }
    let offending: Vec<&str> = match value {
        AttrValue::String(value) => vec![value.as_str()],
        AttrValue::StringSet(members) => members.iter().map(String::as_str).collect(),
        _ => Vec::new(),
    };
    for candidate in offending {
        if !allowed.contains(&candidate) {
            diags.error(
                Some(name),
                "Invalid attribute value",
                format!(
                    "\"{candidate}\" is not one of [{}]",
                    allowed.join(", ")
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{
        change_subscription_handler, crypto_manager, otp_delivery_mechanism, password_validator,
    };

    fn handler(sub_type: &str) -> ResourceModel {
        let mut model = ResourceModel {
            key: Some("handler".to_string()),
            sub_type: Some(sub_type.to_string()),
            ..Default::default()
        };
        model.set("enabled", AttrValue::Bool(true));
        model
    }

    #[test]
    fn test_script_class_rejected_for_logging() {
        let mut model = handler("logging");
        model.set("script_class", AttrValue::string("com.example.Handler"));

        let diags = validate(&change_subscription_handler::RESOURCE, &model);
        let error = diags.errors().next().unwrap();
        assert_eq!(error.attribute.as_deref(), Some("script_class"));
        assert!(error.detail.contains("groovy-scripted"));
    }

    #[test]
    fn test_script_class_accepted_for_groovy_scripted() {
        let mut model = handler("groovy-scripted");
        model.set("script_class", AttrValue::string("com.example.Handler"));

        let diags = validate(&change_subscription_handler::RESOURCE, &model);
        assert!(!diags.has_errors(), "{diags}");
    }

    #[test]
    fn test_required_companion_missing() {
        let model = handler("groovy-scripted");
        let diags = validate(&change_subscription_handler::RESOURCE, &model);
        let error = diags.errors().next().unwrap();
        assert_eq!(error.attribute.as_deref(), Some("script_class"));
        assert_eq!(error.summary, "Missing required attribute for type");
    }

    #[test]
    fn test_all_violations_reported_together() {
        let mut model = handler("logging");
        model.set("enabled", AttrValue::Null);
        model.set("script_class", AttrValue::string("com.example.Handler"));
        model.set("extension_class", AttrValue::string("com.example.Ext"));

        let diags = validate(&change_subscription_handler::RESOURCE, &model);
        assert_eq!(diags.errors().count(), 3);
    }

    #[test]
    fn test_missing_and_unknown_type() {
        let mut model = handler("logging");
        model.sub_type = None;
        let diags = validate(&change_subscription_handler::RESOURCE, &model);
        assert!(diags.errors().any(|d| d.attribute.as_deref() == Some("type")));

        let model = handler("syslog");
        let diags = validate(&change_subscription_handler::RESOURCE, &model);
        let error = diags.errors().next().unwrap();
        assert!(error.detail.contains("\"syslog\" is not a"));
    }

    #[test]
    fn test_type_rejected_on_single_type_resource() {
        let model = ResourceModel {
            sub_type: Some("anything".to_string()),
            ..Default::default()
        };
        let diags = validate(&crypto_manager::RESOURCE, &model);
        assert!(diags.errors().any(|d| d.summary == "Unsupported attribute"));
    }

    #[test]
    fn test_allowed_values_checked_for_sets() {
        let mut model = ResourceModel::default();
        model.set("ssl_protocol", AttrValue::set(["TLSv1.3", "SSLv2"]));
        let diags = validate(&crypto_manager::RESOURCE, &model);
        let error = diags.errors().next().unwrap();
        assert!(error.detail.contains("\"SSLv2\""));
    }

    fn from_document(schema: &ResourceSchema, document: serde_json::Value) -> ResourceModel {
        let serde_json::Value::Object(values) = document else {
            panic!("expected object");
        };
        ResourceModel::from_config(schema, &values).unwrap()
    }

    #[test]
    fn test_omitted_required_set_rejected_for_twilio() {
        let schema = &otp_delivery_mechanism::RESOURCE;
        let model = from_document(
            schema,
            serde_json::json!({"name": "sms", "type": "twilio", "enabled": true,
                               "twilio_account_sid": "AC1"}),
        );

        let diags = validate(schema, &model);
        let error = diags.errors().next().unwrap();
        assert_eq!(diags.errors().count(), 1);
        assert_eq!(error.attribute.as_deref(), Some("sender_phone_number"));
        assert_eq!(error.summary, "Missing required attribute for type");
    }

    #[test]
    fn test_omitted_character_set_rejected() {
        let schema = &password_validator::RESOURCE;
        let model = from_document(
            schema,
            serde_json::json!({"name": "charset", "type": "character-set", "enabled": true,
                               "allow_unclassified_characters": false}),
        );

        let diags = validate(schema, &model);
        assert!(
            diags
                .errors()
                .any(|d| d.attribute.as_deref() == Some("character_set"))
        );
    }

    #[test]
    fn test_empty_required_set_rejected() {
        let schema = &otp_delivery_mechanism::RESOURCE;
        let model = from_document(
            schema,
            serde_json::json!({"name": "sms", "type": "twilio", "enabled": true,
                               "twilio_account_sid": "AC1", "sender_phone_number": []}),
        );
        assert!(validate(schema, &model).has_errors());
    }
}
