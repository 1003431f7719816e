use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::diagnostics::Diagnostics;
use crate::schema::{Endpoint, ResourceSchema};
use crate::value::AttrValue;

static NULL: AttrValue = AttrValue::Null;

/// Config document keys that are not attributes.
const RESERVED_KEYS: &[&str] = &["resource", "type"];

/// Follow-up the server asks for after a change, e.g. a restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RequiredAction {
    #[serde(default)]
    pub property: Option<String>,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub synopsis: String,
}

/// Desired or recorded state of one configuration object.
///
/// Holds every attribute of every sub-type; `sub_type` decides which of them
/// are meaningful.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceModel {
    pub id: Option<String>,
    /// Object name, or parent name for nested objects. `None` for singletons.
    pub key: Option<String>,
    pub sub_type: Option<String>,
    pub attributes: BTreeMap<String, AttrValue>,
    pub notifications: BTreeSet<String>,
    pub required_actions: Vec<RequiredAction>,
}

/// A user-supplied configuration document:
/// `{"resource": "<type name>", "name": "...", "type": "...", <attributes>}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourceConfig {
    pub resource: String,
    #[serde(flatten)]
    pub values: Map<String, Value>,
}

impl ResourceModel {
    pub fn get(&self, name: &str) -> &AttrValue {
        self.attributes.get(name).unwrap_or(&NULL)
    }

    pub fn set(&mut self, name: &str, value: AttrValue) {
        self.attributes.insert(name.to_string(), value);
    }

    pub fn sub_type(&self) -> Option<&str> {
        self.sub_type.as_deref()
    }

    /// State address, `<type name>.<id>`.
    pub fn address(&self, schema: &ResourceSchema) -> String {
        format!(
            "{}.{}",
            schema.type_name,
            self.id.clone().unwrap_or_else(|| object_id(schema, self.key.as_deref()))
        )
    }

    /// Builds the desired model from a config document, reporting every
    /// structural problem at once.
    ///
    /// Computed attributes left out become unknown, unless the selected type
    /// requires them. Everything else left out becomes null.
    pub fn from_config(
        schema: &ResourceSchema,
        values: &Map<String, Value>,
    ) -> Result<Self, Diagnostics> {
        let mut diags = Diagnostics::new();
        let key_attribute = schema.endpoint.key_attribute();

        let key = match key_attribute {
            Some(key_attribute) => match values.get(key_attribute) {
                Some(Value::String(key)) if !key.is_empty() => Some(key.clone()),
                Some(_) => {
                    diags.error(
                        Some(key_attribute),
                        "Invalid attribute value",
                        "expected a non-empty string",
                    );
                    None
                }
                None => {
                    diags.error(
                        Some(key_attribute),
                        "Missing required attribute",
                        format!("{} requires '{key_attribute}'", schema.display_name),
                    );
                    None
                }
            },
            None => None,
        };

        let sub_type = match values.get("type") {
            Some(Value::String(sub_type)) => Some(sub_type.clone()),
            Some(_) => {
                diags.error(Some("type"), "Invalid attribute value", "expected a string");
                None
            }
            None => None,
        };

        let mut attributes = BTreeMap::new();
        for (name, raw) in values {
            if RESERVED_KEYS.contains(&name.as_str()) || Some(name.as_str()) == key_attribute {
                continue;
            }
            let Some(attribute) = schema.attribute(name) else {
                diags.error(
                    Some(name),
                    "Unsupported attribute",
                    format!("{} has no attribute named '{name}'", schema.display_name),
                );
                continue;
            };
            if !attribute.presence.is_configurable() {
                diags.error(
                    Some(name),
                    "Read-only attribute",
                    "this attribute is computed by the server and cannot be configured",
                );
                continue;
            }
            match AttrValue::from_json(attribute.kind, raw) {
                Some(value) => {
                    attributes.insert(name.clone(), value);
                }
                None => diags.error(
                    Some(name),
                    "Invalid attribute value",
                    format!("expected {}", attribute.kind.label()),
                ),
            }
        }

        for attribute in schema.attributes {
            let required_for_type = sub_type
                .as_deref()
                .is_some_and(|sub_type| attribute.required_for.contains(&sub_type));
            attributes
                .entry(attribute.name.to_string())
                .or_insert_with(|| {
                    if attribute.presence.is_computed() && !required_for_type {
                        AttrValue::Unknown
                    } else {
                        AttrValue::Null
                    }
                });
        }

        diags.into_result()?;
        Ok(Self {
            id: None,
            key,
            sub_type,
            attributes,
            notifications: BTreeSet::new(),
            required_actions: Vec::new(),
        })
    }
}

/// The id an object is tracked under: its name, its parent's name, or the
/// singleton's object name.
pub fn object_id(schema: &ResourceSchema, key: Option<&str>) -> String {
    match (schema.endpoint, key) {
        (Endpoint::Singleton(_), _) | (_, None) => schema.urn_object.to_string(),
        (_, Some(key)) => key.to_string(),
    }
}
