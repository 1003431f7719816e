//! Local state store.
//!
//! Holds the last-known state of every tracked object as JSON, keyed by
//! address (`<type name>.<id>`). Loaded at the start of each invocation and
//! written back after each successful lifecycle step.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::resource::{RequiredAction, ResourceModel, object_id};
use crate::schema::ResourceSchema;
use crate::value::AttrValue;

pub const STATE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to access state file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("state file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("state file version {found} is not supported (expected {STATE_FORMAT_VERSION})")]
    UnsupportedVersion { found: u32 },

    #[error("corrupt state for '{address}': {message}")]
    Corrupt { address: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResource {
    pub resource: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub notifications: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_actions: Vec<RequiredAction>,
}

impl StoredResource {
    /// Unknown values cannot be persisted and are stored as null.
    pub fn from_model(schema: &ResourceSchema, model: &ResourceModel) -> Self {
        let attributes = schema
            .attributes
            .iter()
            .map(|attribute| {
                (
                    attribute.name.to_string(),
                    model.get(attribute.name).to_json(),
                )
            })
            .collect();

        Self {
            resource: schema.type_name.to_string(),
            id: model
                .id
                .clone()
                .unwrap_or_else(|| object_id(schema, model.key.as_deref())),
            key: model.key.clone(),
            sub_type: model.sub_type.clone(),
            attributes,
            notifications: model.notifications.clone(),
            required_actions: model.required_actions.clone(),
        }
    }

    pub fn address(&self) -> String {
        format!("{}.{}", self.resource, self.id)
    }

    pub fn into_model(self, schema: &ResourceSchema) -> Result<ResourceModel, StateError> {
        let address = self.address();
        let mut model = ResourceModel {
            id: Some(self.id),
            key: self.key,
            sub_type: self.sub_type,
            notifications: self.notifications,
            required_actions: self.required_actions,
            ..Default::default()
        };

        for attribute in schema.attributes {
            let value = match self.attributes.get(attribute.name) {
                Some(raw) => AttrValue::from_json(attribute.kind, raw).ok_or_else(|| {
                    StateError::Corrupt {
                        address: address.clone(),
                        message: format!(
                            "expected {} for '{}'",
                            attribute.kind.label(),
                            attribute.name
                        ),
                    }
                })?,
                None => AttrValue::Null,
            };
            model.set(attribute.name, value);
        }
        Ok(model)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateFile {
    pub version: u32,
    #[serde(default)]
    pub resources: BTreeMap<String, StoredResource>,
}

impl Default for StateFile {
    fn default() -> Self {
        Self {
            version: STATE_FORMAT_VERSION,
            resources: BTreeMap::new(),
        }
    }
}

impl StateFile {
    pub fn get(&self, address: &str) -> Option<&StoredResource> {
        self.resources.get(address)
    }

    pub fn put(&mut self, stored: StoredResource) {
        self.resources.insert(stored.address(), stored);
    }

    pub fn remove(&mut self, address: &str) -> Option<StoredResource> {
        self.resources.remove(address)
    }
}

#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_DATA_HOME/pdconfig/state.json` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("pdconfig").join("state.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty state.
    pub fn load(&self) -> Result<StateFile, StateError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no state file yet");
                return Ok(StateFile::default());
            }
            Err(source) => {
                return Err(StateError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let state: StateFile =
            serde_json::from_str(&contents).map_err(|source| StateError::Parse {
                path: self.path.clone(),
                source,
            })?;
        if state.version != STATE_FORMAT_VERSION {
            return Err(StateError::UnsupportedVersion {
                found: state.version,
            });
        }
        Ok(state)
    }

    /// Writes through a temporary file so a crash never leaves half a state file.
    pub fn save(&self, state: &StateFile) -> Result<(), StateError> {
        let io_err = |source| StateError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(state).map_err(|source| StateError::Parse {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;

        tracing::debug!(
            path = %self.path.display(),
            resources = state.resources.len(),
            "state saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{change_subscription_handler, crypto_manager, password_validator};
    use serde_json::json;

    fn handler_model() -> ResourceModel {
        let mut model = ResourceModel {
            id: Some("audit".to_string()),
            key: Some("audit".to_string()),
            sub_type: Some("logging".to_string()),
            ..Default::default()
        };
        model.set("enabled", AttrValue::Bool(true));
        model.set("log_file", AttrValue::string("logs/change-notifications.log"));
        model.set("change_subscription", AttrValue::set(["sub-a"]));
        model.required_actions.push(RequiredAction {
            property: None,
            type_: "other".to_string(),
            synopsis: "reload".to_string(),
        });
        model
    }

    #[test]
    fn test_stored_resource_restores_model() {
        let schema = &change_subscription_handler::RESOURCE;
        let stored = StoredResource::from_model(schema, &handler_model());
        assert_eq!(stored.address(), "pingdirectory_change_subscription_handler.audit");
        assert_eq!(stored.attributes["change_subscription"], json!(["sub-a"]));

        let model = stored.into_model(schema).unwrap();
        assert_eq!(model.get("enabled"), &AttrValue::Bool(true));
        assert_eq!(model.get("change_subscription"), &AttrValue::set(["sub-a"]));
        assert!(model.get("script_class").is_null());
        assert_eq!(model.required_actions.len(), 1);
    }

    #[test]
    fn test_unknown_values_stored_as_null() {
        let schema = &change_subscription_handler::RESOURCE;
        let mut model = handler_model();
        model.set("description", AttrValue::Unknown);
        let stored = StoredResource::from_model(schema, &model);
        assert_eq!(stored.attributes["description"], Value::Null);
    }

    #[test]
    fn test_singleton_address() {
        let schema = &crypto_manager::RESOURCE;
        let stored = StoredResource::from_model(schema, &ResourceModel::default());
        assert_eq!(
            stored.address(),
            "pingdirectory_default_crypto_manager.crypto-manager"
        );
    }

    #[test]
    fn test_corrupt_attribute_is_reported() {
        let schema = &change_subscription_handler::RESOURCE;
        let mut stored = StoredResource::from_model(schema, &handler_model());
        stored.attributes.insert("enabled".to_string(), json!([1]));
        let err = stored.into_model(schema).unwrap_err();
        assert!(matches!(err, StateError::Corrupt { .. }));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));
        let state = store.load().unwrap();
        assert!(state.resources.is_empty());
        assert_eq!(state.version, STATE_FORMAT_VERSION);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("nested").join("state.json"));
        let schema = &change_subscription_handler::RESOURCE;

        let mut state = StateFile::default();
        state.put(StoredResource::from_model(schema, &handler_model()));
        store.save(&state).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, state);
        assert!(
            loaded
                .get("pingdirectory_change_subscription_handler.audit")
                .is_some()
        );
    }

    #[test]
    fn test_load_rejects_garbage_and_future_versions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = StateStore::new(&path);

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(store.load(), Err(StateError::Parse { .. })));

        std::fs::write(&path, r#"{"version": 7, "resources": {}}"#).unwrap();
        assert!(matches!(
            store.load(),
            Err(StateError::UnsupportedVersion { found: 7 })
        ));
    }

    #[test]
    fn test_remove() {
        let schema = &change_subscription_handler::RESOURCE;
        let mut state = StateFile::default();
        state.put(StoredResource::from_model(schema, &handler_model()));
        let removed = state.remove("pingdirectory_change_subscription_handler.audit");
        assert!(removed.is_some());
        assert!(state.resources.is_empty());
    }

    #[test]
    fn test_dot_prefixed_name_keeps_its_address() {
        let schema = &password_validator::RESOURCE;
        let mut model = ResourceModel {
            id: Some(".strict".to_string()),
            key: Some(".strict".to_string()),
            sub_type: Some("length-based".to_string()),
            ..Default::default()
        };
        model.set("enabled", AttrValue::Bool(true));

        let stored = StoredResource::from_model(schema, &model);
        assert_eq!(stored.id, ".strict");
        assert_eq!(stored.address(), model.address(schema));
        assert_eq!(stored.address(), "pingdirectory_password_validator..strict");

        let mut state = StateFile::default();
        state.put(stored);
        let restored = state
            .get(&model.address(schema))
            .cloned()
            .unwrap()
            .into_model(schema)
            .unwrap();
        assert_eq!(restored.id.as_deref(), Some(".strict"));
        assert_eq!(restored.get("enabled"), &AttrValue::Bool(true));
    }
}
