//! Create/read/update/delete orchestration for any resource schema.

use thiserror::Error;

use crate::api::{self, ConfigApi, ConfigApiError};
use crate::diff::{self, UpdateRequest};
use crate::plan::{Action, Plan};
use crate::resource::ResourceModel;
use crate::schema::{Endpoint, ResourceSchema};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Api(#[from] ConfigApiError),

    #[error("{resource} '{id}' does not exist on the server")]
    Missing { resource: String, id: String },

    #[error("{resource} requires a key ('{attribute}')")]
    MissingKey {
        resource: String,
        attribute: &'static str,
    },

    #[error("{resource} objects cannot be created, use the default_ variant to adopt them")]
    NotCreatable { resource: String },

    #[error("{resource} '{id}' has type {found} on the server, but the configuration uses {expected}")]
    TypeMismatch {
        resource: String,
        id: String,
        expected: String,
        found: String,
    },
}

/// Runs lifecycle steps for one resource type against the configuration API.
pub struct ResourceHandler<'a> {
    schema: &'a ResourceSchema,
    api: &'a dyn ConfigApi,
}

impl<'a> ResourceHandler<'a> {
    pub fn new(schema: &'a ResourceSchema, api: &'a dyn ConfigApi) -> Self {
        Self { schema, api }
    }

    pub fn schema(&self) -> &ResourceSchema {
        self.schema
    }

    /// Carries out a plan and returns the new state.
    pub async fn apply(
        &self,
        plan: &Plan,
        state: Option<&ResourceModel>,
    ) -> Result<ResourceModel, HandlerError> {
        match (plan.action, state) {
            (Action::Create | Action::Adopt, _) | (_, None) => self.create(&plan.planned).await,
            (Action::Replace, Some(state)) => {
                self.delete(state).await?;
                self.create(&plan.planned).await
            }
            (Action::Update | Action::NoOp, Some(state)) => {
                self.update(&plan.planned, state).await
            }
        }
    }

    /// Creates the object, or adopts it for adopt-existing resources.
    pub async fn create(&self, planned: &ResourceModel) -> Result<ResourceModel, HandlerError> {
        if self.schema.is_adopt_existing() {
            return self.adopt(planned).await;
        }

        let collection = self
            .schema
            .endpoint
            .collection_path()
            .ok_or_else(|| HandlerError::NotCreatable {
                resource: self.schema.display_name.to_string(),
            })?;
        let path = self.object_path(planned.key.as_deref())?;
        let body = api::add_request(self.schema, planned);

        let response = self.api.create(&collection, &body).await?;
        let created = api::read_object(
            self.schema,
            &path,
            planned.key.as_deref(),
            &response,
            Some(planned),
        )?;

        tracing::info!(
            resource = self.schema.type_name,
            id = created.id.as_deref().unwrap_or_default(),
            "created"
        );
        log_messages(self.schema, &created);
        Ok(created)
    }

    /// Reads the current object and patches it toward the plan.
    ///
    /// The server never echoes sensitive values, so the existing object is
    /// read without the plan and every planned sensitive value is sent.
    async fn adopt(&self, planned: &ResourceModel) -> Result<ResourceModel, HandlerError> {
        let existing = self
            .fetch(planned.key.as_deref(), None)
            .await?
            .ok_or_else(|| self.missing(planned.key.as_deref()))?;

        if existing.sub_type != planned.sub_type {
            return Err(HandlerError::TypeMismatch {
                resource: self.schema.display_name.to_string(),
                id: existing.id.clone().unwrap_or_default(),
                expected: planned.sub_type.clone().unwrap_or_default(),
                found: existing.sub_type.clone().unwrap_or_default(),
            });
        }

        tracing::info!(
            resource = self.schema.type_name,
            id = existing.id.as_deref().unwrap_or_default(),
            "adopting existing configuration object"
        );
        self.update(planned, &existing).await
    }

    /// Refreshes tracked state. `Ok(None)` means a managed object is gone and
    /// should be dropped from state.
    pub async fn read(&self, state: &ResourceModel) -> Result<Option<ResourceModel>, HandlerError> {
        match self.fetch(state.key.as_deref(), Some(state)).await? {
            Some(current) => Ok(Some(current)),
            None if self.schema.is_adopt_existing() => Err(self.missing(state.key.as_deref())),
            None => {
                tracing::warn!(
                    resource = self.schema.type_name,
                    id = state.id.as_deref().unwrap_or_default(),
                    "object no longer exists, removing it from state"
                );
                Ok(None)
            }
        }
    }

    /// Sends the minimal set of operations. No network call when there is
    /// nothing to change.
    pub async fn update(
        &self,
        planned: &ResourceModel,
        state: &ResourceModel,
    ) -> Result<ResourceModel, HandlerError> {
        let operations = diff::synthesize(self.schema, planned, state);
        if operations.is_empty() {
            tracing::info!(
                resource = self.schema.type_name,
                id = state.id.as_deref().unwrap_or_default(),
                "no changes to apply"
            );
            return Ok(resolve_unknowns(planned, state));
        }

        let path = self.object_path(state.key.as_deref())?;
        let request = UpdateRequest { operations };
        let response = self.api.update(&path, &request).await?;
        let updated = api::read_object(
            self.schema,
            &path,
            state.key.as_deref(),
            &response,
            Some(planned),
        )?;

        tracing::info!(
            resource = self.schema.type_name,
            id = updated.id.as_deref().unwrap_or_default(),
            operations = request.operations.len(),
            "updated"
        );
        log_messages(self.schema, &updated);
        Ok(updated)
    }

    /// Deletes a managed object. Adopt-existing objects are only untracked.
    pub async fn delete(&self, state: &ResourceModel) -> Result<(), HandlerError> {
        if self.schema.is_adopt_existing() {
            tracing::info!(
                resource = self.schema.type_name,
                id = state.id.as_deref().unwrap_or_default(),
                "no-op delete, the configuration object stays on the server"
            );
            return Ok(());
        }

        let path = self.object_path(state.key.as_deref())?;
        match self.api.delete(&path).await {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                tracing::warn!(path = %path, "object was already deleted");
            }
            Err(err) => return Err(err.into()),
        }
        tracing::info!(
            resource = self.schema.type_name,
            id = state.id.as_deref().unwrap_or_default(),
            "deleted"
        );
        Ok(())
    }

    /// Imports by id: the object name, the parent name for nested objects,
    /// ignored for singletons.
    pub async fn import(&self, id: Option<&str>) -> Result<ResourceModel, HandlerError> {
        let key = self.schema.endpoint.key_attribute().and(id);
        self.fetch(key, None)
            .await?
            .ok_or_else(|| self.missing(key))
    }

    /// Data source lookup. A missing object is always an error.
    pub async fn read_data_source(&self, key: Option<&str>) -> Result<ResourceModel, HandlerError> {
        self.fetch(key, None)
            .await?
            .ok_or_else(|| self.missing(key))
    }

    async fn fetch(
        &self,
        key: Option<&str>,
        known: Option<&ResourceModel>,
    ) -> Result<Option<ResourceModel>, HandlerError> {
        let path = self.object_path(key)?;
        match self.api.get(&path).await {
            Ok(body) => Ok(Some(api::read_object(
                self.schema,
                &path,
                key,
                &body,
                known,
            )?)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn object_path(&self, key: Option<&str>) -> Result<String, HandlerError> {
        self.schema
            .endpoint
            .object_path(key)
            .ok_or_else(|| HandlerError::MissingKey {
                resource: self.schema.display_name.to_string(),
                attribute: self.schema.endpoint.key_attribute().unwrap_or("name"),
            })
    }

    fn missing(&self, key: Option<&str>) -> HandlerError {
        HandlerError::Missing {
            resource: self.schema.display_name.to_string(),
            id: match self.schema.endpoint {
                Endpoint::Singleton(path) => path.to_string(),
                _ => key.unwrap_or_default().to_string(),
            },
        }
    }
}

/// The plan with its unknowns taken from the current state.
fn resolve_unknowns(planned: &ResourceModel, state: &ResourceModel) -> ResourceModel {
    let mut resolved = planned.clone();
    for (name, value) in resolved.attributes.iter_mut() {
        if value.is_unknown() {
            *value = state.get(name).clone();
        }
    }
    resolved.id = state.id.clone().or(resolved.id);
    resolved.notifications = state.notifications.clone();
    resolved.required_actions = state.required_actions.clone();
    resolved
}

fn log_messages(schema: &ResourceSchema, model: &ResourceModel) {
    for notification in &model.notifications {
        tracing::warn!(resource = schema.type_name, %notification, "server notification");
    }
    for action in &model.required_actions {
        tracing::warn!(
            resource = schema.type_name,
            action = %action.type_,
            property = action.property.as_deref().unwrap_or_default(),
            synopsis = %action.synopsis,
            "server requires follow-up action"
        );
    }
}
