//! Turns a validated config model and the prior state into a concrete plan.

use std::fmt;

use crate::diagnostics::Diagnostics;
use crate::diff::{self, Operation};
use crate::resource::{ResourceModel, object_id};
use crate::schema::ResourceSchema;
use crate::validate;
use crate::value::AttrValue;
use crate::version::{self, ProductVersion};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// POST a new object.
    Create,
    /// Take over a pre-existing object, patching it toward the plan.
    Adopt,
    /// PATCH the tracked object.
    Update,
    /// The key or type changed: delete the tracked object, then create.
    Replace,
    NoOp,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Create => "create",
            Self::Adopt => "adopt",
            Self::Update => "update in-place",
            Self::Replace => "replace",
            Self::NoOp => "no changes",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct Plan {
    pub action: Action,
    pub planned: ResourceModel,
    /// For updates, the exact request; for creates, a preview against an
    /// empty object.
    pub operations: Vec<Operation>,
}

/// Validates, version-gates and modifies the desired model, then decides
/// what applying it takes. Nothing here touches the network.
pub fn plan(
    schema: &ResourceSchema,
    config: ResourceModel,
    state: Option<&ResourceModel>,
    product_version: ProductVersion,
) -> Result<Plan, Diagnostics> {
    let mut diags = validate::validate(schema, &config);
    diags.extend(version::check_supported(schema, &config, product_version));
    diags.into_result()?;

    let mut planned = modify_plan(schema, config, state);
    // Attributes newer than the server get no default.
    for attribute in schema.attributes {
        if attribute
            .min_version
            .is_some_and(|minimum| !product_version.is_at_least(minimum))
        {
            planned.set(attribute.name, AttrValue::Null);
        }
    }

    let (action, operations) = match state {
        None if schema.is_adopt_existing() => (Action::Adopt, Vec::new()),
        None => (
            Action::Create,
            diff::synthesize(schema, &planned, &ResourceModel::default()),
        ),
        Some(state) if requires_replace(&planned, state) => (
            Action::Replace,
            diff::synthesize(schema, &planned, &ResourceModel::default()),
        ),
        Some(state) => {
            let operations = diff::synthesize(schema, &planned, state);
            if operations.is_empty() {
                (Action::NoOp, operations)
            } else {
                (Action::Update, operations)
            }
        }
    };

    tracing::debug!(
        resource = schema.type_name,
        %action,
        operations = operations.len(),
        "plan computed"
    );

    Ok(Plan {
        action,
        planned,
        operations,
    })
}

/// Fills in what the config leaves open.
///
/// Attributes outside the selected sub-type are nulled. Undefined attributes
/// with a default for the sub-type take it. Remaining unknowns keep the prior
/// state's value when the object is not being replaced.
pub fn modify_plan(
    schema: &ResourceSchema,
    mut planned: ResourceModel,
    state: Option<&ResourceModel>,
) -> ResourceModel {
    planned.id = Some(object_id(schema, planned.key.as_deref()));
    let prior = state.filter(|state| !requires_replace(&planned, state));
    let sub_type = planned.sub_type.clone();

    for attribute in schema.attributes {
        let current = planned.get(attribute.name).clone();
        let next = if !attribute.applies_to(sub_type.as_deref()) {
            AttrValue::Null
        } else if !current.is_defined()
            && let Some(default) = attribute.default_for(sub_type.as_deref())
        {
            default
        } else if current.is_unknown()
            && let Some(prior) = prior
        {
            prior.get(attribute.name).clone()
        } else {
            current
        };
        planned.set(attribute.name, next);
    }

    if let Some(prior) = prior {
        planned.notifications = prior.notifications.clone();
        planned.required_actions = prior.required_actions.clone();
    }
    planned
}

fn requires_replace(planned: &ResourceModel, state: &ResourceModel) -> bool {
    planned.key != state.key || planned.sub_type != state.sub_type
}
