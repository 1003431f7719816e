//! Minimal PATCH operation synthesis.
//!
//! Walks the attribute table of the active sub-type and compares plan against
//! state field by field. The output order is the table order, so identical
//! inputs always serialize to identical request bodies.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use crate::resource::ResourceModel;
use crate::schema::{AttributeKind, ResourceSchema};
use crate::value::AttrValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Add,
    Remove,
    Replace,
}

/// One entry of a configuration API update request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    pub op: OpKind,
    /// Wire name of the attribute.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Operation {
    pub fn replace(path: &str, value: Value) -> Self {
        Self {
            op: OpKind::Replace,
            path: path.to_string(),
            value: Some(value),
        }
    }

    /// Clears a scalar.
    pub fn clear(path: &str) -> Self {
        Self {
            op: OpKind::Remove,
            path: path.to_string(),
            value: None,
        }
    }

    pub fn add_members(path: &str, members: &BTreeSet<&String>) -> Self {
        Self {
            op: OpKind::Add,
            path: path.to_string(),
            value: Some(members_json(members)),
        }
    }

    pub fn remove_members(path: &str, members: &BTreeSet<&String>) -> Self {
        Self {
            op: OpKind::Remove,
            path: path.to_string(),
            value: Some(members_json(members)),
        }
    }
}

fn members_json(members: &BTreeSet<&String>) -> Value {
    Value::Array(
        members
            .iter()
            .map(|member| Value::String((*member).clone()))
            .collect(),
    )
}

/// Body of `PATCH` requests: `{"operations": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateRequest {
    pub operations: Vec<Operation>,
}

/// Computes the operations that move `state` to `plan`.
///
/// Only attributes of the plan's sub-type are considered. Unknown planned
/// values are skipped, they will be read back after the update.
pub fn synthesize(
    schema: &ResourceSchema,
    plan: &ResourceModel,
    state: &ResourceModel,
) -> Vec<Operation> {
    let mut ops = Vec::new();
    for attribute in schema.active_attributes(plan.sub_type()) {
        if !attribute.presence.is_configurable() {
            continue;
        }
        let planned = plan.get(attribute.name);
        let current = state.get(attribute.name);
        match attribute.kind {
            AttributeKind::StringSet => {
                add_set_operations(&mut ops, attribute.wire_name, planned, current)
            }
            _ => add_scalar_operation(&mut ops, attribute.wire_name, planned, current),
        }
    }
    ops
}

fn add_scalar_operation(
    ops: &mut Vec<Operation>,
    path: &str,
    planned: &AttrValue,
    current: &AttrValue,
) {
    if planned.is_unknown() || planned.same_as(current) {
        return;
    }
    if planned.is_null() {
        ops.push(Operation::clear(path));
    } else {
        ops.push(Operation::replace(path, planned.to_json()));
    }
}

fn add_set_operations(
    ops: &mut Vec<Operation>,
    path: &str,
    planned: &AttrValue,
    current: &AttrValue,
) {
    if planned.is_unknown() {
        return;
    }
    let empty = BTreeSet::new();
    let planned = planned.as_set().unwrap_or(&empty);
    let current = current.as_set().unwrap_or(&empty);

    let added: BTreeSet<&String> = planned.difference(current).collect();
    let removed: BTreeSet<&String> = current.difference(planned).collect();

    if !added.is_empty() {
        ops.push(Operation::add_members(path, &added));
    }
    if !removed.is_empty() {
        ops.push(Operation::remove_members(path, &removed));
    }
}
