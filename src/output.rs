//! Terminal rendering for plans, resource listings and schemas.

use tabled::settings::Style;
use tabled::{Table, Tabled};
use termtree::Tree;

use crate::diff::{OpKind, Operation};
use crate::plan::Plan;
use crate::resource::ResourceModel;
use crate::schema::{Attribute, Endpoint, Lifecycle, Presence, ResourceSchema};
use crate::terraform::state::StateFile;

#[derive(Tabled)]
struct OperationRow {
    #[tabled(rename = "Op")]
    op: &'static str,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "Resource")]
    type_name: &'static str,
    #[tabled(rename = "Object")]
    display_name: &'static str,
    #[tabled(rename = "Endpoint")]
    endpoint: String,
    #[tabled(rename = "Lifecycle")]
    lifecycle: &'static str,
    #[tabled(rename = "Types")]
    sub_types: String,
}

#[derive(Tabled)]
struct AttributeRow {
    #[tabled(rename = "Attribute")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct StateRow {
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Type")]
    sub_type: String,
}

fn op_label(op: OpKind) -> &'static str {
    match op {
        OpKind::Add => "add",
        OpKind::Remove => "remove",
        OpKind::Replace => "replace",
    }
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

pub fn endpoint_label(endpoint: &Endpoint) -> String {
    match endpoint {
        Endpoint::Collection(collection) => format!("/{collection}/{{name}}"),
        Endpoint::Singleton(path) => format!("/{path}"),
        Endpoint::Nested {
            parent,
            child,
            key_attribute,
        } => format!("/{parent}/{{{key_attribute}}}/{child}"),
    }
}

/// Sensitive values are masked.
pub fn operations_table(schema: &ResourceSchema, operations: &[Operation]) -> String {
    render(
        operations
            .iter()
            .map(|operation| {
                let sensitive = schema
                    .attributes
                    .iter()
                    .any(|attribute| attribute.sensitive && attribute.wire_name == operation.path);
                OperationRow {
                    op: op_label(operation.op),
                    path: operation.path.clone(),
                    value: match &operation.value {
                        Some(_) if sensitive => "(sensitive)".to_string(),
                        Some(value) => value.to_string(),
                        None => String::new(),
                    },
                }
            })
            .collect(),
    )
}

/// Header line plus, when there is anything to send, the operation table.
pub fn plan_summary(schema: &ResourceSchema, plan: &Plan) -> String {
    let header = format!("{} will be {}", plan.planned.address(schema), plan.action);
    if plan.operations.is_empty() {
        header
    } else {
        format!("{header}\n{}", operations_table(schema, &plan.operations))
    }
}

pub fn resources_table(schemas: &[ResourceSchema]) -> String {
    render(
        schemas
            .iter()
            .map(|schema| ResourceRow {
                type_name: schema.type_name,
                display_name: schema.display_name,
                endpoint: endpoint_label(&schema.endpoint),
                lifecycle: match schema.lifecycle {
                    Lifecycle::Managed => "managed",
                    Lifecycle::AdoptExisting => "adopt existing",
                },
                sub_types: schema.sub_type_names().join(", "),
            })
            .collect(),
    )
}

/// Attributes of the active sub-type. Sensitive values are masked.
pub fn model_table(schema: &ResourceSchema, model: &ResourceModel) -> String {
    let mut rows = vec![AttributeRow {
        name: "id",
        value: model.id.clone().unwrap_or_default(),
    }];
    if let Some(sub_type) = model.sub_type() {
        rows.push(AttributeRow {
            name: "type",
            value: sub_type.to_string(),
        });
    }
    rows.extend(
        schema
            .active_attributes(model.sub_type())
            .filter(|attribute| !model.get(attribute.name).is_null())
            .map(|attribute| AttributeRow {
                name: attribute.name,
                value: if attribute.sensitive {
                    "(sensitive)".to_string()
                } else {
                    model.get(attribute.name).to_string()
                },
            }),
    );
    render(rows)
}

pub fn state_table(state: &StateFile) -> String {
    render(
        state
            .resources
            .values()
            .map(|stored| StateRow {
                address: stored.address(),
                sub_type: stored.sub_type.clone().unwrap_or_default(),
            })
            .collect(),
    )
}

pub fn schema_tree(schema: &ResourceSchema) -> Tree<String> {
    let mut root = Tree::new(format!(
        "{} ({})",
        schema.type_name,
        endpoint_label(&schema.endpoint)
    ));
    if let Some(key) = schema.endpoint.key_attribute() {
        root.push(format!("{key}: string, required, forces replacement"));
    }

    if schema.is_polymorphic() {
        for sub_type in schema.sub_types {
            let label = match sub_type.min_version {
                Some(version) => format!("type = {} (since {version})", sub_type.name),
                None => format!("type = {}", sub_type.name),
            };
            let leaves = schema
                .active_attributes(Some(sub_type.name))
                .map(|attribute| attribute_label(attribute, Some(sub_type.name)));
            root.push(Tree::new(label).with_leaves(leaves));
        }
    } else {
        for attribute in schema.attributes {
            root.push(attribute_label(attribute, None));
        }
    }
    root
}

fn attribute_label(attribute: &Attribute, sub_type: Option<&str>) -> String {
    let presence = match attribute.presence {
        Presence::Required => "required",
        Presence::Optional => "optional",
        Presence::Computed => "computed",
        Presence::OptionalComputed => "optional, computed",
    };
    let required = sub_type.is_some_and(|sub_type| attribute.required_for.contains(&sub_type));

    let mut label = format!("{}: {}, {presence}", attribute.name, attribute.kind.label());
    if required && attribute.presence != Presence::Required {
        label.push_str(", required for this type");
    }
    if let Some(default) = attribute.default_for(sub_type) {
        label.push_str(&format!(", default {default}"));
    }
    if let Some(version) = attribute.min_version {
        label.push_str(&format!(", since {version}"));
    }
    if attribute.sensitive {
        label.push_str(", sensitive");
    }
    label
}
