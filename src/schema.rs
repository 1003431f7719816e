//! Declarative resource schemas.
//!
//! A resource type is described entirely by data: where it lives in the
//! configuration API, which sub-types it has, and an ordered table of
//! attributes. Validation, planning, diffing and marshaling all interpret
//! these tables, so adding a resource type means adding a table.

use crate::value::AttrValue;
use crate::version::ProductVersion;

const URN_PREFIX: &str = "urn:pingidentity:schemas:configuration:2.0:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    String,
    Bool,
    Int64,
    StringSet,
}

impl AttributeKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int64 => "int64",
            Self::StringSet => "set of string",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    /// Server-populated, never configurable.
    Computed,
    /// Configurable; the server fills it in when left out.
    OptionalComputed,
}

impl Presence {
    pub fn is_configurable(&self) -> bool {
        !matches!(self, Self::Computed)
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed | Self::OptionalComputed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    String(&'static str),
    Bool(bool),
    Int64(i64),
    StringSet(&'static [&'static str]),
}

impl DefaultValue {
    pub fn to_value(&self) -> AttrValue {
        match self {
            Self::String(value) => AttrValue::string(*value),
            Self::Bool(value) => AttrValue::Bool(*value),
            Self::Int64(value) => AttrValue::Int64(*value),
            Self::StringSet(members) => AttrValue::set(members.iter().copied()),
        }
    }
}

/// Default applied when the attribute is left out for one of `sub_types`.
#[derive(Debug, Clone, Copy)]
pub struct SubTypeDefault {
    pub sub_types: &'static [&'static str],
    pub value: DefaultValue,
}

#[derive(Debug, Clone, Copy)]
pub struct Attribute {
    pub name: &'static str,
    pub wire_name: &'static str,
    pub kind: AttributeKind,
    pub presence: Presence,
    pub description: &'static str,
    /// Sub-types the attribute belongs to. Empty means all of them.
    pub sub_types: &'static [&'static str],
    /// Sub-types for which the attribute must be set.
    pub required_for: &'static [&'static str],
    pub default: Option<DefaultValue>,
    pub sub_type_defaults: &'static [SubTypeDefault],
    pub allowed_values: &'static [&'static str],
    pub min_version: Option<ProductVersion>,
    pub sensitive: bool,
}

impl Attribute {
    const fn new(name: &'static str, wire_name: &'static str, kind: AttributeKind) -> Self {
        Self {
            name,
            wire_name,
            kind,
            presence: Presence::Optional,
            description: "",
            sub_types: &[],
            required_for: &[],
            default: None,
            sub_type_defaults: &[],
            allowed_values: &[],
            min_version: None,
            sensitive: false,
        }
    }

    pub const fn string(name: &'static str, wire_name: &'static str) -> Self {
        Self::new(name, wire_name, AttributeKind::String)
    }

    pub const fn bool(name: &'static str, wire_name: &'static str) -> Self {
        Self::new(name, wire_name, AttributeKind::Bool)
    }

    pub const fn int64(name: &'static str, wire_name: &'static str) -> Self {
        Self::new(name, wire_name, AttributeKind::Int64)
    }

    /// Sets are optional+computed: the server always reports them, possibly empty.
    pub const fn string_set(name: &'static str, wire_name: &'static str) -> Self {
        Self::new(name, wire_name, AttributeKind::StringSet).optional_computed()
    }

    pub const fn required(mut self) -> Self {
        self.presence = Presence::Required;
        self
    }

    pub const fn optional_computed(mut self) -> Self {
        self.presence = Presence::OptionalComputed;
        self
    }

    pub const fn computed(mut self) -> Self {
        self.presence = Presence::Computed;
        self
    }

    pub const fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub const fn only_for(mut self, sub_types: &'static [&'static str]) -> Self {
        self.sub_types = sub_types;
        self
    }

    pub const fn required_for(mut self, sub_types: &'static [&'static str]) -> Self {
        self.required_for = sub_types;
        self
    }

    /// Defaulted attributes are optional+computed: the server reports the default back.
    pub const fn default_value(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self.presence = Presence::OptionalComputed;
        self
    }

    /// Per-sub-type defaults, consulted before [`Attribute::default_value`].
    pub const fn defaults(mut self, defaults: &'static [SubTypeDefault]) -> Self {
        self.sub_type_defaults = defaults;
        self.presence = Presence::OptionalComputed;
        self
    }

    pub const fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed_values = allowed;
        self
    }

    pub const fn since(mut self, version: ProductVersion) -> Self {
        self.min_version = Some(version);
        self
    }

    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn applies_to(&self, sub_type: Option<&str>) -> bool {
        match sub_type {
            Some(sub_type) => self.sub_types.is_empty() || self.sub_types.contains(&sub_type),
            None => self.sub_types.is_empty(),
        }
    }

    pub fn default_for(&self, sub_type: Option<&str>) -> Option<AttrValue> {
        self.sub_type_defaults
            .iter()
            .find(|default| sub_type.is_some_and(|sub_type| default.sub_types.contains(&sub_type)))
            .map(|default| default.value)
            .or(self.default)
            .map(|value| value.to_value())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SubType {
    pub name: &'static str,
    pub min_version: Option<ProductVersion>,
}

impl SubType {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            min_version: None,
        }
    }

    pub const fn since(mut self, version: ProductVersion) -> Self {
        self.min_version = Some(version);
        self
    }
}

/// Where an object lives relative to the `/config/v1` base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/{collection}/{name}`, keyed by the `name` attribute.
    Collection(&'static str),
    /// `/{path}`, one object per server.
    Singleton(&'static str),
    /// `/{parent}/{parent name}/{child}`, keyed by `key_attribute`.
    Nested {
        parent: &'static str,
        child: &'static str,
        key_attribute: &'static str,
    },
}

impl Endpoint {
    /// Name of the attribute that carries the object's key, if any.
    pub fn key_attribute(&self) -> Option<&'static str> {
        match self {
            Self::Collection(_) => Some("name"),
            Self::Singleton(_) => None,
            Self::Nested { key_attribute, .. } => Some(key_attribute),
        }
    }

    /// Path of the object itself.
    pub fn object_path(&self, key: Option<&str>) -> Option<String> {
        match (self, key) {
            (Self::Collection(collection), Some(name)) => {
                Some(format!("/{}/{}", collection, urlencoding::encode(name)))
            }
            (Self::Singleton(path), _) => Some(format!("/{path}")),
            (
                Self::Nested {
                    parent,
                    child,
                    ..
                },
                Some(parent_name),
            ) => Some(format!(
                "/{}/{}/{}",
                parent,
                urlencoding::encode(parent_name),
                child
            )),
            _ => None,
        }
    }

    /// Path new objects are posted to. Only collections support creation.
    pub fn collection_path(&self) -> Option<String> {
        match self {
            Self::Collection(collection) => Some(format!("/{collection}")),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Created by Create, removed by Delete.
    Managed,
    /// The object always exists: Create adopts it, Delete only untracks it.
    AdoptExisting,
}

#[derive(Debug, Clone, Copy)]
pub struct ResourceSchema {
    /// Terraform-style type name, e.g. `pingdirectory_password_validator`.
    pub type_name: &'static str,
    pub display_name: &'static str,
    /// Object name used in type URNs, e.g. `password-validator`.
    pub urn_object: &'static str,
    pub endpoint: Endpoint,
    pub lifecycle: Lifecycle,
    pub sub_types: &'static [SubType],
    pub attributes: &'static [Attribute],
    pub min_version: Option<ProductVersion>,
}

impl ResourceSchema {
    pub fn is_polymorphic(&self) -> bool {
        !self.sub_types.is_empty()
    }

    pub fn sub_type(&self, name: &str) -> Option<&SubType> {
        self.sub_types.iter().find(|sub_type| sub_type.name == name)
    }

    pub fn sub_type_names(&self) -> Vec<&'static str> {
        self.sub_types.iter().map(|sub_type| sub_type.name).collect()
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }

    /// Attributes of the active sub-type, in table order.
    pub fn active_attributes<'a>(
        &'a self,
        sub_type: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Attribute> + 'a {
        self.attributes
            .iter()
            .filter(move |attribute| attribute.applies_to(sub_type))
    }

    pub fn type_urn(&self, sub_type: Option<&str>) -> String {
        match sub_type {
            Some(sub_type) => format!("{URN_PREFIX}{}:{sub_type}", self.urn_object),
            None => format!("{URN_PREFIX}{}", self.urn_object),
        }
    }

    /// Recovers the sub-type from a `schemas` URN list.
    pub fn sub_type_from_urns<'a>(&self, urns: impl IntoIterator<Item = &'a str>) -> Option<String> {
        let prefix = format!("{URN_PREFIX}{}:", self.urn_object);
        urns.into_iter()
            .find_map(|urn| urn.strip_prefix(&prefix))
            .filter(|sub_type| self.sub_type(sub_type).is_some())
            .map(str::to_string)
    }

    pub fn is_adopt_existing(&self) -> bool {
        self.lifecycle == Lifecycle::AdoptExisting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::V9_2;

    const ATTRIBUTES: &[Attribute] = &[
        Attribute::bool("enabled", "enabled").required(),
        Attribute::string("script_class", "scriptClass")
            .only_for(&["groovy-scripted"])
            .required_for(&["groovy-scripted"]),
        Attribute::string("log_file", "logFile")
            .only_for(&["logging"])
            .defaults(&[SubTypeDefault {
                sub_types: &["logging"],
                value: DefaultValue::String("logs/out.log"),
            }]),
        Attribute::string_set("tags", "tags").since(V9_2),
        Attribute::int64("port", "port").default_value(DefaultValue::Int64(8443)),
    ];

    const SCHEMA: ResourceSchema = ResourceSchema {
        type_name: "pingdirectory_widget",
        display_name: "Widget",
        urn_object: "widget",
        endpoint: Endpoint::Collection("widgets"),
        lifecycle: Lifecycle::Managed,
        sub_types: &[SubType::new("groovy-scripted"), SubType::new("logging")],
        attributes: ATTRIBUTES,
        min_version: None,
    };

    #[test]
    fn test_builders_set_presence() {
        assert_eq!(ATTRIBUTES[0].presence, Presence::Required);
        assert_eq!(ATTRIBUTES[1].presence, Presence::Optional);
        assert_eq!(ATTRIBUTES[2].presence, Presence::OptionalComputed);
        assert_eq!(ATTRIBUTES[3].presence, Presence::OptionalComputed);
        assert_eq!(ATTRIBUTES[3].min_version, Some(V9_2));
    }

    #[test]
    fn test_active_attributes_filters_by_sub_type() {
        let names: Vec<&str> = SCHEMA
            .active_attributes(Some("logging"))
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["enabled", "log_file", "tags", "port"]);
    }

    #[test]
    fn test_default_for_sub_type() {
        let log_file = SCHEMA.attribute("log_file").unwrap();
        assert_eq!(
            log_file.default_for(Some("logging")),
            Some(AttrValue::string("logs/out.log"))
        );
        assert_eq!(log_file.default_for(Some("groovy-scripted")), None);

        let port = SCHEMA.attribute("port").unwrap();
        assert_eq!(port.default_for(Some("logging")), Some(AttrValue::Int64(8443)));
        assert_eq!(port.default_for(None), Some(AttrValue::Int64(8443)));
    }

    #[test]
    fn test_type_urn_roundtrip() {
        let urn = SCHEMA.type_urn(Some("logging"));
        assert_eq!(urn, "urn:pingidentity:schemas:configuration:2.0:widget:logging");
        assert_eq!(
            SCHEMA.sub_type_from_urns([urn.as_str()]),
            Some("logging".to_string())
        );
        assert_eq!(SCHEMA.sub_type_from_urns(["urn:other"]), None);
    }

    #[test]
    fn test_endpoint_paths() {
        let collection = Endpoint::Collection("widgets");
        assert_eq!(
            collection.object_path(Some("my widget")).as_deref(),
            Some("/widgets/my%20widget")
        );
        assert_eq!(collection.object_path(None), None);
        assert_eq!(collection.collection_path().as_deref(), Some("/widgets"));

        let singleton = Endpoint::Singleton("crypto-manager");
        assert_eq!(singleton.object_path(None).as_deref(), Some("/crypto-manager"));
        assert_eq!(singleton.collection_path(), None);
        assert_eq!(singleton.key_attribute(), None);

        let nested = Endpoint::Nested {
            parent: "synchronization-providers",
            child: "replication-server",
            key_attribute: "synchronization_provider_name",
        };
        assert_eq!(
            nested.object_path(Some("Multimaster Synchronization")).as_deref(),
            Some("/synchronization-providers/Multimaster%20Synchronization/replication-server")
        );
    }
}
