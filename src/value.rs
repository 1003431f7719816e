use std::collections::BTreeSet;
use std::fmt;

use serde_json::Value;

use crate::schema::AttributeKind;

/// A single attribute value as seen by the planner.
///
/// `Unknown` means "not decided until apply" and never compares equal to
/// anything, including another `Unknown`. `Null` means "not set".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Unknown,
    Null,
    String(String),
    Bool(bool),
    Int64(i64),
    StringSet(BTreeSet<String>),
}

impl AttrValue {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn set<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::StringSet(members.into_iter().map(Into::into).collect())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for concrete values. An empty set counts as unset.
    pub fn is_set(&self) -> bool {
        match self {
            Self::Unknown | Self::Null => false,
            Self::StringSet(members) => !members.is_empty(),
            _ => true,
        }
    }

    /// Known and not null.
    pub fn is_defined(&self) -> bool {
        !self.is_unknown() && !self.is_null()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::StringSet(members) => Some(members),
            _ => None,
        }
    }

    /// Equality the way the API sees it: a null set and an empty set are the
    /// same thing, unknown equals nothing.
    pub fn same_as(&self, other: &AttrValue) -> bool {
        match (self, other) {
            (Self::Unknown, _) | (_, Self::Unknown) => false,
            (Self::Null, Self::StringSet(members)) | (Self::StringSet(members), Self::Null) => {
                members.is_empty()
            }
            (left, right) => left == right,
        }
    }

    pub fn matches_kind(&self, kind: AttributeKind) -> bool {
        matches!(
            (self, kind),
            (Self::Unknown | Self::Null, _)
                | (Self::String(_), AttributeKind::String)
                | (Self::Bool(_), AttributeKind::Bool)
                | (Self::Int64(_), AttributeKind::Int64)
                | (Self::StringSet(_), AttributeKind::StringSet)
        )
    }

    /// Wire form. Unknown and null both serialize as JSON null.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Unknown | Self::Null => Value::Null,
            Self::String(value) => Value::String(value.clone()),
            Self::Bool(value) => Value::Bool(*value),
            Self::Int64(value) => Value::from(*value),
            Self::StringSet(members) => Value::Array(
                members
                    .iter()
                    .map(|member| Value::String(member.clone()))
                    .collect(),
            ),
        }
    }

    /// Reads a JSON value as the given kind. Returns `None` on a kind mismatch.
    ///
    /// The configuration API is loose about scalars: integers and booleans
    /// sometimes arrive as strings, and a single-valued set may arrive bare.
    pub fn from_json(kind: AttributeKind, value: &Value) -> Option<Self> {
        if value.is_null() {
            return Some(Self::Null);
        }
        match kind {
            AttributeKind::String => match value {
                Value::String(text) => Some(Self::String(text.clone())),
                Value::Number(number) => Some(Self::String(number.to_string())),
                Value::Bool(flag) => Some(Self::String(flag.to_string())),
                _ => None,
            },
            AttributeKind::Bool => match value {
                Value::Bool(flag) => Some(Self::Bool(*flag)),
                Value::String(text) => text.parse().ok().map(Self::Bool),
                _ => None,
            },
            AttributeKind::Int64 => match value {
                Value::Number(number) => number.as_i64().map(Self::Int64),
                Value::String(text) => text.parse().ok().map(Self::Int64),
                _ => None,
            },
            AttributeKind::StringSet => match value {
                Value::Array(items) => items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect::<Option<BTreeSet<_>>>()
                    .map(Self::StringSet),
                Value::String(text) => Some(Self::set([text.as_str()])),
                _ => None,
            },
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("(known after apply)"),
            Self::Null => f.write_str("null"),
            Self::String(value) => write!(f, "\"{value}\""),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int64(value) => write!(f, "{value}"),
            Self::StringSet(members) => {
                let quoted: Vec<String> = members.iter().map(|m| format!("\"{m}\"")).collect();
                write!(f, "[{}]", quoted.join(", "))
            }
        }
    }
}
