use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::diagnostics::Diagnostics;
use crate::resource::ResourceModel;
use crate::schema::ResourceSchema;

/// PingDirectory product versions this crate knows the configuration API of.
pub const SUPPORTED_VERSIONS: &[ProductVersion] = &[
    ProductVersion::new(9, 1, 0, 0),
    ProductVersion::new(9, 1, 0, 1),
    ProductVersion::new(9, 1, 0, 2),
    ProductVersion::new(9, 2, 0, 0),
    ProductVersion::new(9, 2, 0, 1),
    ProductVersion::new(9, 3, 0, 0),
];

pub const V9_2: ProductVersion = ProductVersion::new(9, 2, 0, 0);
pub const V9_3: ProductVersion = ProductVersion::new(9, 3, 0, 0);

#[derive(Debug, Error, PartialEq)]
pub enum VersionError {
    #[error("invalid product version '{0}': expected up to four numeric components")]
    Malformed(String),

    #[error("unsupported PingDirectory version {version}; supported versions: {supported}")]
    Unsupported { version: String, supported: String },
}

/// Four-part numeric PingDirectory version, ordered component by component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductVersion([u16; 4]);

impl ProductVersion {
    pub const fn new(major: u16, minor: u16, patch: u16, build: u16) -> Self {
        Self([major, minor, patch, build])
    }

    pub fn components(&self) -> [u16; 4] {
        self.0
    }

    /// Parses and requires the version to be one of [`SUPPORTED_VERSIONS`].
    pub fn parse_supported(input: &str) -> Result<Self, VersionError> {
        let version: Self = input.parse()?;
        if SUPPORTED_VERSIONS.contains(&version) {
            return Ok(version);
        }
        Err(VersionError::Unsupported {
            version: version.to_string(),
            supported: SUPPORTED_VERSIONS
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    pub fn is_at_least(&self, minimum: ProductVersion) -> bool {
        *self >= minimum
    }
}

// NOTE: Short forms are padded, "9.3" reads as 9.3.0.0
impl FromStr for ProductVersion {
    type Err = VersionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let parts: Vec<&str> = trimmed.split('.').collect();
        if trimmed.is_empty() || parts.len() > 4 {
            return Err(VersionError::Malformed(input.to_string()));
        }

        let mut components = [0u16; 4];
        for (slot, part) in components.iter_mut().zip(parts) {
            *slot = part
                .parse()
                .map_err(|_| VersionError::Malformed(input.to_string()))?;
        }
        Ok(Self(components))
    }
}

impl fmt::Display for ProductVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [major, minor, patch, build] = self.0;
        write!(f, "{major}.{minor}.{patch}.{build}")
    }
}

/// Rejects anything the plan uses that the configured server version lacks:
/// the resource type itself, the selected sub-type, and every attribute set.
pub fn check_supported(
    schema: &ResourceSchema,
    model: &ResourceModel,
    version: ProductVersion,
) -> Diagnostics {
    let mut diags = Diagnostics::new();

    if let Some(minimum) = schema.min_version
        && !version.is_at_least(minimum)
    {
        diags.error(
            None,
            "Unsupported resource type",
            format!(
                "{} is not supported by PingDirectory version {version}. \
                 It is supported in PingDirectory versions {minimum} and later.",
                schema.display_name
            ),
        );
    }

    if let Some(sub_type) = model.sub_type().and_then(|name| schema.sub_type(name))
        && let Some(minimum) = sub_type.min_version
        && !version.is_at_least(minimum)
    {
        diags.error(
            Some("type"),
            "Unsupported type",
            format!(
                "type \"{}\" is not supported by PingDirectory version {version}. \
                 It is supported in PingDirectory versions {minimum} and later.",
                sub_type.name
            ),
        );
    }

    for attribute in schema.attributes {
        let Some(minimum) = attribute.min_version else {
            continue;
        };
        if model.get(attribute.name).is_set() && !version.is_at_least(minimum) {
            diags.error(
                Some(attribute.name),
                "Unsupported attribute",
                format!(
                    "Attribute '{}' is not supported by PingDirectory version {version}. \
                     This attribute is supported in PingDirectory versions {minimum} and later.",
                    attribute.name
                ),
            );
        }
    }

    diags
}
