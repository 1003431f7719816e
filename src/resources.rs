pub mod change_subscription_handler;
pub mod crypto_manager;
pub mod otp_delivery_mechanism;
pub mod password_validator;
pub mod replication_server;

use thiserror::Error;

use crate::schema::ResourceSchema;

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("unknown resource type: {0}")]
    UnknownResource(String),
}

const ALL: &[ResourceSchema] = &[
    change_subscription_handler::RESOURCE,
    change_subscription_handler::DEFAULT_RESOURCE,
    crypto_manager::RESOURCE,
    otp_delivery_mechanism::RESOURCE,
    otp_delivery_mechanism::DEFAULT_RESOURCE,
    password_validator::RESOURCE,
    password_validator::DEFAULT_RESOURCE,
    replication_server::RESOURCE,
];

/// Every resource type this crate manages, in listing order.
pub fn all() -> &'static [ResourceSchema] {
    ALL
}

pub fn get_resource(type_name: &str) -> Result<&'static ResourceSchema, RegistryError> {
    all()
        .iter()
        .find(|schema| schema.type_name == type_name)
        .ok_or_else(|| RegistryError::UnknownResource(type_name.to_string()))
}
