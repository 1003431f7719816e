use crate::schema::{Attribute, DefaultValue, Endpoint, Lifecycle, ResourceSchema};
use crate::version::V9_3;

const SSL_PROTOCOLS: &[&str] = &["TLSv1", "TLSv1.1", "TLSv1.2", "TLSv1.3"];

const ATTRIBUTES: &[Attribute] = &[
    Attribute::string("digest_algorithm", "digestAlgorithm")
        .default_value(DefaultValue::String("SHA-256"))
        .describe("Specifies the preferred message digest algorithm for the Directory Server."),
    Attribute::string("mac_algorithm", "macAlgorithm")
        .default_value(DefaultValue::String("HmacSHA256"))
        .describe("Specifies the preferred MAC algorithm for the Directory Server."),
    Attribute::int64("mac_key_length", "macKeyLength")
        .default_value(DefaultValue::Int64(256))
        .describe("Specifies the key length in bits for the preferred MAC algorithm."),
    Attribute::string("cipher_transformation", "cipherTransformation")
        .default_value(DefaultValue::String("AES/CBC/PKCS5Padding"))
        .describe("Specifies the cipher for the Directory Server using the syntax algorithm/mode/padding."),
    Attribute::int64("cipher_key_length", "cipherKeyLength")
        .default_value(DefaultValue::Int64(128))
        .describe("Specifies the key length in bits for the preferred cipher."),
    Attribute::string("key_wrapping_transformation", "keyWrappingTransformation")
        .default_value(DefaultValue::String(
            "RSA/ECB/OAEPWITHSHA-1ANDMGF1PADDING",
        ))
        .describe("The preferred key wrapping transformation for the Directory Server."),
    Attribute::string_set("ssl_protocol", "sslProtocol")
        .one_of(SSL_PROTOCOLS)
        .describe("Specifies the names of TLS protocols that are allowed for use in SSL or StartTLS communication."),
    Attribute::string_set("ssl_cipher_suite", "sslCipherSuite")
        .describe("Specifies the names of the TLS cipher suites that are allowed for use in SSL or StartTLS communication."),
    Attribute::string_set("outbound_ssl_protocol", "outboundSSLProtocol")
        .one_of(SSL_PROTOCOLS)
        .describe("Specifies the names of the TLS protocols that will be enabled for outbound connections."),
    Attribute::string_set("outbound_ssl_cipher_suite", "outboundSSLCipherSuite")
        .describe("Specifies the names of the TLS cipher suites that will be enabled for outbound connections."),
    Attribute::bool("enable_sha_1_cipher_suites", "enableSha1CipherSuites")
        .default_value(DefaultValue::Bool(false))
        .since(V9_3)
        .describe("Indicates whether to enable support for TLS cipher suites that use the SHA-1 digest algorithm."),
    Attribute::bool("enable_rsa_key_exchange_cipher_suites", "enableRsaKeyExchangeCipherSuites")
        .default_value(DefaultValue::Bool(false))
        .since(V9_3)
        .describe("Indicates whether to enable support for TLS cipher suites that use the RSA key exchange algorithm."),
    Attribute::string("ssl_cert_nickname", "sslCertNickname")
        .describe("Specifies the nickname (also called the alias) of the certificate used for SSL communication."),
];

pub const RESOURCE: ResourceSchema = ResourceSchema {
    type_name: "pingdirectory_default_crypto_manager",
    display_name: "Crypto Manager",
    urn_object: "crypto-manager",
    endpoint: Endpoint::Singleton("crypto-manager"),
    lifecycle: Lifecycle::AdoptExisting,
    sub_types: &[],
    attributes: ATTRIBUTES,
    min_version: None,
};
