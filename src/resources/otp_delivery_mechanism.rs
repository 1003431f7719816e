use crate::schema::{Attribute, DefaultValue, Endpoint, Lifecycle, ResourceSchema, SubType};

const SUB_TYPES: &[SubType] = &[
    SubType::new("twilio"),
    SubType::new("email"),
    SubType::new("third-party"),
];

const ATTRIBUTES: &[Attribute] = &[
    Attribute::string("description", "description")
        .describe("A description for this OTP Delivery Mechanism"),
    Attribute::bool("enabled", "enabled")
        .required()
        .describe("Indicates whether this OTP Delivery Mechanism is enabled for use in the server."),
    Attribute::string("http_proxy_external_server", "httpProxyExternalServer")
        .only_for(&["twilio"])
        .describe("A reference to an HTTP proxy server that should be used for requests sent to the Twilio service."),
    Attribute::string("twilio_account_sid", "twilioAccountSID")
        .only_for(&["twilio"])
        .required_for(&["twilio"])
        .describe("The unique identifier assigned to the Twilio account that will be used."),
    Attribute::string("twilio_auth_token", "twilioAuthToken")
        .only_for(&["twilio"])
        .sensitive()
        .describe("The auth token for the Twilio account that will be used."),
    Attribute::string("twilio_auth_token_passphrase_provider", "twilioAuthTokenPassphraseProvider")
        .only_for(&["twilio"])
        .describe("The passphrase provider that may be used to obtain the auth token for the Twilio account."),
    Attribute::string_set("sender_phone_number", "senderPhoneNumber")
        .only_for(&["twilio"])
        .required_for(&["twilio"])
        .describe("The outgoing phone number to use for the messages."),
    Attribute::string("email_address_attribute_type", "emailAddressAttributeType")
        .only_for(&["email"])
        .default_value(DefaultValue::String("mail"))
        .describe("The name or OID of the attribute in the user's entry that holds the email address."),
    Attribute::string("email_address_json_attribute_type", "emailAddressJSONAttributeType")
        .only_for(&["email"])
        .describe("The name or OID of the JSON attribute in the user's entry that holds email addresses."),
    Attribute::string("email_address_json_object_filter", "emailAddressJSONObjectFilter")
        .only_for(&["email"])
        .describe("A JSON object filter used to identify which email address to use."),
    Attribute::string("sender_address", "senderAddress")
        .only_for(&["email"])
        .required_for(&["email"])
        .describe("The e-mail address to use as the sender for the one-time passwords."),
    Attribute::string("message_subject", "messageSubject")
        .only_for(&["email"])
        .required_for(&["email"])
        .describe("The subject to use for the e-mail message."),
    Attribute::string("message_text_before_otp", "messageTextBeforeOTP")
        .only_for(&["twilio", "email"])
        .default_value(DefaultValue::String("Your one-time password is '"))
        .describe("Any text that should appear in the message before the one-time password value."),
    Attribute::string("message_text_after_otp", "messageTextAfterOTP")
        .only_for(&["twilio", "email"])
        .default_value(DefaultValue::String("'."))
        .describe("Any text that should appear in the message after the one-time password value."),
    Attribute::string("extension_class", "extensionClass")
        .only_for(&["third-party"])
        .required_for(&["third-party"])
        .describe("The fully-qualified name of the Java class providing the logic."),
    Attribute::string_set("extension_argument", "extensionArgument")
        .only_for(&["third-party"])
        .describe("The set of arguments used to customize the behavior of the third-party extension."),
];

pub const RESOURCE: ResourceSchema = ResourceSchema {
    type_name: "pingdirectory_otp_delivery_mechanism",
    display_name: "OTP Delivery Mechanism",
    urn_object: "otp-delivery-mechanism",
    endpoint: Endpoint::Collection("otp-delivery-mechanisms"),
    lifecycle: Lifecycle::Managed,
    sub_types: SUB_TYPES,
    attributes: ATTRIBUTES,
    min_version: None,
};

pub const DEFAULT_RESOURCE: ResourceSchema = ResourceSchema {
    type_name: "pingdirectory_default_otp_delivery_mechanism",
    lifecycle: Lifecycle::AdoptExisting,
    ..RESOURCE
};
