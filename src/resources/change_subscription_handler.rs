use crate::schema::{
    Attribute, DefaultValue, Endpoint, Lifecycle, ResourceSchema, SubType, SubTypeDefault,
};

const SUB_TYPES: &[SubType] = &[
    SubType::new("groovy-scripted"),
    SubType::new("logging"),
    SubType::new("third-party"),
];

const ATTRIBUTES: &[Attribute] = &[
    Attribute::string("description", "description")
        .describe("A description for this Change Subscription Handler"),
    Attribute::bool("enabled", "enabled")
        .required()
        .describe("Indicates whether this Change Subscription Handler is enabled within the server."),
    Attribute::string_set("change_subscription", "changeSubscription").describe(
        "The set of change subscriptions for which this handler should be notified. \
         When empty, it is notified of every change subscription.",
    ),
    Attribute::string("script_class", "scriptClass")
        .only_for(&["groovy-scripted"])
        .required_for(&["groovy-scripted"])
        .describe("The fully-qualified name of the Groovy class providing the logic."),
    Attribute::string_set("script_argument", "scriptArgument")
        .only_for(&["groovy-scripted"])
        .describe("The set of arguments used to customize the behavior of the Groovy script."),
    Attribute::string("log_file", "logFile")
        .only_for(&["logging"])
        .defaults(&[SubTypeDefault {
            sub_types: &["logging"],
            value: DefaultValue::String("logs/change-notifications.log"),
        }])
        .describe("Specifies the log file in which the change notification messages will be written."),
    Attribute::string("extension_class", "extensionClass")
        .only_for(&["third-party"])
        .required_for(&["third-party"])
        .describe("The fully-qualified name of the Java class providing the logic."),
    Attribute::string_set("extension_argument", "extensionArgument")
        .only_for(&["third-party"])
        .describe("The set of arguments used to customize the behavior of the third-party extension."),
];

pub const RESOURCE: ResourceSchema = ResourceSchema {
    type_name: "pingdirectory_change_subscription_handler",
    display_name: "Change Subscription Handler",
    urn_object: "change-subscription-handler",
    endpoint: Endpoint::Collection("change-subscription-handlers"),
    lifecycle: Lifecycle::Managed,
    sub_types: SUB_TYPES,
    attributes: ATTRIBUTES,
    min_version: None,
};

pub const DEFAULT_RESOURCE: ResourceSchema = ResourceSchema {
    type_name: "pingdirectory_default_change_subscription_handler",
    lifecycle: Lifecycle::AdoptExisting,
    ..RESOURCE
};
