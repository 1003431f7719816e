use crate::schema::{
    Attribute, DefaultValue, Endpoint, Lifecycle, ResourceSchema, SubType, SubTypeDefault,
};
use crate::version::V9_2;

const SUB_TYPES: &[SubType] = &[
    SubType::new("character-set"),
    SubType::new("length-based"),
    SubType::new("regular-expression"),
    SubType::new("repeated-characters"),
    SubType::new("unique-characters"),
    SubType::new("dictionary"),
    SubType::new("pwned-passwords").since(V9_2),
    SubType::new("groovy-scripted"),
    SubType::new("third-party"),
];

const ATTRIBUTES: &[Attribute] = &[
    Attribute::string("description", "description")
        .describe("A description for this Password Validator"),
    Attribute::bool("enabled", "enabled")
        .required()
        .describe("Indicates whether the password validator is enabled for use."),
    Attribute::string("validator_requirement_description", "validatorRequirementDescription")
        .describe("A human-readable description of the requirements imposed by this validator."),
    Attribute::string("validator_failure_message", "validatorFailureMessage")
        .describe("A message returned to the client when a proposed password is rejected by this validator."),
    // character-set
    Attribute::string_set("character_set", "characterSet")
        .only_for(&["character-set"])
        .required_for(&["character-set"])
        .describe("Specifies a character set containing characters that a password may contain and a value indicating the minimum number of characters required from that set."),
    Attribute::bool("allow_unclassified_characters", "allowUnclassifiedCharacters")
        .only_for(&["character-set"])
        .required_for(&["character-set"])
        .describe("Indicates whether this password validator allows passwords to contain characters outside of any of the user-defined character sets."),
    Attribute::int64("minimum_required_character_sets", "minimumRequiredCharacterSets")
        .only_for(&["character-set"])
        .describe("Specifies the minimum number of character sets that must be represented in a proposed password."),
    // length-based
    Attribute::int64("min_password_length", "minPasswordLength")
        .only_for(&["length-based"])
        .defaults(&[SubTypeDefault {
            sub_types: &["length-based"],
            value: DefaultValue::Int64(6),
        }])
        .describe("Specifies the minimum number of characters that can be in a password."),
    Attribute::int64("max_password_length", "maxPasswordLength")
        .only_for(&["length-based"])
        .describe("Specifies the maximum number of characters that can be in a password."),
    // regular-expression
    Attribute::string("match_pattern", "matchPattern")
        .only_for(&["regular-expression"])
        .required_for(&["regular-expression"])
        .describe("The regular expression to use for this password validator."),
    Attribute::string("match_behavior", "matchBehavior")
        .only_for(&["regular-expression"])
        .required_for(&["regular-expression"])
        .one_of(&["require-match", "reject-match"])
        .describe("Indicates whether to require passwords to match or not match the regular expression."),
    // repeated-characters
    Attribute::int64("max_consecutive_length", "maxConsecutiveLength")
        .only_for(&["repeated-characters"])
        .required_for(&["repeated-characters"])
        .describe("The maximum number of times that any character may appear consecutively in a password value."),
    Attribute::string_set("character_set_to_treat_as_same", "characterSetToTreatAsSame")
        .only_for(&["repeated-characters"])
        .describe("A set of characters that should be considered equivalent for the purpose of this password validator."),
    // unique-characters
    Attribute::int64("min_unique_characters", "minUniqueCharacters")
        .only_for(&["unique-characters"])
        .required_for(&["unique-characters"])
        .describe("Specifies the minimum number of unique characters that a password will be allowed to contain."),
    // shared by several character-oriented types
    Attribute::bool("case_sensitive_validation", "caseSensitiveValidation")
        .only_for(&["repeated-characters", "unique-characters", "dictionary"])
        .defaults(&[
            SubTypeDefault {
                sub_types: &["repeated-characters", "unique-characters"],
                value: DefaultValue::Bool(true),
            },
            SubTypeDefault {
                sub_types: &["dictionary"],
                value: DefaultValue::Bool(false),
            },
        ])
        .describe("Indicates whether this password validator should treat password characters in a case-sensitive manner."),
    // dictionary
    Attribute::string("dictionary_file", "dictionaryFile")
        .only_for(&["dictionary"])
        .defaults(&[SubTypeDefault {
            sub_types: &["dictionary"],
            value: DefaultValue::String("config/dictionary.txt"),
        }])
        .describe("The path to the dictionary file that will be used for this password validator."),
    Attribute::bool("test_reversed_password", "testReversedPassword")
        .only_for(&["dictionary"])
        .defaults(&[SubTypeDefault {
            sub_types: &["dictionary"],
            value: DefaultValue::Bool(true),
        }])
        .describe("Indicates whether this password validator is to test the reversed value of the provided password as well as the order in which it was given."),
    // pwned-passwords
    Attribute::string("pwned_passwords_base_url", "pwnedPasswordsBaseURL")
        .only_for(&["pwned-passwords"])
        .defaults(&[SubTypeDefault {
            sub_types: &["pwned-passwords"],
            value: DefaultValue::String("https://api.pwnedpasswords.com/range/"),
        }])
        .describe("The base URL for requests used to interact with the Pwned Passwords service."),
    Attribute::bool("invoke_on_add", "invokeOnAdd")
        .only_for(&["pwned-passwords"])
        .required_for(&["pwned-passwords"])
        .describe("Indicates whether it is possible to invoke this validator when processing an add operation."),
    Attribute::bool("invoke_on_self_change", "invokeOnSelfChange")
        .only_for(&["pwned-passwords"])
        .required_for(&["pwned-passwords"])
        .describe("Indicates whether it is possible to invoke this validator when processing a self password change."),
    Attribute::bool("invoke_on_admin_reset", "invokeOnAdminReset")
        .only_for(&["pwned-passwords"])
        .required_for(&["pwned-passwords"])
        .describe("Indicates whether it is possible to invoke this validator when processing an administrative password reset."),
    Attribute::bool("accept_password_on_service_error", "acceptPasswordOnServiceError")
        .only_for(&["pwned-passwords"])
        .required_for(&["pwned-passwords"])
        .describe("Indicates whether to accept the proposed password if an error occurs while attempting to interact with the Pwned Passwords service."),
    // groovy-scripted
    Attribute::string("script_class", "scriptClass")
        .only_for(&["groovy-scripted"])
        .required_for(&["groovy-scripted"])
        .describe("The fully-qualified name of the Groovy class providing the logic."),
    Attribute::string_set("script_argument", "scriptArgument")
        .only_for(&["groovy-scripted"])
        .describe("The set of arguments used to customize the behavior of the scripted password validator."),
    // third-party
    Attribute::string("extension_class", "extensionClass")
        .only_for(&["third-party"])
        .required_for(&["third-party"])
        .describe("The fully-qualified name of the Java class providing the logic."),
    Attribute::string_set("extension_argument", "extensionArgument")
        .only_for(&["third-party"])
        .describe("The set of arguments used to customize the behavior of the third-party extension."),
];

pub const RESOURCE: ResourceSchema = ResourceSchema {
    type_name: "pingdirectory_password_validator",
    display_name: "Password Validator",
    urn_object: "password-validator",
    endpoint: Endpoint::Collection("password-validators"),
    lifecycle: Lifecycle::Managed,
    sub_types: SUB_TYPES,
    attributes: ATTRIBUTES,
    min_version: None,
};

pub const DEFAULT_RESOURCE: ResourceSchema = ResourceSchema {
    type_name: "pingdirectory_default_password_validator",
    lifecycle: Lifecycle::AdoptExisting,
    ..RESOURCE
};
