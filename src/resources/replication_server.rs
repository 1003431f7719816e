use crate::schema::{Attribute, DefaultValue, Endpoint, Lifecycle, ResourceSchema};
use crate::version::V9_2;

const ATTRIBUTES: &[Attribute] = &[
    Attribute::int64("replication_server_id", "replicationServerID")
        .required()
        .describe("Specifies a unique identifier for the Replication Server."),
    Attribute::string("replication_db_directory", "replicationDBDirectory")
        .default_value(DefaultValue::String("changelogDb"))
        .describe("The path where the Replication Server stores all persistent information."),
    Attribute::string("replication_purge_delay", "replicationPurgeDelay")
        .default_value(DefaultValue::String("86400 s"))
        .describe("Period of time after which internal purge operations are performed on the replication changes database."),
    Attribute::string("target_database_size", "targetDatabaseSize")
        .default_value(DefaultValue::String("0 mb"))
        .describe("The replication changes database will not be purged below this size."),
    Attribute::int64("replication_port", "replicationPort")
        .required()
        .describe("The port on which this Replication Server waits for connections from other Replication Servers or Directory Server instances."),
    Attribute::bool("listen_on_all_addresses", "listenOnAllAddresses")
        .default_value(DefaultValue::Bool(false))
        .describe("Indicates whether the Replication Server should listen on all addresses for this host."),
    Attribute::string("compression_criteria", "compressionCriteria")
        .default_value(DefaultValue::String("remote-wan-only"))
        .one_of(&["always", "remote", "remote-wan-only", "never"])
        .describe("Specifies when the replication traffic should be compressed."),
    Attribute::string("heartbeat_interval", "heartbeatInterval")
        .default_value(DefaultValue::String("1000 ms"))
        .describe("Specifies the heartbeat interval that the Directory Server will use when communicating with Replication Servers."),
    Attribute::string("remote_monitor_update_interval", "remoteMonitorUpdateInterval")
        .default_value(DefaultValue::String("3 s"))
        .describe("Specifies the duration that topology monitor data will be cached before it is requested again from a remote server."),
    Attribute::string_set("restricted_domain", "restrictedDomain")
        .describe("Specifies the base DN of domains that are only replicated between server instances that belong to the same replication set."),
    Attribute::int64("gateway_priority", "gatewayPriority")
        .default_value(DefaultValue::Int64(5))
        .describe("Specifies the gateway priority of the Replication Server in the current location."),
    Attribute::int64("missing_changes_alert_threshold_percent", "missingChangesAlertThresholdPercent")
        .default_value(DefaultValue::Int64(10))
        .describe("Specifies the missing changes alert threshold as a percentage of the total pending changes."),
    Attribute::string("missing_changes_policy", "missingChangesPolicy")
        .default_value(DefaultValue::String(
            "use-changelog-and-alert-on-missing-changes",
        ))
        .one_of(&[
            "use-changelog-and-alert-on-missing-changes",
            "use-changelog-and-enter-lockdown-mode-on-missing-changes",
            "use-changelog-and-ignore-missing-changes",
        ])
        .since(V9_2)
        .describe("Determines how the server responds when replication detects that some changes might have been missed."),
    Attribute::bool(
        "include_all_remote_servers_state_in_monitor_message",
        "includeAllRemoteServersStateInMonitorMessage",
    )
    .default_value(DefaultValue::Bool(false))
    .since(V9_2)
    .describe("Indicates monitor messages should include information about remote servers."),
];

pub const RESOURCE: ResourceSchema = ResourceSchema {
    type_name: "pingdirectory_default_replication_server",
    display_name: "Replication Server",
    urn_object: "replication-server",
    endpoint: Endpoint::Nested {
        parent: "synchronization-providers",
        child: "replication-server",
        key_attribute: "synchronization_provider_name",
    },
    lifecycle: Lifecycle::AdoptExisting,
    sub_types: &[],
    attributes: ATTRIBUTES,
    min_version: None,
};
