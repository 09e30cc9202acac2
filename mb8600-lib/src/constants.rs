// HNAP protocol constants for the MB8600 family

/// SOAP namespace prefixed to every action name
pub const HNAP_NAMESPACE: &str = "http://purenetworks.com/HNAP1/";

/// Path of the HNAP endpoint on the device
pub const HNAP_PATH: &str = "/HNAP1/";

/// Default management address of the modem
pub const DEFAULT_ADDRESS: &str = "192.168.100.1";

/// Factory default credentials
pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "motorola";

/// Cookie holding the signing key
pub const PRIVATE_KEY_COOKIE: &str = "PrivateKey";

/// Signing key used before a login has completed
pub const DEFAULT_PRIVATE_KEY: &str = "withoutloginkey";

/// Cookie holding the session id
pub const UID_COOKIE: &str = "uid";

/// Session id used before a login has completed
pub const DEFAULT_UID: &str = "";

/// Path both session cookies are scoped to
pub const COOKIE_PATH: &str = "/";

/// `LoginResult` value reported on a rejected login
pub const LOGIN_FAILED: &str = "FAILED";

/// Separator between channel records in telemetry strings
pub const RECORD_SEPARATOR: &str = "|+|";

/// Separator between fields of a channel record
pub const FIELD_SEPARATOR: char = '^';

/// Number of fields in a downstream channel record
pub const DOWNSTREAM_FIELD_COUNT: usize = 9;

/// Number of fields in an upstream channel record
pub const UPSTREAM_FIELD_COUNT: usize = 7;

/// Response key carrying the downstream telemetry string
pub const DOWNSTREAM_CHANNEL_KEY: &str = "MotoConnDownstreamChannel";

/// Response key carrying the upstream telemetry string
pub const UPSTREAM_CHANNEL_KEY: &str = "MotoConnUpstreamChannel";
