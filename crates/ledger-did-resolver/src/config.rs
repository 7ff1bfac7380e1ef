//! Handles the configuration for the ledger DID resolver.
//!
//! Call the [ResolverConfigBuilder] to create a new configuration, or load one
//! from a TOML file with [ResolverConfig::from_file].
//!
//! Example: defaults (JSON-LD output, unknown key types passed through):
//! ```rust
//! use ledger_did_resolver::config::ResolverConfigBuilder;
//! let config = ResolverConfigBuilder::default().build();
//! ```
//!
//! Example: plain JSON output, strict key types:
//! ```rust
//! use ledger_did_common::UnknownKeyTypePolicy;
//! use ledger_did_resolver::config::ResolverConfigBuilder;
//! let config = ResolverConfigBuilder::default()
//!     .with_json_ld(false)
//!     .with_unknown_key_type(UnknownKeyTypePolicy::Reject)
//!     .build();
//! ```
//!
//! Configuration files support `${VAR_NAME:default_value}` placeholders, which are
//! replaced from the environment before parsing:
//! ```toml
//! log_level = "${LOG_LEVEL:info}"
//! json_ld = "true"
//! unknown_key_type = "passthrough"
//! ```

use std::{
    env,
    fs::File,
    io::{self, BufRead},
    path::Path,
};

use ledger_did_common::{ConversionOptions, UnknownKeyTypePolicy};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::{Level, event, level_filters::LevelFilter};
use tracing_subscriber::{Registry, reload::Handle};

use crate::errors::ResolverError;

/// ConfigRaw Struct is used to deserialize the configuration file
/// We then convert this to the ResolverConfig Struct
#[derive(Debug, Serialize, Deserialize)]
struct ConfigRaw {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_json_ld")]
    pub json_ld: String,
    #[serde(default = "default_unknown_key_type")]
    pub unknown_key_type: String,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_json_ld() -> String {
    "true".into()
}

fn default_unknown_key_type() -> String {
    "passthrough".into()
}

/// Configuration for the resolver.
///
/// Use the [ResolverConfigBuilder] to create a new configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverConfig {
    pub log_level: LevelFilter,
    /// Populate `@context` for JSON-LD output; otherwise every context is stripped
    pub json_ld: bool,
    pub unknown_key_type: UnknownKeyTypePolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfigBuilder::default().build()
    }
}

impl ResolverConfig {
    pub fn conversion_options(&self) -> ConversionOptions {
        ConversionOptions {
            unknown_key_type: self.unknown_key_type,
        }
    }

    /// Read and parse a configuration file
    pub fn from_file<P: AsRef<Path>>(file_name: P) -> Result<Self, ResolverError> {
        Ok(ResolverConfig::from(read_config_file(file_name)?))
    }
}

/// Resolver Config Builder to construct the resolver options.
///
/// - log_level: Logging level (default: INFO).
/// - json_ld: Emit JSON-LD contexts (default: true).
/// - unknown_key_type: Policy for unregistered verification method types (default: Passthrough).
pub struct ResolverConfigBuilder {
    log_level: LevelFilter,
    json_ld: bool,
    unknown_key_type: UnknownKeyTypePolicy,
}

impl Default for ResolverConfigBuilder {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::INFO,
            json_ld: true,
            unknown_key_type: UnknownKeyTypePolicy::Passthrough,
        }
    }
}

impl ResolverConfigBuilder {
    /// Set the logging level
    /// Default: INFO
    pub fn with_log_level(mut self, log_level: LevelFilter) -> Self {
        self.log_level = log_level;
        self
    }

    /// Enable or disable JSON-LD contexts on resolved documents
    /// Default: true
    pub fn with_json_ld(mut self, json_ld: bool) -> Self {
        self.json_ld = json_ld;
        self
    }

    /// Set how unregistered verification method types are handled
    /// Default: Passthrough
    pub fn with_unknown_key_type(mut self, policy: UnknownKeyTypePolicy) -> Self {
        self.unknown_key_type = policy;
        self
    }

    /// Build the [ResolverConfig].
    pub fn build(self) -> ResolverConfig {
        ResolverConfig {
            log_level: self.log_level,
            json_ld: self.json_ld,
            unknown_key_type: self.unknown_key_type,
        }
    }
}

fn parse_log_level(log_level: &str) -> LevelFilter {
    match log_level {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            event!(
                Level::WARN,
                "log_level({log_level}) is unknown in config file. Defaults to INFO"
            );
            LevelFilter::INFO
        }
    }
}

fn parse_json_ld(json_ld: &str) -> bool {
    json_ld.parse().unwrap_or_else(|_| {
        event!(
            Level::WARN,
            "json_ld({json_ld}) is not a boolean in config file. Defaults to true"
        );
        true
    })
}

fn parse_unknown_key_type(policy: &str) -> UnknownKeyTypePolicy {
    match policy {
        "passthrough" => UnknownKeyTypePolicy::Passthrough,
        "reject" => UnknownKeyTypePolicy::Reject,
        _ => {
            event!(
                Level::WARN,
                "unknown_key_type({policy}) must be one of: passthrough, reject. Defaults to passthrough"
            );
            UnknownKeyTypePolicy::Passthrough
        }
    }
}

impl From<ConfigRaw> for ResolverConfig {
    fn from(raw: ConfigRaw) -> Self {
        ResolverConfigBuilder::default()
            .with_log_level(parse_log_level(&raw.log_level))
            .with_json_ld(parse_json_ld(&raw.json_ld))
            .with_unknown_key_type(parse_unknown_key_type(&raw.unknown_key_type))
            .build()
    }
}

/// Read the configuration file
/// Returns a ConfigRaw struct, that still needs to be converted to ResolverConfig
fn read_config_file<P: AsRef<Path>>(file_name: P) -> Result<ConfigRaw, ResolverError> {
    event!(Level::INFO, "Config file({})", file_name.as_ref().display());
    let raw_config = read_file_lines(file_name)?;

    event!(Level::DEBUG, "raw_config = {raw_config:?}");
    let config_with_vars = expand_env_vars(&raw_config)?;
    toml::from_str(&config_with_vars.join("\n")).map_err(|err| {
        event!(Level::ERROR, "Could not parse configuration settings. {err:?}");
        ResolverError::Config(format!(
            "Could not parse configuration settings. Reason: {err}"
        ))
    })
}

/// Reads a file and returns a vector of strings, one for each line in the file.
/// It also strips any lines starting with a # (comments)
pub(crate) fn read_file_lines<P>(file_name: P) -> Result<Vec<String>, ResolverError>
where
    P: AsRef<Path>,
{
    let file = File::open(file_name.as_ref()).map_err(|err| {
        let path = file_name.as_ref().display();
        event!(Level::ERROR, "Could not open file({path}). {err}");
        ResolverError::Config(format!("Could not open file({path}). {err}"))
    })?;

    let mut lines = Vec::new();
    for line in io::BufReader::new(file).lines() {
        let line = line.map_err(|err| {
            let path = file_name.as_ref().display();
            event!(Level::ERROR, "Could not read file({path}). {err}");
            ResolverError::Config(format!("Could not read file({path}). {err}"))
        })?;
        // Strip comments out
        if !line.starts_with('#') {
            lines.push(line);
        }
    }

    Ok(lines)
}

/// Replaces all strings ${VAR_NAME:default_value}
/// with the corresponding environment variables (e.g. value of ${VAR_NAME})
/// or with `default_value` if the variable is not defined.
fn expand_env_vars(raw_config: &[String]) -> Result<Vec<String>, ResolverError> {
    let re = Regex::new(r"\$\{(?P<env_var>[A-Z_]{1,}[0-9A-Z_]*):(?P<default_value>[^}]*)\}")
        .map_err(|err| ResolverError::Config(format!("Invalid env var pattern: {err}")))?;
    Ok(raw_config
        .iter()
        .map(|line| {
            re.replace_all(line, |caps: &Captures| match env::var(&caps["env_var"]) {
                Ok(val) => val,
                Err(_) => caps["default_value"].into(),
            })
            .into_owned()
        })
        .collect())
}

/// Load the configuration and, when a reload handle is given, apply its log level
pub fn init<P: AsRef<Path>>(
    file_name: P,
    reload_handle: Option<&Handle<LevelFilter, Registry>>,
) -> Result<ResolverConfig, ResolverError> {
    let config = ResolverConfig::from_file(file_name)?;

    if let Some(handle) = reload_handle {
        handle
            .modify(|filter| *filter = config.log_level)
            .map_err(|err| ResolverError::Config(err.to_string()))?;
        event!(Level::INFO, "Log level set to ({})", config.log_level);
    }

    event!(
        Level::INFO,
        "Configuration settings parsed successfully.\n{config:#?}"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn builder_defaults() {
        let config = ResolverConfigBuilder::default().build();
        assert_eq!(config.log_level, LevelFilter::INFO);
        assert!(config.json_ld);
        assert_eq!(config.unknown_key_type, UnknownKeyTypePolicy::Passthrough);
        assert_eq!(config, ResolverConfig::default());
    }

    #[test]
    fn parses_file_with_comments() {
        let file = write_config(
            "# resolver settings\nlog_level = \"debug\"\njson_ld = \"false\"\nunknown_key_type = \"reject\"\n",
        );
        let config = ResolverConfig::from_file(file.path()).unwrap();
        assert_eq!(config.log_level, LevelFilter::DEBUG);
        assert!(!config.json_ld);
        assert_eq!(
            config.conversion_options().unknown_key_type,
            UnknownKeyTypePolicy::Reject
        );
    }

    #[test]
    fn missing_keys_use_defaults() {
        let file = write_config("");
        assert_eq!(
            ResolverConfig::from_file(file.path()).unwrap(),
            ResolverConfig::default()
        );
    }

    #[test]
    fn unknown_log_level_defaults_to_info() {
        let file = write_config("log_level = \"loud\"\n");
        let config = ResolverConfig::from_file(file.path()).unwrap();
        assert_eq!(config.log_level, LevelFilter::INFO);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let file = write_config("json_ld = \"sometimes\"\nunknown_key_type = \"maybe\"\n");
        let config = ResolverConfig::from_file(file.path()).unwrap();
        assert!(config.json_ld);
        assert_eq!(config.unknown_key_type, UnknownKeyTypePolicy::Passthrough);
    }

    #[test]
    fn env_placeholder_falls_back_to_default() {
        let lines = vec!["log_level = \"${LEDGER_DID_TEST_UNSET_LEVEL:warn}\"".to_string()];
        let expanded = expand_env_vars(&lines).unwrap();
        assert_eq!(expanded, vec!["log_level = \"warn\"".to_string()]);
    }

    #[test]
    fn missing_file_is_config_error() {
        assert!(matches!(
            ResolverConfig::from_file("/nonexistent/ledger-resolver.toml"),
            Err(ResolverError::Config(_))
        ));
    }

    #[test]
    fn invalid_utf8_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"json_ld = \"false\"\n\xff\xfe\nunknown_key_type = \"reject\"\n")
            .unwrap();
        assert!(matches!(
            ResolverConfig::from_file(file.path()),
            Err(ResolverError::Config(_))
        ));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let file = write_config("log_level = \n");
        assert!(matches!(
            ResolverConfig::from_file(file.path()),
            Err(ResolverError::Config(_))
        ));
    }
}
