use clap::{Parser, ValueEnum};
use pep_client::PepClientConfig;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Asks a PEP daemon for an authorization decision.
///
/// Settings are read from the optional configuration file, then from `PEP_*`
/// environment variables (e.g. `PEP_TIMEOUT=10s`, `PEP_TLS__VALIDATION=false`),
/// then from the options below.
#[derive(Parser, Debug)]
#[command(name = "pepcli")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// PEP daemon endpoint URL, tried in the given order (repeatable)
    #[arg(long = "pepd", short = 'p', value_name = "URL", action = clap::ArgAction::Append)]
    pub endpoints: Vec<String>,

    /// YAML configuration file
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subject identifier, e.g. the user's certificate DN
    #[arg(long, short = 's')]
    pub subjectid: Option<String>,

    /// Subject category
    #[arg(long, default_value = pep_xacml::ids::SUBJECT_CATEGORY_ACCESS)]
    pub subject_category: String,

    /// PEM certificate chain sent as the subject key-info
    #[arg(long, value_name = "FILE")]
    pub certchain: Option<PathBuf>,

    /// Resource identifier
    #[arg(long, short = 'r', required_unless_present = "print_config")]
    pub resourceid: Option<String>,

    /// Action identifier
    #[arg(long, short = 'a', required_unless_present = "print_config")]
    pub actionid: Option<String>,

    /// Extra attribute as `scope:id=value`, scope being subject, resource,
    /// action or environment (repeatable)
    #[arg(long, value_name = "SCOPE:ID=VALUE", action = clap::ArgAction::Append)]
    pub attribute: Vec<ExtraAttribute>,

    /// Request timeout, e.g. `10s` or `1m 30s`
    #[arg(long, short = 't', value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// PEM bundle of trusted CA certificates
    #[arg(long, value_name = "FILE")]
    pub cacert: Option<PathBuf>,

    /// Directory of trusted CA certificates
    #[arg(long, value_name = "DIR")]
    pub capath: Option<PathBuf>,

    /// PEM client certificate
    #[arg(long, value_name = "FILE")]
    pub cert: Option<PathBuf>,

    /// PEM private key of the client certificate
    #[arg(long, value_name = "FILE")]
    pub key: Option<PathBuf>,

    /// Do not verify the server certificate
    #[arg(long, short = 'k')]
    pub insecure: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Overrides configuration values with the options given on the command line.
    pub fn apply_to(&self, config: &mut PepClientConfig) {
        if !self.endpoints.is_empty() {
            config.endpoints.clone_from(&self.endpoints);
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if self.cacert.is_some() {
            config.tls.server_ca_file.clone_from(&self.cacert);
        }
        if self.capath.is_some() {
            config.tls.server_ca_path.clone_from(&self.capath);
        }
        if self.cert.is_some() {
            config.tls.client_cert.clone_from(&self.cert);
        }
        if self.key.is_some() {
            config.tls.client_key.clone_from(&self.key);
        }
        if self.insecure {
            config.tls.validation = false;
        }
    }

    /// Log filter directive for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Subject,
    Resource,
    Action,
    Environment,
}

/// Attribute given with `--attribute scope:id=value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraAttribute {
    pub scope: Scope,
    pub id: String,
    pub value: String,
}

impl FromStr for ExtraAttribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scope, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("'{s}' is not of the form scope:id=value"))?;
        let scope = match scope {
            "subject" => Scope::Subject,
            "resource" => Scope::Resource,
            "action" => Scope::Action,
            "environment" => Scope::Environment,
            other => {
                return Err(format!(
                    "unknown scope '{other}', expected subject, resource, action or environment"
                ));
            }
        };
        let (id, value) = rest
            .split_once('=')
            .ok_or_else(|| format!("'{s}' is missing '=value'"))?;
        if id.is_empty() {
            return Err(format!("'{s}' has an empty attribute id"));
        }
        Ok(Self {
            scope,
            id: id.to_owned(),
            value: value.to_owned(),
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_attribute_with_urn_id() {
        let attr: ExtraAttribute = "resource:urn:example:owner=alice=admin".parse().unwrap();
        assert_eq!(attr.scope, Scope::Resource);
        assert_eq!(attr.id, "urn:example:owner");
        assert_eq!(attr.value, "alice=admin");
    }

    #[test]
    fn test_attribute_errors() {
        assert!("owner=alice".parse::<ExtraAttribute>().is_err());
        assert!("tenant:owner=alice".parse::<ExtraAttribute>().is_err());
        assert!("subject:owner".parse::<ExtraAttribute>().is_err());
        assert!("subject:=x".parse::<ExtraAttribute>().is_err());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "pepcli",
            "--pepd",
            "https://a:8154/authz",
            "--pepd",
            "https://b:8154/authz",
            "-r",
            "res",
            "-a",
            "read",
            "--timeout",
            "5s",
            "--capath",
            "/etc/grid-security/certificates",
            "--insecure",
            "-vv",
        ]);
        let mut config = PepClientConfig {
            endpoints: vec!["https://from-file/authz".to_owned()],
            ..PepClientConfig::default()
        };
        cli.apply_to(&mut config);

        assert_eq!(config.endpoints.len(), 2);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.tls.validation);
        assert_eq!(
            config.tls.server_ca_path,
            Some(PathBuf::from("/etc/grid-security/certificates"))
        );
        assert_eq!(cli.log_level(), "debug");
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_print_config_needs_no_request() {
        let cli = Cli::try_parse_from(["pepcli", "--print-config"]).unwrap();
        assert!(cli.print_config);
        assert!(Cli::try_parse_from(["pepcli", "-r", "res"]).is_err());
    }

    #[test]
    fn test_absent_options_keep_config() {
        let cli = Cli::parse_from(["pepcli", "-r", "res", "-a", "read"]);
        let mut config = PepClientConfig {
            endpoints: vec!["https://from-file/authz".to_owned()],
            ..PepClientConfig::default()
        };
        let before = config.clone();
        cli.apply_to(&mut config);
        assert_eq!(config, before);
        assert_eq!(cli.log_level(), "warn");
    }
}
