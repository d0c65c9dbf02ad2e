//! Command line entry point: flags, pre-flight checks and the exit status.

use crate::checklist;
use crate::config::{Config, ConfigError};
use crate::report::{exit_status, Reporter};
use crate::Snowprobe;

use clap::Parser;
use log::LevelFilter;
use std::io::Write;
use std::path::PathBuf;

/// Checks that a Snowflake service account can log in with its RSA key and
/// run basic DDL and DML.
#[derive(Parser, Debug)]
#[command(name = "snowprobe")]
#[command(version, about)]
pub struct Args {
    /// JSON file with account, user, warehouse, database, schema and role
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Unencrypted PEM private key registered with the service user
    #[arg(long, default_value = "../rsa_key.p8")]
    pub private_key: PathBuf,

    /// Log requests and timings to stderr
    #[arg(long)]
    pub verbose: bool,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose { LevelFilter::Debug } else { LevelFilter::Warn }
    }
}

/// Runs the whole program and returns its exit status.
pub async fn run<W: Write>(args: &Args, reporter: &mut Reporter<W>) -> u8 {
    let Some(config) = preflight(args, reporter) else {
        return exit_status(false);
    };

    let connector = Snowprobe::from_config(&config);
    let success = match checklist::run(&config, &connector, &args.private_key, reporter).await {
        Ok(()) => true,
        Err(e) => {
            log::debug!("Connection test failed: {e:?}");
            false
        }
    };

    reporter.summary(success);
    exit_status(success)
}

/// Loads the config and checks the key file exists, printing instructions
/// for whatever is missing. No connection is attempted from here.
fn preflight<W: Write>(args: &Args, reporter: &mut Reporter<W>) -> Option<Config> {
    reporter.line(&format!("Loading configuration from {}...", args.config.display()));

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            reporter.line(&format!("✗ {e}"));
            if let ConfigError::NotFound(_) = e {
                reporter.line("");
                reporter.line("Please create it from the template:");
                reporter.line(&format!("  cp config.template.json {}", args.config.display()));
                reporter.line("Then fill in your Snowflake account details.");
            }
            return None;
        }
    };

    if !args.private_key.exists() {
        reporter.line(&format!("✗ Private key not found at {}", args.private_key.display()));
        reporter.line("Generate a key pair and register the public key with the service user,");
        reporter.line("or pass its location with --private-key.");
        return None;
    }

    if let Err(e) = config.ensure_configured() {
        reporter.line(&format!("✗ {e}"));
        reporter.line("Set it to your account identifier, e.g. xy12345.us-east-2");
        return None;
    }

    reporter.line("✓ Configuration loaded successfully");
    reporter.line("");
    Some(config)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::try_parse_from(["snowprobe"]).unwrap();
        assert_eq!(args.config, PathBuf::from("config.json"));
        assert_eq!(args.private_key, PathBuf::from("../rsa_key.p8"));
        assert_eq!(args.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_explicit_args() {
        let args = Args::try_parse_from([
            "snowprobe",
            "--config", "etl.json",
            "--private-key", "/secrets/etl.p8",
            "--verbose",
        ]).unwrap();
        assert_eq!(args.config, PathBuf::from("etl.json"));
        assert_eq!(args.private_key, PathBuf::from("/secrets/etl.p8"));
        assert_eq!(args.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Args::try_parse_from(["snowprobe", "--password", "hunter2"]).is_err());
    }

}
