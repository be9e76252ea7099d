//! Command line arguments.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

/// Environment variable holding the controller password.
pub const PASSWORD_ENV: &str = "KVMLAUNCH_PASSWORD";

/// Open a BMC remote console through javaws.
#[derive(Parser, Debug)]
#[command(name = "kvmlaunch")]
#[command(about = "Open a BMC remote console (iDRAC, iLO, iKVM) through javaws", long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// The controller host (or IP)
    #[arg(short = 'h', long)]
    pub host: String,

    /// The KVM vendor (dell, hp, supermicro, ibm)
    #[arg(short = 'V', long, default_value = "dell")]
    pub vendor: String,

    /// The KVM username (default: the vendor's factory username)
    #[arg(short = 'u', long, env = "KVMLAUNCH_USERNAME")]
    pub username: Option<String>,

    /// Prompt for the password (default: $KVMLAUNCH_PASSWORD, then the vendor's factory password)
    #[arg(short = 'p', long)]
    pub password: bool,

    /// Vendor specific version, e.g. 6, 7 or 8 for iDRAC (-1 detects it)
    #[arg(short = 'v', long, default_value_t = -1, allow_negative_numbers = true)]
    pub version: i32,

    /// Path to the javaws binary (default: javaws on PATH)
    #[arg(short = 'j', long)]
    pub javaws: Option<PathBuf>,

    /// Wait for the console process to end
    #[arg(short = 'w', long)]
    pub wait: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    /// Resolve the password: prompt when asked, else the environment.
    /// `None` leaves the vendor default in place.
    pub fn resolve_password(&self) -> Result<Option<String>> {
        if self.password {
            let term = console::Term::stderr();
            term.write_str("Password: ")
                .context("Failed to write password prompt")?;
            let password = term
                .read_secure_line()
                .context("Failed to read password")?;
            return Ok(Some(password));
        }

        Ok(std::env::var(PASSWORD_ENV).ok())
    }

    /// Resolve the javaws binary, searching PATH when none was given.
    pub fn resolve_javaws(&self) -> Result<PathBuf> {
        let path = match self.javaws {
            Some(ref path) => path.clone(),
            None => which::which("javaws").context("No javaws binary found on PATH")?,
        };

        if !path.exists() {
            anyhow::bail!("No javaws binary found at {}", path.display());
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["kvmlaunch", "-h", "10.0.0.42"]).unwrap();
        assert_eq!(cli.host, "10.0.0.42");
        assert_eq!(cli.vendor, "dell");
        assert_eq!(cli.version, -1);
        assert!(!cli.password);
        assert!(!cli.wait);
        assert!(cli.javaws.is_none());
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "kvmlaunch", "-h", "ilo.lab", "-V", "hp", "-u", "ops", "-p", "-v", "104", "-j",
            "/opt/java/bin/javaws", "-w",
        ])
        .unwrap();
        assert_eq!(cli.host, "ilo.lab");
        assert_eq!(cli.vendor, "hp");
        assert_eq!(cli.username.as_deref(), Some("ops"));
        assert!(cli.password);
        assert_eq!(cli.version, 104);
        assert_eq!(cli.javaws, Some(PathBuf::from("/opt/java/bin/javaws")));
        assert!(cli.wait);
    }

    #[test]
    fn test_negative_version() {
        let cli = Cli::try_parse_from(["kvmlaunch", "-h", "h", "-v", "-1"]).unwrap();
        assert_eq!(cli.version, -1);
    }

    #[test]
    fn test_host_required() {
        assert!(Cli::try_parse_from(["kvmlaunch", "-V", "dell"]).is_err());
    }

    #[test]
    fn test_missing_javaws() {
        let cli = Cli::try_parse_from(["kvmlaunch", "-h", "h", "-j", "/nonexistent/javaws"]).unwrap();
        let err = cli.resolve_javaws().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/javaws"));
    }
}
