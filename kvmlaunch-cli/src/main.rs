//! kvmlaunch: open a BMC remote console through javaws.
//!
//! ```text
//! kvmlaunch -h 10.0.0.42                 # Dell iDRAC, detect version
//! kvmlaunch -h ilo.lab -V hp -u ops -p   # HP iLO, prompt for password
//! RUST_LOG=debug kvmlaunch -h 10.0.0.42  # show every probe
//! ```

mod cli;
mod launcher;

use anyhow::{Context, Result};
use clap::Parser;
use kvmlaunch::{Driver, DriverBuilder, Vendor};
use log::info;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let vendor: Vendor = cli.vendor.parse().with_context(|| {
        format!(
            "Provided vendor '{}' is not supported (known vendors: {})",
            cli.vendor,
            Vendor::ALL.map(|v| v.name()).join(", ")
        )
    })?;
    let javaws = cli.resolve_javaws()?;

    let mut builder = DriverBuilder::new(cli.host.as_str())
        .vendor(vendor.name())
        .version(cli.version);
    if let Some(ref username) = cli.username {
        builder = builder.username(username);
    }
    if let Some(password) = cli.resolve_password()? {
        builder = builder.password(password);
    }

    let mut driver = builder.build()?;
    let descriptor = driver
        .produce_descriptor()
        .await
        .with_context(|| format!("Failed to prepare console for {}", cli.host))?;

    let jnlp = launcher::write_descriptor(driver.host(), &descriptor)?;
    info!("Wrote launch descriptor to {}", jnlp.path().display());

    launcher::launch(&javaws, cli.wait, jnlp.path()).await
}
