//! Writing the descriptor to disk and handing it to javaws.

use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result, bail};
use kvmlaunch::Descriptor;
use log::{debug, info, warn};
use tempfile::NamedTempFile;
use tokio::process::Command;

/// Arguments javaws always gets after the descriptor path.
const JAVAWS_TRAILING_ARGS: [&str; 3] = ["-nosecurity", "-noupdate", "-Xnofork"];

/// Choose the javaws mode argument from `java -version` output.
///
/// Java 7 and 8 ship the classic javaws, which takes the descriptor as a
/// bare argument and only knows `-wait`. Anything newer is assumed to be
/// an OpenWebStart style launcher that wants `-jnlp`.
pub fn javaws_mode_arg(java_version: &str, wait: bool) -> Option<&'static str> {
    if java_version.contains("1.7") || java_version.contains("1.8") {
        wait.then_some("-wait")
    } else {
        Some("-jnlp")
    }
}

/// Run `java -version` and return what it printed. Java writes the banner
/// to stderr.
pub async fn java_version() -> Option<String> {
    let output = match Command::new("java").arg("-version").output().await {
        Ok(output) => output,
        Err(e) => {
            warn!("Couldn't run java -version: {}", e);
            return None;
        }
    };

    let banner = String::from_utf8_lossy(&output.stderr).into_owned();
    debug!("java -version: {}", banner.lines().next().unwrap_or_default());
    Some(banner)
}

/// Write the descriptor to a private temporary file named after the host.
/// The file is removed when the handle is dropped.
pub fn write_descriptor(host: &str, descriptor: &Descriptor) -> Result<NamedTempFile> {
    let prefix = format!("kvm_{}_", host.replace(['/', '\\'], "_"));
    let mut file = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".jnlp")
        .tempfile()
        .context("Failed to create JNLP file")?;

    file.write_all(descriptor.as_ref())
        .and_then(|_| file.flush())
        .with_context(|| format!("Failed to write {}", file.path().display()))?;

    Ok(file)
}

/// Build the full javaws argument list.
pub fn javaws_args<'a>(mode: Option<&'a str>, jnlp: &'a Path) -> Vec<&'a OsStr> {
    let mut args = Vec::with_capacity(5);
    if let Some(mode) = mode {
        args.push(OsStr::new(mode));
    }
    args.push(jnlp.as_os_str());
    args.extend(JAVAWS_TRAILING_ARGS.into_iter().map(OsStr::new));
    args
}

/// Launch javaws on the descriptor and wait for it to exit.
pub async fn launch(javaws: &Path, wait: bool, jnlp: &Path) -> Result<()> {
    let mode = match java_version().await {
        Some(banner) => javaws_mode_arg(&banner, wait),
        None => Some("-jnlp"),
    };

    info!("Launching KVM session with {}", jnlp.display());
    let status = Command::new(javaws)
        .args(javaws_args(mode, jnlp))
        .stdin(Stdio::null())
        .status()
        .await
        .with_context(|| format!("Unable to start {}", javaws.display()))?;

    if !status.success() {
        bail!(
            "Unable to launch console ({}), from file {}",
            status,
            jnlp.display()
        );
    }
    Ok(())
}
