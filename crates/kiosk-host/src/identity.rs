//! Terminal identity derived from host hardware facts.
//!
//! The identity is the lowercase hex SHA-256 of `{disk_serial}-{uuid}`, where
//! `uuid` is the OS installation UUID (or the hardware UUID when the OS has
//! none). It is recomputed on every start and never persisted, so it stays
//! stable for as long as the hardware and OS install do.
//!
//! Collection never fails outward: missing facts are replaced with
//! [`UNKNOWN_DISK`]/[`UNKNOWN_UUID`], and when nothing at all can be read the
//! fixed [`ERROR_IDENTITY`] sentinel is reported.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tokio::process::Command;

use kiosk_core::prelude::*;
use kiosk_core::{TerminalIdentity, ERROR_IDENTITY, UNKNOWN_DISK, UNKNOWN_UUID};

/// Source of the raw host facts the identity is derived from.
///
/// `Ok(None)` means the fact does not exist on this host; `Err` means the
/// collector could not query the host at all.
#[trait_variant::make(HostInfoCollector: Send)]
pub trait LocalHostInfoCollector {
    /// Serial number of the primary disk
    async fn disk_serial(&self) -> Result<Option<String>>;

    /// OS installation UUID, falling back to the hardware UUID
    async fn system_uuid(&self) -> Result<Option<String>>;
}

/// Hash the two host facts into an identity string
pub fn derive_identity(disk_serial: &str, system_uuid: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{disk_serial}-{system_uuid}").as_bytes());
    hex::encode(hasher.finalize())
}

/// Collect host facts and derive the terminal identity.
///
/// Never fails; degraded identities are flagged via
/// [`TerminalIdentity::is_degraded`].
pub async fn get_identity<C>(collector: &C) -> TerminalIdentity
where
    C: HostInfoCollector + Sync,
{
    let disk = collector.disk_serial().await;
    let uuid = collector.system_uuid().await;

    if let (Err(disk_err), Err(uuid_err)) = (&disk, &uuid) {
        error!(
            "Failed to collect host information (disk: {}, uuid: {}), using {}",
            disk_err, uuid_err, ERROR_IDENTITY
        );
        return TerminalIdentity::error_sentinel();
    }

    let (disk, disk_missing) = fact_or_sentinel(disk, UNKNOWN_DISK, "disk serial");
    let (uuid, uuid_missing) = fact_or_sentinel(uuid, UNKNOWN_UUID, "system uuid");

    let value = derive_identity(&disk, &uuid);
    if disk_missing || uuid_missing {
        warn!("Terminal identity derived with sentinel values");
        TerminalIdentity::degraded(value)
    } else {
        TerminalIdentity::new(value)
    }
}

fn fact_or_sentinel(
    fact: Result<Option<String>>,
    sentinel: &str,
    what: &str,
) -> (String, bool) {
    match fact {
        Ok(Some(value)) if !value.trim().is_empty() => (value.trim().to_string(), false),
        Ok(_) => {
            debug!("Host {} not available, using {}", what, sentinel);
            (sentinel.to_string(), true)
        }
        Err(e) => {
            warn!("Failed to read host {}: {}", what, e);
            (sentinel.to_string(), true)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// System collector
// ─────────────────────────────────────────────────────────────────────────────

/// Block device name prefixes that never identify a physical disk
const VIRTUAL_BLOCK_PREFIXES: &[&str] = &["loop", "ram", "zram", "dm-", "sr", "md", "nbd"];

/// Reads host facts from the running operating system
#[derive(Debug, Clone)]
pub struct SystemHostInfo {
    /// Root of the filesystem queried for sysfs/machine-id (Linux)
    root: PathBuf,
}

impl Default for SystemHostInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemHostInfo {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("/"),
        }
    }

    /// Query a different filesystem root, e.g. a fixture tree in tests
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// First serial found among the physical block devices, sorted by name
    async fn linux_disk_serial(&self) -> Result<Option<String>> {
        let block_dir = self.path("sys/block");
        let mut entries = tokio::fs::read_dir(&block_dir)
            .await
            .map_err(|e| Error::identity(format!("{}: {}", block_dir.display(), e)))?;

        let mut devices = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            if !VIRTUAL_BLOCK_PREFIXES.iter().any(|p| name.starts_with(p)) {
                devices.push(name);
            }
        }
        devices.sort();

        for device in devices {
            let base = block_dir.join(&device);
            for candidate in ["device/serial", "serial", "device/wwid"] {
                if let Some(serial) = read_trimmed(&base.join(candidate)).await {
                    debug!("Disk serial read from {}", device);
                    return Ok(Some(serial));
                }
            }
        }

        Ok(None)
    }

    async fn linux_system_uuid(&self) -> Result<Option<String>> {
        // OS install id first, hardware id second
        for candidate in [
            "etc/machine-id",
            "var/lib/dbus/machine-id",
            "sys/class/dmi/id/product_uuid",
        ] {
            if let Some(uuid) = read_trimmed(&self.path(candidate)).await {
                return Ok(Some(uuid));
            }
        }

        if self.path("etc").exists() {
            Ok(None)
        } else {
            Err(Error::identity(format!(
                "{} is not a readable system root",
                self.root.display()
            )))
        }
    }
}

impl HostInfoCollector for SystemHostInfo {
    async fn disk_serial(&self) -> Result<Option<String>> {
        if cfg!(target_os = "macos") {
            let output = run_command("system_profiler", &["SPNVMeDataType", "SPSerialATADataType"])
                .await?;
            Ok(parse_labelled_value(&output, "Serial Number:"))
        } else if cfg!(target_os = "windows") {
            let output = run_command("wmic", &["diskdrive", "get", "serialnumber"]).await?;
            Ok(parse_wmic_value(&output, "SerialNumber"))
        } else {
            self.linux_disk_serial().await
        }
    }

    async fn system_uuid(&self) -> Result<Option<String>> {
        if cfg!(target_os = "macos") {
            let output = run_command("ioreg", &["-rd1", "-c", "IOPlatformExpertDevice"]).await?;
            Ok(parse_ioreg_uuid(&output))
        } else if cfg!(target_os = "windows") {
            let output = run_command(
                "powershell",
                &[
                    "-NoProfile",
                    "-Command",
                    "(Get-ItemProperty -Path 'HKLM:\\SOFTWARE\\Microsoft\\Cryptography' -Name MachineGuid).MachineGuid",
                ],
            )
            .await?;
            Ok(first_non_empty_line(&output))
        } else {
            self.linux_system_uuid().await
        }
    }
}

async fn read_trimmed(path: &Path) -> Option<String> {
    let text = tokio::fs::read_to_string(path).await.ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

async fn run_command(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .inspect_err(|e| debug!("{} {:?} failed to start: {}", program, args, e))
        .map_err(|e| Error::identity(format!("{program}: {e}")))?;

    if !output.status.success() {
        return Err(Error::identity(format!(
            "{} exited with {}",
            program, output.status
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

fn first_non_empty_line(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Value after `label` on the first line that carries it
fn parse_labelled_value(output: &str, label: &str) -> Option<String> {
    output
        .lines()
        .filter_map(|line| line.trim().strip_prefix(label))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// First data row of a `wmic ... get <column>` listing
fn parse_wmic_value(output: &str, column: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.eq_ignore_ascii_case(column))
        .map(str::to_string)
        .next()
}

/// `"IOPlatformUUID" = "XXXXXXXX-..."`
fn parse_ioreg_uuid(output: &str) -> Option<String> {
    output
        .lines()
        .find(|line| line.contains("\"IOPlatformUUID\""))
        .and_then(|line| line.split('=').nth(1))
        .map(|value| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}
