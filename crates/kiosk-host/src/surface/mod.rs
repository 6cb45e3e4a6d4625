//! Game surface: an isolated browser window showing the launched title.
//!
//! Each title gets its own persistent storage partition so cookies and local
//! storage survive across sessions of the same game but never leak between
//! games. The surface presents itself with a fixed desktop user agent and
//! allows the game to open new windows.

pub mod browser;
pub mod console;
pub mod devtools;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tokio::sync::{mpsc, oneshot, Notify};

use kiosk_core::prelude::*;
use kiosk_core::ActiveGame;

pub use browser::BrowserSurfaceHost;
pub use console::ConsoleMessage;

/// User agent every surface presents to game servers
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Grace period for a surface to exit after a close request
const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

/// Host-wide surface settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceOptions {
    /// Browser executable; discovered on PATH when `None`
    pub browser: Option<PathBuf>,
    pub user_agent: String,
    /// Fullscreen kiosk window instead of an app window
    pub kiosk: bool,
    pub allow_popups: bool,
    /// Directory holding one profile directory per partition
    pub partition_root: PathBuf,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            browser: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            kiosk: false,
            allow_popups: true,
            partition_root: default_partition_root(),
        }
    }
}

/// `{data_local_dir}/kiosk-play/partitions`
pub fn default_partition_root() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kiosk-play")
        .join("partitions")
}

/// Bytes escaped in partition directory names; `%` itself is escaped so
/// distinct keys never map to the same directory
const PARTITION_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'_').remove(b'-');

/// Profile directory for a partition key such as `persist:game_3`
pub fn partition_dir(root: &Path, partition: &str) -> PathBuf {
    let name = partition.strip_prefix("persist:").unwrap_or(partition);
    root.join(utf8_percent_encode(name, PARTITION_ESCAPE).to_string())
}

/// Everything needed to show one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSpec {
    pub title: String,
    pub url: String,
    pub partition: String,
    pub partition_dir: PathBuf,
    pub user_agent: String,
    pub allow_popups: bool,
    pub kiosk: bool,
}

impl SurfaceSpec {
    pub fn for_game(game: &ActiveGame, options: &SurfaceOptions) -> Self {
        Self {
            title: game.game.title.clone(),
            url: game.url.clone(),
            partition: game.partition.clone(),
            partition_dir: partition_dir(&options.partition_root, &game.partition),
            user_agent: options.user_agent.clone(),
            allow_popups: options.allow_popups,
            kiosk: options.kiosk,
        }
    }
}

/// Events reported by a running surface
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// A console message from the game page
    Console(ConsoleMessage),
    /// The game opened a new window
    WindowOpened { url: String },
    /// The surface went away (closed by the user, crashed, or killed)
    Exited { code: Option<i32> },
}

// ─────────────────────────────────────────────────────────────────────────────
// Window open policy
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowOpenAction {
    Allow,
    Deny,
}

/// Decides what happens when a game tries to open a new window
#[derive(Debug, Clone, Copy)]
pub struct WindowOpenPolicy {
    allow: bool,
}

impl WindowOpenPolicy {
    pub fn new(allow: bool) -> Self {
        Self { allow }
    }

    /// Log the attempt and return the action; popups are allowed by default
    pub fn decide(&self, url: &str) -> WindowOpenAction {
        info!(target: "game", "Game requested a new window: {}", url);
        if self.allow {
            WindowOpenAction::Allow
        } else {
            WindowOpenAction::Deny
        }
    }
}

impl Default for WindowOpenPolicy {
    fn default() -> Self {
        Self::new(true)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Handle
// ─────────────────────────────────────────────────────────────────────────────

/// Owner of an open surface.
///
/// Dropping the handle closes the surface.
#[derive(Debug)]
pub struct SurfaceHandle {
    pid: Option<u32>,
    /// Consumed on first close (or on drop)
    kill_tx: Option<oneshot::Sender<()>>,
    exited: Arc<AtomicBool>,
    exit_notify: Arc<Notify>,
}

impl SurfaceHandle {
    pub(crate) fn new(
        pid: Option<u32>,
        kill_tx: oneshot::Sender<()>,
        exited: Arc<AtomicBool>,
        exit_notify: Arc<Notify>,
    ) -> Self {
        Self {
            pid,
            kill_tx: Some(kill_tx),
            exited,
            exit_notify,
        }
    }

    pub fn id(&self) -> Option<u32> {
        self.pid
    }

    pub fn has_exited(&self) -> bool {
        self.exited.load(Ordering::Acquire)
    }

    /// Request the surface to go away and wait briefly for it to do so
    pub async fn shutdown(mut self) -> Result<()> {
        let exit_notify = Arc::clone(&self.exit_notify);
        let notified = exit_notify.notified();
        if self.has_exited() {
            return Ok(());
        }

        if let Some(tx) = self.kill_tx.take() {
            let _ = tx.send(());
        }

        match tokio::time::timeout(CLOSE_TIMEOUT, notified).await {
            Ok(()) => {
                debug!("Surface {:?} closed", self.pid);
                Ok(())
            }
            Err(_) if self.has_exited() => Ok(()),
            Err(_) => Err(Error::surface(format!(
                "surface {:?} did not exit within {:?}",
                self.pid, CLOSE_TIMEOUT
            ))),
        }
    }
}

impl Drop for SurfaceHandle {
    fn drop(&mut self) {
        if !self.has_exited() {
            if let Some(tx) = self.kill_tx.take() {
                let _ = tx.send(());
            }
        }
    }
}

/// Opens and closes game surfaces
#[trait_variant::make(SurfaceHost: Send)]
pub trait LocalSurfaceHost {
    /// Show the game described by `spec`; events flow into `events`
    async fn open(
        &self,
        spec: SurfaceSpec,
        events: mpsc::Sender<SurfaceEvent>,
    ) -> Result<SurfaceHandle>;

    /// Tear down a surface opened by this host
    async fn close(&self, handle: SurfaceHandle) -> Result<()>;
}
