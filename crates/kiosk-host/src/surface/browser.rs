//! Game surface backed by a Chromium-family browser process

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStderr, Command};
use tokio::sync::{mpsc, oneshot, Notify};

use kiosk_core::prelude::*;

use super::console::{parse_browser_line, BrowserLine};
use super::devtools::watch_popups;
use super::{SurfaceEvent, SurfaceHandle, SurfaceHost, SurfaceSpec, WindowOpenPolicy};

/// Executables tried, in order, when no browser is configured
const BROWSER_CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "microsoft-edge",
    "msedge",
    "chrome",
    "brave-browser",
];

/// Locate the browser used for game surfaces
pub fn find_browser(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        return which::which(path).map_err(|e| {
            warn!("Configured browser {} not usable: {}", path.display(), e);
            Error::BrowserNotFound
        });
    }

    BROWSER_CANDIDATES
        .iter()
        .find_map(|name| which::which(name).ok())
        .ok_or(Error::BrowserNotFound)
}

/// Command line for one surface
pub fn browser_args(spec: &SurfaceSpec) -> Vec<String> {
    let mut args = vec![
        format!("--user-data-dir={}", spec.partition_dir.display()),
        format!("--user-agent={}", spec.user_agent),
        "--no-first-run".to_string(),
        "--no-default-browser-check".to_string(),
        "--autoplay-policy=no-user-gesture-required".to_string(),
        "--enable-logging=stderr".to_string(),
        "--v=0".to_string(),
        "--remote-debugging-port=0".to_string(),
    ];

    if spec.allow_popups {
        args.push("--disable-popup-blocking".to_string());
    }

    if spec.kiosk {
        args.push("--kiosk".to_string());
    }
    args.push(format!("--app={}", spec.url));

    args
}

/// Spawns one browser process per open game
#[derive(Debug, Clone, Default)]
pub struct BrowserSurfaceHost {
    browser: Option<PathBuf>,
    policy: WindowOpenPolicy,
}

impl BrowserSurfaceHost {
    pub fn new(browser: Option<PathBuf>, policy: WindowOpenPolicy) -> Self {
        Self { browser, policy }
    }

    /// Background task: owns `child`, reports its exit.
    async fn wait_for_exit(
        mut child: Child,
        kill_rx: oneshot::Receiver<()>,
        events: mpsc::Sender<SurfaceEvent>,
        exited: Arc<AtomicBool>,
        exit_notify: Arc<Notify>,
    ) {
        let code = tokio::select! {
            result = child.wait() => match result {
                Ok(status) => {
                    info!("Game surface exited with status: {:?}", status);
                    status.code()
                }
                Err(e) => {
                    error!("Error waiting for game surface: {}", e);
                    None
                }
            },
            _ = kill_rx => {
                info!("Closing game surface");
                if let Err(e) = child.kill().await {
                    error!("Failed to kill game surface: {}", e);
                }
                child.wait().await.ok().and_then(|status| status.code())
            }
        };

        exited.store(true, Ordering::Release);
        exit_notify.notify_waiters();

        let _ = events.send(SurfaceEvent::Exited { code }).await;
    }

    async fn stderr_reader(
        stderr: ChildStderr,
        policy: WindowOpenPolicy,
        events: mpsc::Sender<SurfaceEvent>,
    ) {
        let mut reader = BufReader::new(stderr).lines();
        let mut watching = false;

        while let Ok(Some(line)) = reader.next_line().await {
            match parse_browser_line(&line) {
                BrowserLine::Console(message) => {
                    if message.is_noise() {
                        continue;
                    }
                    message.forward();
                    if events.send(SurfaceEvent::Console(message)).await.is_err() {
                        debug!("surface event channel closed");
                        break;
                    }
                }
                BrowserLine::DevTools(url) if !watching => {
                    debug!("Surface debugging endpoint: {}", url);
                    watching = true;
                    tokio::spawn(watch_popups(url, policy, events.clone()));
                }
                _ => trace!("browser: {}", line),
            }
        }

        debug!("surface stderr reader finished");
    }
}

impl SurfaceHost for BrowserSurfaceHost {
    async fn open(
        &self,
        spec: SurfaceSpec,
        events: mpsc::Sender<SurfaceEvent>,
    ) -> Result<SurfaceHandle> {
        let browser = find_browser(self.browser.as_deref())?;

        tokio::fs::create_dir_all(&spec.partition_dir)
            .await
            .map_err(|e| {
                Error::surface(format!(
                    "cannot create partition {}: {}",
                    spec.partition_dir.display(),
                    e
                ))
            })?;

        let args = browser_args(&spec);
        info!(
            "Opening '{}' in {} (partition {})",
            spec.title,
            browser.display(),
            spec.partition
        );
        debug!("Surface args: {}", args.join(" "));

        let mut child = Command::new(&browser)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::BrowserNotFound
                } else {
                    Error::surface(format!("failed to start {}: {}", browser.display(), e))
                }
            })?;

        let pid = child.id();

        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(Self::stderr_reader(stderr, self.policy, events.clone()));
        }

        let exited = Arc::new(AtomicBool::new(false));
        let exit_notify = Arc::new(Notify::new());
        let (kill_tx, kill_rx) = oneshot::channel::<()>();

        tokio::spawn(Self::wait_for_exit(
            child,
            kill_rx,
            events,
            Arc::clone(&exited),
            Arc::clone(&exit_notify),
        ));

        Ok(SurfaceHandle::new(pid, kill_tx, exited, exit_notify))
    }

    async fn close(&self, handle: SurfaceHandle) -> Result<()> {
        handle.shutdown().await
    }
}
