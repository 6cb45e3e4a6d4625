//! # kiosk-host - Privileged Host Integration
//!
//! Everything that touches the machine or the network on behalf of the
//! terminal: hardware identity, the kiosk backend API, the browser that shows
//! games, and the persisted session token.
//!
//! Depends on [`kiosk_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Identity
//! - [`HostInfoCollector`] - Source of disk serial and system UUID
//! - [`SystemHostInfo`] - Collector reading the running OS
//! - [`get_identity()`] - Derive the terminal identity, never fails
//!
//! ### Capability Bridge
//! - [`DeviceIdSource`] - The single operation the session may call on the host
//! - [`HostBridge`] - Host-side implementation
//!
//! ### Backend API
//! - [`KioskApi`] - Authenticate, catalog, heartbeat, start game
//! - [`HttpKioskClient`] - reqwest implementation
//! - [`ApiError`] - Status / no response / local failure classes
//!
//! ### Game Surface
//! - [`SurfaceHost`] - Open and close game surfaces
//! - [`BrowserSurfaceHost`] - Chromium-family browser per game
//! - [`WindowOpenPolicy`] - Popup handling
//!
//! ### Storage
//! - [`TokenStore`], [`FileTokenStore`], [`MemoryTokenStore`]

pub mod api;
pub mod bridge;
pub mod identity;
pub mod storage;
pub mod surface;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use api::{
    ApiError, ApiResult, AuthResponse, HeartbeatResponse, HttpKioskClient, KioskApi,
    RemoteCommand, StartGameResponse,
};
pub use bridge::{DeviceIdSource, HostBridge};
pub use identity::{derive_identity, get_identity, HostInfoCollector, SystemHostInfo};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use surface::{
    BrowserSurfaceHost, SurfaceEvent, SurfaceHandle, SurfaceHost, SurfaceOptions, SurfaceSpec,
    WindowOpenAction, WindowOpenPolicy, DEFAULT_USER_AGENT,
};
