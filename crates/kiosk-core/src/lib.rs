//! # kiosk-core - Core Domain Types
//!
//! Foundation crate for Kiosk Play. Provides the terminal's domain types,
//! the built-in fallback catalog, error handling, and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing, toml).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`TerminalStatus`] - Session lifecycle status (Loading, Active, LoadingGame, Blocked, Error)
//! - [`TerminalIdentity`] - Hardware-derived terminal identifier
//! - [`Credits`] - Server-authoritative balance, stored in cents
//! - [`Game`], [`GameId`], [`ActiveGame`] - Catalog entries and the running title
//! - [`KioskProfile`] - Terminal metadata returned by the backend
//!
//! ### Catalog (`catalog`)
//! - [`fallback_catalog()`] - The fixed list shown when the server has none
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use kiosk_core::prelude::*;
//! ```

pub mod catalog;
pub mod error;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all Kiosk Play crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use catalog::{fallback_catalog, FALLBACK_CATALOG_LEN};
pub use error::{Error, Result, ResultExt};
pub use types::{
    ActiveGame, Credits, Game, GameId, KioskProfile, NumberStyle, TerminalIdentity,
    TerminalStatus, ERROR_IDENTITY, UNKNOWN_DISK, UNKNOWN_UUID,
};
