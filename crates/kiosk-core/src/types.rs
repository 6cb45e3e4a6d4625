//! Core domain types for the kiosk terminal

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Sentinel substituted when the primary disk serial cannot be read
pub const UNKNOWN_DISK: &str = "UNKNOWN_DISK";

/// Sentinel substituted when neither OS nor hardware UUID can be read
pub const UNKNOWN_UUID: &str = "UNKNOWN_UUID";

/// Identity reported when host information collection fails entirely
pub const ERROR_IDENTITY: &str = "ERROR_GEN_HWID";

// ─────────────────────────────────────────────────────────────────────────────
// Terminal Status
// ─────────────────────────────────────────────────────────────────────────────

/// Lifecycle status of the terminal session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalStatus {
    /// Collecting identity and authenticating
    #[default]
    Loading,
    /// Authenticated and idle or playing
    Active,
    /// Waiting for the backend to issue a game URL
    LoadingGame,
    /// Locked by the backend or rejected at authentication
    Blocked,
    /// Startup failed; only a reload leaves this state
    Error,
}

impl TerminalStatus {
    /// Whether the heartbeat timer should be running in this status
    pub fn is_heartbeat_eligible(&self) -> bool {
        matches!(self, TerminalStatus::Active | TerminalStatus::LoadingGame)
    }

    /// Blocked and Error can only be left through a full reload
    pub fn requires_reload(&self) -> bool {
        matches!(self, TerminalStatus::Blocked | TerminalStatus::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalStatus::Loading => "loading",
            TerminalStatus::Active => "active",
            TerminalStatus::LoadingGame => "loading_game",
            TerminalStatus::Blocked => "blocked",
            TerminalStatus::Error => "error",
        }
    }
}

impl fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Terminal Identity
// ─────────────────────────────────────────────────────────────────────────────

/// Hardware-derived identifier for this terminal.
///
/// Used as the external handle for the terminal, never as a secret.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerminalIdentity {
    value: String,
    degraded: bool,
}

impl TerminalIdentity {
    /// Identity computed from real host facts
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            degraded: false,
        }
    }

    /// Identity that includes at least one sentinel
    pub fn degraded(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            degraded: true,
        }
    }

    /// The fixed identity used when nothing could be collected
    pub fn error_sentinel() -> Self {
        Self::degraded(ERROR_IDENTITY)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// True when a sentinel was substituted for a host fact
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Short form shown in the lobby header
    pub fn short(&self, len: usize) -> &str {
        match self.value.char_indices().nth(len) {
            Some((idx, _)) => &self.value[..idx],
            None => &self.value,
        }
    }
}

impl fmt::Display for TerminalIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Credits
// ─────────────────────────────────────────────────────────────────────────────

/// Digit grouping style used when formatting balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberStyle {
    /// `1.234,56`
    #[default]
    PtBr,
    /// `1,234.56`
    EnUs,
}

impl NumberStyle {
    fn separators(&self) -> (char, char) {
        match self {
            NumberStyle::PtBr => ('.', ','),
            NumberStyle::EnUs => (',', '.'),
        }
    }
}

/// Micro-units per currency unit
const MICROS_PER_UNIT: i64 = 1_000_000;
const MICROS_PER_CENT: i64 = MICROS_PER_UNIT / 100;

/// Terminal balance, held in millionths of the currency unit.
///
/// The backend is the only source of new values; the client overwrites its
/// copy and never derives balances from its own actions. Amounts are only
/// rounded to cents for display, so a sub-cent balance still counts as
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Credits {
    micros: i64,
}

impl Credits {
    pub const ZERO: Credits = Credits { micros: 0 };

    pub fn from_cents(cents: i64) -> Self {
        Self {
            micros: cents.saturating_mul(MICROS_PER_CENT),
        }
    }

    /// Balance rounded half away from zero to whole cents
    pub fn cents(&self) -> i64 {
        let half = MICROS_PER_CENT / 2;
        if self.micros >= 0 {
            (self.micros + half) / MICROS_PER_CENT
        } else {
            (self.micros - half) / MICROS_PER_CENT
        }
    }

    /// Parse a decimal amount, e.g. `"10.50"` or `" 8 "`.
    pub fn parse(text: &str) -> Option<Self> {
        let value: f64 = text.trim().parse().ok()?;
        Self::from_f64(value)
    }

    /// Parse a JSON value that is either a number or a numeric string.
    ///
    /// Returns `None` for anything non-numeric, so callers can keep the
    /// previous balance.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().and_then(Self::from_f64),
            Value::String(s) => Self::parse(s),
            _ => None,
        }
    }

    fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let mut micros = (value * MICROS_PER_UNIT as f64).round() as i64;
        // Any amount above zero stays launchable.
        if value > 0.0 && micros == 0 {
            micros = 1;
        }
        Some(Self { micros })
    }

    pub fn is_positive(&self) -> bool {
        self.micros > 0
    }

    pub fn as_f64(&self) -> f64 {
        self.micros as f64 / MICROS_PER_UNIT as f64
    }

    /// Format with two decimals, clamping negative balances to zero.
    pub fn format(&self, style: NumberStyle) -> String {
        let cents = self.cents().max(0);
        let (group_sep, decimal_sep) = style.separators();

        let whole = (cents / 100).to_string();
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(group_sep);
            }
            grouped.push(ch);
        }

        format!("{grouped}{decimal_sep}{:02}", cents % 100)
    }

    /// Format with a currency symbol prefix, e.g. `R$ 1.234,56`.
    pub fn format_with_symbol(&self, symbol: &str, style: NumberStyle) -> String {
        if symbol.is_empty() {
            self.format(style)
        } else {
            format!("{symbol} {}", self.format(style))
        }
    }
}

impl Serialize for Credits {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.unsigned_abs();
        write!(f, "{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Games
// ─────────────────────────────────────────────────────────────────────────────

/// Catalog identifier as sent by the backend (numeric or string)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GameId {
    Number(i64),
    Text(String),
}

impl From<i64> for GameId {
    fn from(value: i64) -> Self {
        GameId::Number(value)
    }
}

impl From<&str> for GameId {
    fn from(value: &str) -> Self {
        GameId::Text(value.to_string())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameId::Number(n) => write!(f, "{n}"),
            GameId::Text(s) => f.write_str(s),
        }
    }
}

fn default_game_type() -> String {
    "SLOT".to_string()
}

/// A playable title in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,

    pub title: String,

    /// Category tag, e.g. "SLOT"
    #[serde(rename = "type", default = "default_game_type")]
    pub kind: String,

    /// Presentation hint, `#RRGGBB`
    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    /// Launch key; falls back to `id` when absent
    #[serde(default)]
    pub slug: Option<String>,
}

impl Game {
    pub fn new(id: impl Into<GameId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: default_game_type(),
            color: None,
            image_url: None,
            slug: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Key sent to the backend when starting this game
    pub fn launch_key(&self) -> GameId {
        match self.slug.as_deref() {
            Some(slug) if !slug.is_empty() => GameId::Text(slug.to_string()),
            _ => self.id.clone(),
        }
    }

    /// Storage partition that isolates this title's cookies and local storage
    pub fn partition_key(&self) -> String {
        format!("persist:game_{}", self.id)
    }
}

/// The game currently shown in the surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveGame {
    #[serde(flatten)]
    pub game: Game,

    /// Session-specific launch URL, never cached across launches
    pub url: String,

    /// Isolation key derived from the game id
    pub partition: String,

    /// Launch attempt that produced this game
    #[serde(skip)]
    pub attempt: u64,
}

impl ActiveGame {
    pub fn new(game: Game, url: impl Into<String>, attempt: u64) -> Self {
        let partition = game.partition_key();
        Self {
            game,
            url: url.into(),
            partition,
            attempt,
        }
    }

    pub fn id(&self) -> &GameId {
        &self.game.id
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Kiosk Profile
// ─────────────────────────────────────────────────────────────────────────────

/// Terminal metadata returned by the backend on authentication
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KioskProfile {
    /// Raw balance as sent by the backend (number or numeric string)
    #[serde(default)]
    pub credits: Value,

    /// Remaining server fields, kept for display and diagnostics
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl KioskProfile {
    /// Parsed balance, if the backend sent a numeric value
    pub fn credits(&self) -> Option<Credits> {
        Credits::from_json(&self.credits)
    }

    /// Display name, when the backend provides one
    pub fn name(&self) -> Option<&str> {
        self.extra.get("name").and_then(Value::as_str)
    }
}
