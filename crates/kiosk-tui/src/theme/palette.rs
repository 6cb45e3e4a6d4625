//! Color palette for the kiosk screens.

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Rgb(10, 12, 16);
pub const CARD_BG: Color = Color::Rgb(18, 21, 28);
pub const POPUP_BG: Color = Color::Rgb(28, 33, 43);

// --- Borders ---
pub const BORDER_DIM: Color = Color::Rgb(45, 51, 59);
pub const BORDER_ACTIVE: Color = GOLD;

// --- Brand ---
pub const GOLD: Color = Color::Rgb(255, 215, 0);
pub const GOLD_DIM: Color = Color::Rgb(184, 134, 11);

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::Rgb(201, 209, 217);
pub const TEXT_SECONDARY: Color = Color::Rgb(125, 133, 144);
pub const TEXT_MUTED: Color = Color::Rgb(72, 79, 88);
pub const TEXT_BRIGHT: Color = Color::Rgb(240, 246, 252);

// --- Status ---
pub const STATUS_GREEN: Color = Color::Rgb(16, 185, 129);
pub const STATUS_RED: Color = Color::Rgb(244, 63, 94);
pub const STATUS_YELLOW: Color = Color::Rgb(234, 179, 8);

// --- Effects ---
pub const SHADOW: Color = Color::Rgb(5, 6, 8);

/// Black text on gold, for the selected card
pub const CONTRAST_FG: Color = Color::Black;

/// Parse a catalog color hint such as `#FFD700`
pub fn parse_hex(hint: &str) -> Option<Color> {
    let hex = hint.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex("#FFD700"), Some(Color::Rgb(255, 215, 0)));
        assert_eq!(parse_hex(" #ff4500 "), Some(Color::Rgb(255, 69, 0)));
    }

    #[test]
    fn test_parse_hex_rejects_malformed_hints() {
        assert_eq!(parse_hex("FFD700"), None);
        assert_eq!(parse_hex("#FFF"), None);
        assert_eq!(parse_hex("#GGGGGG"), None);
        assert_eq!(parse_hex("#ÿÿÿ"), None);
    }
}
