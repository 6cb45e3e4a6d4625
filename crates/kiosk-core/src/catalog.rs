//! Built-in fallback catalog
//!
//! Shown whenever the backend catalog request fails or returns no entries.

use crate::types::Game;

/// Number of entries in the fallback catalog
pub const FALLBACK_CATALOG_LEN: usize = 8;

const FALLBACK_ENTRIES: [(i64, &str, &str); FALLBACK_CATALOG_LEN] = [
    (1, "Royal 777 Deluxe", "#FFD700"),
    (2, "Fortune Tiger", "#F44336"),
    (3, "Golden Empire", "#FF9800"),
    (4, "Dragon Treasures", "#4CAF50"),
    (5, "Buffalo King", "#795548"),
    (6, "Cleopatra Gold", "#9C27B0"),
    (7, "Zeus Thunder", "#2196F3"),
    (8, "Mega Joker", "#673AB7"),
];

/// The fixed sample catalog, in display order
pub fn fallback_catalog() -> Vec<Game> {
    FALLBACK_ENTRIES
        .iter()
        .map(|(id, title, color)| Game::new(*id, *title).with_color(*color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameId;

    #[test]
    fn test_fallback_catalog_has_eight_slots() {
        let catalog = fallback_catalog();
        assert_eq!(catalog.len(), FALLBACK_CATALOG_LEN);
        assert!(catalog.iter().all(|g| g.kind == "SLOT"));
        assert!(catalog.iter().all(|g| g.slug.is_none()));
    }

    #[test]
    fn test_fallback_catalog_order_is_stable() {
        let ids: Vec<GameId> = fallback_catalog().into_iter().map(|g| g.id).collect();
        let expected: Vec<GameId> = (1..=8).map(GameId::Number).collect();
        assert_eq!(ids, expected);
        assert_eq!(fallback_catalog()[2].title, "Golden Empire");
    }
}
