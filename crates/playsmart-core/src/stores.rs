//! CheapShark store IDs and their display names.

use std::borrow::Cow;

/// Numeric CheapShark store identifier.
pub type StoreId = u32;

/// Sorted by ID so lookups can binary-search.
static STORE_NAMES: &[(StoreId, &str)] = &[
    (1, "Steam"),
    (2, "GameBillet"),
    (3, "Green Man Gaming"),
    (5, "GOG"),
    (6, "Epic Games Store"),
    (7, "Fanatical"),
    (8, "Microsoft Store"),
    (10, "Humble Bundle"),
    (11, "2Game"),
    (12, "Gamesplanet"),
    (13, "Voidu"),
    (14, "Gamer's Gate"),
    (15, "WinGameStore"),
    (16, "Allyouplay"),
    (17, "IndieGala"),
    (18, "Shopify"),
    (19, "DreamGame"),
    (20, "GamersGate"),
    (21, "Nuuvem"),
    (22, "Glyph"),
    (23, "GameStop"),
    (24, "Oculus"),
    (25, "Best Buy"),
    (26, "Nintendo"),
    (27, "PlayStation Store"),
    (28, "Ubisoft"),
    (29, "Bethesda"),
    (30, "Blizzard"),
    (31, "Rockstar Games"),
    (32, "2K Games"),
    (33, "Borderlands"),
    (34, "Amazon"),
    (35, "Twitch"),
    (36, "Instant Gaming"),
    (37, "Eneba"),
    (38, "Kinguin"),
    (39, "Gamers Gate"),
    (40, "MacGameStore"),
    (41, "GamePlanet"),
];

/// Returns the known display name for `id`, if any.
#[must_use]
pub fn store_name(id: StoreId) -> Option<&'static str> {
    STORE_NAMES
        .binary_search_by_key(&id, |(key, _)| *key)
        .ok()
        .map(|idx| STORE_NAMES[idx].1)
}

/// Display name for `id`, falling back to `"Store {id}"` for unmapped IDs.
#[must_use]
pub fn store_display_name(id: StoreId) -> Cow<'static, str> {
    match store_name(id) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("Store {id}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_and_unique() {
        assert!(STORE_NAMES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn known_ids_resolve() {
        assert_eq!(store_name(1), Some("Steam"));
        assert_eq!(store_name(6), Some("Epic Games Store"));
        assert_eq!(store_name(41), Some("GamePlanet"));
    }

    #[test]
    fn gaps_in_the_table_are_unknown() {
        assert_eq!(store_name(4), None);
        assert_eq!(store_name(9), None);
        assert_eq!(store_name(0), None);
    }

    #[test]
    fn display_name_falls_back_for_unknown_ids() {
        assert_eq!(store_display_name(5), "GOG");
        assert_eq!(store_display_name(99), "Store 99");
    }
}
