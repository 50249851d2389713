//! Locale text normalization for portal content.
//!
//! The portal renders room names as Spanish feminine ordinals ("Primera",
//! "Séptima", ...) with inconsistent casing and accents, and free-text fields
//! carry accented characters that must not affect matching.

/// Ordinal room names as published by the portal, accent-stripped and
/// lower-cased. Index 0 is a placeholder so "primera" maps to room 1.
const ROOM_ORDINALS: [&str; 14] = [
    "",
    "primera",
    "segunda",
    "tercera",
    "cuarta",
    "quinta",
    "sexta",
    "septima",
    "octava",
    "novena",
    "decima",
    "undecima",
    "duodecima",
    "decimotercera",
];

/// Replace Spanish accented vowels (and enye) with their plain equivalents.
/// Every other character passes through unchanged; applying it twice is the
/// same as applying it once.
pub fn strip_accents(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            'Á' => 'A',
            'É' => 'E',
            'Í' => 'I',
            'Ó' => 'O',
            'Ú' => 'U',
            'ñ' => 'n',
            'Ñ' => 'N',
            _ => c,
        })
        .collect()
}

/// Fold text for case- and accent-insensitive comparison.
pub fn fold_for_match(text: &str) -> String {
    strip_accents(text).to_lowercase()
}

/// Map an ordinal room name to its room number (1..=13).
///
/// Input is folded before lookup, so "Segunda", "SEGUNDA" and "segunda" all
/// map to 2. Returns `None` for names outside the reference list; callers
/// treat that as an unrecognized room, not an error.
pub fn ordinal_name_to_number(name: &str) -> Option<u32> {
    let folded = fold_for_match(name.trim());
    ROOM_ORDINALS
        .iter()
        .position(|&ordinal| !ordinal.is_empty() && ordinal == folded)
        .map(|idx| idx as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_accents() {
        assert_eq!(strip_accents("Relator Núñez"), "Relator Nunez");
        assert_eq!(strip_accents("DÉCIMA"), "DECIMA");
        assert_eq!(strip_accents("sin acentos"), "sin acentos");
    }

    #[test]
    fn test_strip_accents_idempotent() {
        let once = strip_accents("Amparo Económico");
        assert_eq!(strip_accents(&once), once);
    }

    #[test]
    fn test_ordinal_lookup() {
        assert_eq!(ordinal_name_to_number("Segunda"), Some(2));
        assert_eq!(ordinal_name_to_number("DÉCIMA"), Some(10));
        assert_eq!(ordinal_name_to_number("decimotercera"), Some(13));
        assert_eq!(ordinal_name_to_number(" Primera "), Some(1));
    }

    #[test]
    fn test_ordinal_lookup_unrecognized() {
        assert_eq!(ordinal_name_to_number("inventada"), None);
        assert_eq!(ordinal_name_to_number(""), None);
    }
}
