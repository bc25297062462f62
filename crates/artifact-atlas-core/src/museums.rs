//! Museum unit codes known to the catalog.

/// Unit code → display name for the museums Artifact Atlas draws from.
pub const MUSEUM_UNITS: &[(&str, &str)] = &[
    ("NMAI", "National Museum of the American Indian"),
    ("NMAAHC", "African American History & Culture"),
    ("FSG", "Freer/Sackler Asian Art"),
    ("NMAfA", "National Museum of African Art"),
    ("SAAM", "American Art Museum"),
    ("NPG", "National Portrait Gallery"),
    ("CHNDM", "Cooper Hewitt Design Museum"),
    ("ACM", "Anacostia Community Museum"),
    ("HMSG", "Hirshhorn Museum"),
];

/// Resolves a unit code to its museum name. Unknown codes pass through.
pub fn museum_name(unit_code: &str) -> &str {
    MUSEUM_UNITS
        .iter()
        .find(|(code, _)| *code == unit_code)
        .map(|(_, name)| *name)
        .unwrap_or(unit_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_code_resolves() {
        assert_eq!(museum_name("NMAI"), "National Museum of the American Indian");
        assert_eq!(museum_name("NMAfA"), "National Museum of African Art");
    }

    #[test]
    fn unknown_code_passes_through() {
        assert_eq!(museum_name("XYZ"), "XYZ");
        assert_eq!(museum_name("Unknown"), "Unknown");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(museum_name("nmai"), "nmai");
    }
}
