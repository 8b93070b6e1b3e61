//! Species slug and display-name normalization.
//!
//! A slug is the natural key of a species row. Clients normally send it
//! ready-made; [`species_slug`] derives one from a scientific name when they
//! do not.

/// Maximum accepted slug length in characters.
pub const MAX_SLUG_LEN: usize = 200;

/// Trim a client-supplied slug. Returns `None` for empty or whitespace-only input.
pub fn normalize_slug(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Derive a slug from a scientific name.
///
/// Lowercases, drops anything that is not alphanumeric, and joins the
/// remaining words with `-`.
///
/// # Examples
///
/// ```
/// use chirpy_core::slug::species_slug;
///
/// assert_eq!(species_slug("Turdus migratorius"), "turdus-migratorius");
/// assert_eq!(species_slug("  Corvus   corax "), "corvus-corax");
/// ```
pub fn species_slug(scientific_name: &str) -> String {
    scientific_name
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Trim an optional common name, treating empty strings as absent.
pub fn normalize_common_name(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
}
