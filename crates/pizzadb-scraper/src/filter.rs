//! Decides whether a geo-search place is a pizza vendor.

/// Generic "pizza" stem, matched case-insensitively. Covers пицца, пиццерия,
/// Пицц-бар and similar spellings.
pub const PIZZA_TERM: &str = "пицц";

/// Brand substrings accepted as-is, matched case-sensitively.
pub const BRAND_ALLOW_LIST: &[&str] = &["Pizza", "Додо", "Папа Джонс", "Пицца Суши"];

/// Returns `true` if `raw_name` names a pizza vendor.
///
/// Plain substring containment: no whitespace, diacritic, or transliteration
/// normalization is applied.
#[must_use]
pub fn is_vendor(raw_name: &str) -> bool {
    raw_name.to_lowercase().contains(PIZZA_TERM)
        || BRAND_ALLOW_LIST.iter().any(|brand| raw_name.contains(brand))
}
