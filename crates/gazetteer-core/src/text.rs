// crates/gazetteer-core/src/text.rs
use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

/// Removes diacritical marks from a display name.
///
/// The input is put into canonical decomposition (NFD, not recomposed) and
/// every character of general category `Mn` (nonspacing mark) is dropped.
/// Base letters survive, so Arabic and Persian names lose their harakat but
/// keep their letters:
///
/// ```rust
/// use gazetteer_core::text::strip_diacritics;
///
/// assert_eq!(strip_diacritics("طَهران"), "طهران");
/// assert_eq!(strip_diacritics("Zürich"), "Zurich");
/// ```
///
/// Spacing (`Mc`) and enclosing (`Me`) marks are kept.
pub fn strip_diacritics(s: &str) -> String {
    s.nfd().filter(|c| !is_nonspacing_mark(*c)).collect()
}

#[inline]
pub fn is_nonspacing_mark(c: char) -> bool {
    get_general_category(c) == GeneralCategory::NonspacingMark
}
