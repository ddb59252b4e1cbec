use unicode_normalization::UnicodeNormalization;

/// Normalizes a user-supplied path segment into characters every object store accepts.
///
/// Accented letters are decomposed (NFD) and their combining marks dropped, so `é` becomes
/// `e` rather than `-`. Anything outside `[A-Za-z0-9-_./]` is then replaced by `-`.
/// Slashes survive, so a single segment may expand into several key components.
///
/// Total and idempotent: `sanitize(&sanitize(x)) == sanitize(x)`.
///
/// ```rust
/// use strata_drive::sanitize;
///
/// assert_eq!(sanitize("café/déjà vu.txt"), "cafe/deja-vu.txt");
/// assert_eq!(sanitize("Résumé (final)!.pdf"), "Resume--final--.pdf");
/// ```
#[must_use]
pub fn sanitize(raw: &str) -> String {
    raw.nfd()
        .filter(|c| !is_diacritical_mark(*c))
        .map(|c| if is_allowed(c) { c } else { '-' })
        .collect()
}

/// Combining Diacritical Marks block, U+0300..=U+036F. Marks from other blocks fall through
/// to the `-` replacement.
const fn is_diacritical_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}

const fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/')
}

/// Whether `raw` already consists of key-safe characters only.
#[must_use]
pub fn is_sanitized(raw: &str) -> bool {
    raw.chars().all(is_allowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_diacritics_before_substitution() {
        assert_eq!(sanitize("café"), "cafe");
        assert_eq!(sanitize("Ångström"), "Angstrom");
        assert_eq!(sanitize("naïve façade"), "naive-facade");
    }

    #[test]
    fn keeps_allowed_punctuation() {
        assert_eq!(sanitize("a-b_c.d/e"), "a-b_c.d/e");
        assert_eq!(sanitize("../x"), "../x");
    }

    #[test]
    fn replaces_everything_else() {
        assert_eq!(sanitize("a b\tc"), "a-b-c");
        assert_eq!(sanitize("日本"), "--");
        assert_eq!(sanitize("emoji 🎉"), "emoji--");
        assert_eq!(sanitize("ß"), "-");
    }

    #[test]
    fn empty_input() {
        assert_eq!(sanitize(""), "");
        assert!(is_sanitized(""));
    }

    #[test]
    fn marks_outside_the_block_become_dashes() {
        // U+0483 is a Cyrillic combining titlo.
        assert_eq!(sanitize("a\u{0483}"), "a-");
    }
}
