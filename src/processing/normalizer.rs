//! Company name canonicalization and the name variations used for matching.

use serde::Serialize;

/// Trailing legal and locational suffixes, tried in this order on every pass.
const COMPANY_SUFFIXES: [&str; 7] = ["HK", "Hong Kong", "Ltd", "Limited", "Co.", "Inc.", "Corp."];

/// A company name prepared for one extraction run.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CompanyQuery {
    pub raw_name: String,
    pub canonical_name: String,
    /// Lowercase forms in first-derived order, never empty.
    pub variations: Vec<String>,
}

impl CompanyQuery {
    pub fn new(raw_name: &str) -> Self {
        let raw_name = raw_name.trim().to_string();
        let (canonical_name, intermediates) = strip_suffixes(&raw_name);

        let mut variations = Vec::new();
        let candidates = std::iter::once(&raw_name)
            .chain(std::iter::once(&canonical_name))
            .chain(intermediates.iter());
        for candidate in candidates {
            let lowered = candidate.to_lowercase();
            if !lowered.is_empty() && !variations.contains(&lowered) {
                variations.push(lowered);
            }
        }
        if variations.is_empty() {
            variations.push(canonical_name.to_lowercase());
        }

        Self {
            raw_name,
            canonical_name,
            variations,
        }
    }
}

/// Returns the canonical form of a company name.
pub fn normalize(raw_name: &str) -> String {
    strip_suffixes(raw_name.trim()).0
}

/// Strips known suffixes until none applies.
///
/// Every suffix is tried at most once per pass. Passes repeat while something
/// was removed, which keeps `normalize` idempotent for stacked suffixes such
/// as `"Acme HK Ltd"`. Each removal is recorded as an intermediate form.
fn strip_suffixes(name: &str) -> (String, Vec<String>) {
    let mut current = name.to_string();
    let mut intermediates = Vec::new();

    loop {
        let mut changed = false;
        for suffix in COMPANY_SUFFIXES {
            if let Some(stripped) = strip_suffix(&current, suffix) {
                current = stripped;
                intermediates.push(current.clone());
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    (current, intermediates)
}

/// Removes `suffix` from the end of `name` when it forms a whole trailing word.
///
/// Matching ignores ASCII case. `None` is returned when the suffix is absent
/// or when removing it would leave nothing behind.
fn strip_suffix(name: &str, suffix: &str) -> Option<String> {
    let chars: Vec<char> = name.chars().collect();
    let suffix: Vec<char> = suffix.chars().collect();
    if chars.len() <= suffix.len() {
        return None;
    }

    let split = chars.len() - suffix.len();
    let tail_matches = chars[split..]
        .iter()
        .zip(&suffix)
        .all(|(c, s)| c.eq_ignore_ascii_case(s));
    if !tail_matches || !chars[split - 1].is_whitespace() {
        return None;
    }

    let stripped: String = chars[..split].iter().collect();
    let stripped = stripped.trim_end();
    (!stripped.is_empty()).then(|| stripped.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_legal_suffix() {
        assert_eq!(normalize("Acme Ltd"), "Acme");
        assert_eq!(normalize("Acme Inc."), "Acme");
        assert_eq!(normalize("  Acme Corp.  "), "Acme");
        assert_eq!(normalize("Acme Hong Kong"), "Acme");
    }

    #[test]
    fn suffix_match_ignores_case() {
        assert_eq!(normalize("Acme LIMITED"), "Acme");
        assert_eq!(normalize("Acme hk"), "Acme");
    }

    #[test]
    fn suffix_must_be_a_whole_word() {
        assert_eq!(normalize("Mohk"), "Mohk");
        assert_eq!(normalize("Nelco."), "Nelco.");
        assert_eq!(normalize("Acme Holdings"), "Acme Holdings");
    }

    #[test]
    fn never_strips_to_empty() {
        assert_eq!(normalize("Limited"), "Limited");
        assert_eq!(CompanyQuery::new("HK").variations, vec!["hk".to_string()]);
    }

    #[test]
    fn normalize_is_idempotent() {
        let names = [
            "Acme Ltd",
            "Acme HK Ltd",
            "Acme Limited Hong Kong",
            "Acme Co. Ltd HK",
            "Microsoft",
            "Ltd Ltd",
        ];
        for name in names {
            let once = normalize(name);
            assert_eq!(normalize(&once), once, "not idempotent for {name}");
        }
    }

    #[test]
    fn variations_keep_first_derived_order_without_duplicates() {
        let query = CompanyQuery::new("Foo Limited HK");

        assert_eq!(query.canonical_name, "Foo");
        assert_eq!(
            query.variations,
            vec![
                "foo limited hk".to_string(),
                "foo".to_string(),
                "foo limited".to_string(),
            ]
        );
    }

    #[test]
    fn plain_name_has_single_variation() {
        let query = CompanyQuery::new("Microsoft");

        assert_eq!(query.canonical_name, "Microsoft");
        assert_eq!(query.variations, vec!["microsoft".to_string()]);
    }
}
