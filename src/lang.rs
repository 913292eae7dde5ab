//! @ai:module:intent Language code normalization for backend-reported codes
//! @ai:module:layer domain
//! @ai:module:public_api LanguageNormalizer, CanonicalLang
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent Canonical language in the harness's supported set
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalLang {
    Zh,
    Ja,
    Ko,
    Th,
    En,
}

impl CanonicalLang {
    /// @ai:intent Convert canonical language to its 2-letter code
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalLang::Zh => "zh",
            CanonicalLang::Ja => "ja",
            CanonicalLang::Ko => "ko",
            CanonicalLang::Th => "th",
            CanonicalLang::En => "en",
        }
    }

    /// @ai:intent All canonical languages in a stable order
    /// @ai:effects pure
    pub fn all() -> [CanonicalLang; 5] {
        [
            CanonicalLang::En,
            CanonicalLang::Zh,
            CanonicalLang::Ja,
            CanonicalLang::Ko,
            CanonicalLang::Th,
        ]
    }
}

impl std::fmt::Display for CanonicalLang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Maps raw backend-reported language codes to canonical codes
///
/// The rule table coalesces language family codes (`zh`/`yue` report as
/// `zh`). Codes outside the canonical set pass through unchanged so the
/// harness stays usable for languages not yet in the table.
///
/// Script-variant normalization (Hans vs Hant) is intentionally not done
/// here; the normalizer never rewrites text content.
pub struct LanguageNormalizer;

impl LanguageNormalizer {
    /// @ai:intent Create a new normalizer
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Normalize a raw language code to its canonical form
    /// @ai:effects pure
    pub fn normalize<'a>(&self, raw: &'a str) -> &'a str {
        match Self::lookup(raw) {
            Some(lang) => lang.as_str(),
            None => raw,
        }
    }

    /// @ai:intent Resolve a raw code to a canonical language, if supported
    /// @ai:effects pure
    pub fn lookup(raw: &str) -> Option<CanonicalLang> {
        RULES
            .iter()
            .find(|(code, _)| *code == raw)
            .map(|(_, lang)| *lang)
    }
}

impl Default for LanguageNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rule table: raw code -> canonical language. Extend here, not at call
/// sites.
const RULES: &[(&str, CanonicalLang)] = &[
    ("zh", CanonicalLang::Zh),
    ("yue", CanonicalLang::Zh),
    ("ja", CanonicalLang::Ja),
    ("ko", CanonicalLang::Ko),
    ("th", CanonicalLang::Th),
    ("en", CanonicalLang::En),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_codes_coalesce() {
        let norm = LanguageNormalizer::new();
        assert_eq!(norm.normalize("yue"), "zh");
        assert_eq!(norm.normalize("zh"), "zh");
    }

    #[test]
    fn test_canonical_codes_map_to_themselves() {
        let norm = LanguageNormalizer::new();
        for lang in CanonicalLang::all() {
            assert_eq!(norm.normalize(lang.as_str()), lang.as_str());
        }
    }

    #[test]
    fn test_unknown_code_passes_through() {
        let norm = LanguageNormalizer::new();
        assert_eq!(norm.normalize("fr"), "fr");
        assert_eq!(norm.normalize("cmn_Hant"), "cmn_Hant");
        assert_eq!(norm.normalize(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let norm = LanguageNormalizer::new();
        for raw in ["zh", "yue", "ja", "ko", "th", "en", "fr", "xx"] {
            let once = norm.normalize(raw);
            assert_eq!(norm.normalize(once), once);
        }
    }
}
