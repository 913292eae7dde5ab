//! @ai:module:intent Corpus item definitions for benchmark inputs
//! @ai:module:layer domain
//! @ai:module:public_api CorpusItem
//! @ai:module:stateless true

use crate::lang::CanonicalLang;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Language suffix tokens accepted in corpus file names. `jp` and `kr`
/// appear in older sample sets as aliases for `ja` and `ko`.
const SUFFIX_TOKENS: &[(&str, CanonicalLang)] = &[
    ("en", CanonicalLang::En),
    ("zh", CanonicalLang::Zh),
    ("ja", CanonicalLang::Ja),
    ("jp", CanonicalLang::Ja),
    ("ko", CanonicalLang::Ko),
    ("kr", CanonicalLang::Ko),
    ("th", CanonicalLang::Th),
];

/// @ai:intent One benchmark input: an audio sample with optional golden text
///
/// Identity follows the `<sample-name>-<lang-suffix>.<ext>` naming
/// convention (e.g. `serenity-zh.mp3`, `sample-zh-01.mp3`). Created once
/// at corpus-load time and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusItem {
    /// File name, used as the item's identity throughout the run.
    pub id: String,
    /// Resolved path to the audio source.
    pub path: PathBuf,
    /// Expected transcription, when a golden text is known.
    pub expect: Option<String>,
    /// Reference translation or reviewer note.
    pub note: Option<String>,
}

impl CorpusItem {
    /// @ai:intent Create an item with no golden expectations
    /// @ai:effects pure
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            expect: None,
            note: None,
        }
    }

    /// @ai:intent Extract the sample name from the item id
    ///
    /// The sample name is the id with its language suffix, any trailing
    /// index segment, and the extension stripped: `serenity-zh.mp3` ->
    /// `serenity`, `sample-zh-01.mp3` -> `sample`. Ids that do not
    /// follow the naming convention yield `None`.
    /// @ai:effects pure
    pub fn sample_name(&self) -> Option<&str> {
        let (name, _) = parse_item_id(&self.id)?;
        Some(name)
    }

    /// @ai:intent Language the item was recorded in, from its file name
    /// @ai:effects pure
    pub fn lang_suffix(&self) -> Option<CanonicalLang> {
        let (_, lang) = parse_item_id(&self.id)?;
        Some(lang)
    }
}

/// @ai:intent Split an item id into (sample name, language)
/// @ai:effects pure
pub fn parse_item_id(id: &str) -> Option<(&str, CanonicalLang)> {
    let stem = id.rsplit_once('.').map(|(s, _)| s).unwrap_or(id);

    // Scan dash-separated segments from the end for a language token;
    // segments after it (e.g. a numeric index) are not part of the name.
    let mut end = stem.len();
    loop {
        let seg_start = stem[..end].rfind('-').map(|i| i + 1).unwrap_or(0);
        let seg = &stem[seg_start..end];

        if let Some((_, lang)) = SUFFIX_TOKENS.iter().find(|(tok, _)| *tok == seg) {
            if seg_start == 0 {
                return None;
            }
            return Some((&stem[..seg_start - 1], *lang));
        }

        if seg_start == 0 {
            return None;
        }
        end = seg_start - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_name_simple() {
        let item = CorpusItem::new("serenity-zh.mp3", "test-data/serenity-zh.mp3");
        assert_eq!(item.sample_name(), Some("serenity"));
        assert_eq!(item.lang_suffix(), Some(CanonicalLang::Zh));
    }

    #[test]
    fn test_sample_name_with_index_segment() {
        let item = CorpusItem::new("sample-zh-01.mp3", "test-data/sample-zh-01.mp3");
        assert_eq!(item.sample_name(), Some("sample"));
        assert_eq!(item.lang_suffix(), Some(CanonicalLang::Zh));
    }

    #[test]
    fn test_legacy_suffix_aliases() {
        let jp = CorpusItem::new("sample-jp-01.mp3", "x");
        assert_eq!(jp.lang_suffix(), Some(CanonicalLang::Ja));

        let kr = CorpusItem::new("sample-kr-01.mp3", "x");
        assert_eq!(kr.lang_suffix(), Some(CanonicalLang::Ko));
    }

    #[test]
    fn test_nonconforming_id() {
        let item = CorpusItem::new("recording.mp3", "recording.mp3");
        assert_eq!(item.sample_name(), None);
        assert_eq!(item.lang_suffix(), None);

        let bare = CorpusItem::new("zh.mp3", "zh.mp3");
        assert_eq!(bare.sample_name(), None);
    }

    #[test]
    fn test_multi_segment_sample_name() {
        let item = CorpusItem::new("long-story-th.mp3", "x");
        assert_eq!(item.sample_name(), Some("long-story"));
        assert_eq!(item.lang_suffix(), Some(CanonicalLang::Th));
    }
}
