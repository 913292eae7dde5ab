//! @ai:module:intent Reference phrase catalog for grouped reports
//! @ai:module:layer domain
//! @ai:module:public_api ReferenceCatalog
//! @ai:module:stateless true

use crate::lang::CanonicalLang;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// @ai:intent Catalog of localized reference phrases, keyed by sample name
///
/// The grouped report looks up the phrase that was synthesized into each
/// corpus sample so a reviewer can compare model output against the
/// known source text. A missing sample or language renders as a blank
/// cell, never as an error: the corpus may contain samples the catalog
/// does not know about.
pub struct ReferenceCatalog {
    phrases: HashMap<String, HashMap<String, String>>,
}

/// @ai:intent Catalog structure from a TOML file: `[sample.<name>]` tables
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    sample: HashMap<String, HashMap<String, String>>,
}

impl ReferenceCatalog {
    /// @ai:intent Create an empty catalog
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            phrases: HashMap::new(),
        }
    }

    /// @ai:intent Load a catalog from a TOML file
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: CatalogFile = toml::from_str(&content)?;
        Ok(Self {
            phrases: file.sample,
        })
    }

    /// @ai:intent Look up the localized phrase for (sample, language)
    /// @ai:effects pure
    pub fn lookup(&self, sample_name: &str, lang: &str) -> Option<&str> {
        self.phrases
            .get(sample_name)
            .and_then(|by_lang| by_lang.get(lang))
            .map(String::as_str)
    }

    /// @ai:intent English reference for a sample, used as translation gold
    /// @ai:effects pure
    pub fn english_reference(&self, sample_name: &str) -> Option<&str> {
        self.lookup(sample_name, CanonicalLang::En.as_str())
    }

    /// @ai:intent Add or replace one phrase entry
    /// @ai:effects pure
    pub fn insert(
        &mut self,
        sample_name: impl Into<String>,
        lang: impl Into<String>,
        phrase: impl Into<String>,
    ) {
        self.phrases
            .entry(sample_name.into())
            .or_default()
            .insert(lang.into(), phrase.into());
    }
}

impl Default for ReferenceCatalog {
    /// Built-in catalog for the stock sample set.
    fn default() -> Self {
        let mut catalog = Self::new();

        for (lang, phrase) in [
            ("en", "God, Grant me the serenity to accept the thing I cannot change, the courage to change the thing I can change, and wisdom to separate the difference."),
            ("zh", "神啊!請賜給我雅量從容的接受不可改變的事，賜給我勇氣去改變應該改變的事，並賜給我智慧去分辨什麼是可以改變的，什麼是不可以改變的。"),
            ("ja", "神様、私に変えられないことを受け入れる落ち着きを与えてください、変えられることを変える勇気を与えてください、そして変えられるものと変えられないものを区別する知恵を与えてください。"),
            ("ko", "하나님, 나에게 변할 수 없는 것을 받아들이는 온화함을 주시고, 변할 수 있는 것을 변화시키는 용기를 주시며, 변할 수 있는 것과 변할 수 없는 것을 구별하는 지혜를 주시옵소서。"),
            ("th", "พระเจ้า โปรดประทานความสงบสุขให้ข้าพเจ้ายอมรับสิ่งที่เปลี่ยนแปลงไม่ได้ มีความกล้าที่จะเปลี่ยนแปลงสิ่งที่เปลี่ยนแปลงได้ และมีปัญญาที่จะแยกแยะความแตกต่าง"),
        ] {
            catalog.insert("serenity", lang, phrase);
        }

        for (lang, phrase) in [
            ("en", "With great power comes great responsibility."),
            ("zh", "能力越大，責任越大。"),
            ("ja", "大いなる力には大いなる責任が伴う"),
            ("ko", "큰 힘에는 큰 책임이 따른다"),
            ("th", "ความสามารถที่ยิ่งใหญ่ ความรับผิดชอบก็ยิ่งมาก"),
        ] {
            catalog.insert("spiderman", lang, phrase);
        }

        for (lang, phrase) in [
            ("en", "I’m not daydreaming; I’m deeply contemplating the mysteries of the universe."),
            ("zh", "我不是在發呆，我是在深度思考宇宙的奧秘。"),
            ("ja", "私はぼーっとしているのではなく、宇宙の神秘について深く考えているのです。"),
            ("ko", "나는 멍하니 있는 게 아니라 우주의 신비에 대해 깊이 생각하고 있어."),
            ("th", "ฉันไม่ได้คิดน้อยใจนะ ฉันกำลังคิดอย่างลึกซึ้งเกี่ยวกับความลึกลับของจักรวาล"),
        ] {
            catalog.insert("thinking", lang, phrase);
        }

        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_catalog_lookup() {
        let catalog = ReferenceCatalog::default();

        assert_eq!(
            catalog.lookup("spiderman", "zh"),
            Some("能力越大，責任越大。")
        );
        assert_eq!(
            catalog.english_reference("spiderman"),
            Some("With great power comes great responsibility.")
        );
    }

    #[test]
    fn test_miss_is_none_not_error() {
        let catalog = ReferenceCatalog::default();
        assert_eq!(catalog.lookup("unknown-sample", "zh"), None);
        assert_eq!(catalog.lookup("serenity", "fr"), None);
    }

    #[test]
    fn test_load_from_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.toml");
        std::fs::write(
            &path,
            r#"
[sample.greeting]
en = "Good morning"
zh = "早安"
"#,
        )
        .unwrap();

        let catalog = ReferenceCatalog::load(&path).unwrap();
        assert_eq!(catalog.lookup("greeting", "zh"), Some("早安"));
        assert_eq!(catalog.lookup("greeting", "ja"), None);
    }
}
