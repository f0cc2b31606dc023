use serde::{Deserialize, Serialize};

use crate::constants::{BULLETIN_PAGE_AR, BULLETIN_PAGE_FR};

/// The two locales the upstream site publishes under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    Fr,
    Ar,
}

impl Lang {
    /// Language code used in route paths and the snapshot file.
    pub fn code(&self) -> &'static str {
        match self {
            Lang::Fr => "fr",
            Lang::Ar => "ar",
        }
    }

    /// The bulletin page scraped for live ModuleId/TabId values.
    pub fn bulletin_page_url(&self) -> &'static str {
        match self {
            Lang::Fr => BULLETIN_PAGE_FR,
            Lang::Ar => BULLETIN_PAGE_AR,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "fr" => Some(Lang::Fr),
            "ar" => Some(Lang::Ar),
            _ => None,
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One bulletin as exposed by the API.
///
/// Serialized field names mirror the upstream records (`BoId`, `BoNum`,
/// `BoDate`, `BoUrl`) because existing clients of the service consume them
/// verbatim. A missing or unparsable upstream field becomes `None` (JSON
/// `null`) rather than failing the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletinItem {
    #[serde(rename = "BoId")]
    pub id: Option<i64>,

    /// Public sequence number of the bulletin. Upstream sends either a
    /// string or an integer label, so the raw value is kept as-is.
    #[serde(rename = "BoNum")]
    pub number: Option<serde_json::Value>,

    /// ISO-8601 UTC timestamp ending in `Z`, or `None` when the vendor
    /// date token could not be read.
    #[serde(rename = "BoDate")]
    pub date: Option<String>,

    /// Absolute document URL; empty string means no document available.
    #[serde(rename = "BoUrl", default)]
    pub document_url: String,
}

/// Identifiers extracted from one scrape of a bulletin page. Either half
/// may be missing when the page markup did not yield it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentifierPair {
    pub module_id: Option<String>,
    pub tab_id: Option<String>,
}

/// Static per-language identifier pair used when the live scrape fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackIds {
    pub module_id: String,
    pub tab_id: String,
}

impl FallbackIds {
    pub fn new(module_id: impl Into<String>, tab_id: impl Into<String>) -> Self {
        Self {
            module_id: module_id.into(),
            tab_id: tab_id.into(),
        }
    }
}

/// Which path produced a resolved identifier pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSource {
    /// Both halves came from the live page scrape.
    Live,
    /// At least one half was substituted from the static fallbacks.
    Fallback,
}

/// A fully resolved identifier pair, tagged with its provenance so callers
/// and tests can tell which resolution path ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIds {
    pub module_id: String,
    pub tab_id: String,
    pub source: IdSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_codes() {
        assert_eq!(Lang::Fr.code(), "fr");
        assert_eq!(Lang::Ar.code(), "ar");
        assert_eq!(Lang::from_code("FR"), Some(Lang::Fr));
        assert_eq!(Lang::from_code("ar"), Some(Lang::Ar));
        assert_eq!(Lang::from_code("en"), None);
    }

    #[test]
    fn test_bulletin_item_serializes_upstream_field_names() {
        let item = BulletinItem {
            id: Some(4521),
            number: Some(serde_json::json!("7210")),
            date: Some("2023-06-22T00:00:00Z".to_string()),
            document_url: "https://www.sgg.gov.ma/x/y.pdf".to_string(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["BoId"], 4521);
        assert_eq!(json["BoNum"], "7210");
        assert_eq!(json["BoDate"], "2023-06-22T00:00:00Z");
        assert_eq!(json["BoUrl"], "https://www.sgg.gov.ma/x/y.pdf");
    }

    #[test]
    fn test_bulletin_item_absent_fields_serialize_as_null() {
        let item = BulletinItem {
            id: None,
            number: None,
            date: None,
            document_url: String::new(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json["BoId"].is_null());
        assert!(json["BoDate"].is_null());
        assert_eq!(json["BoUrl"], "");
    }
}
