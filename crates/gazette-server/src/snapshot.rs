//! Read-only flat-file snapshot of previously fetched listings.
//!
//! An external process maintains a JSON file shaped
//! `{"bulletins": {"fr": [raw record, ...], "ar": [...]}}`. This service
//! only ever reads it, re-loading on each request so an updated file is
//! picked up without a restart.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use gazette_shared::{parse_bulletin, BulletinItem, Lang};

use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    bulletins: HashMap<String, Vec<Value>>,
}

impl Snapshot {
    /// Load and parse the snapshot file.
    pub async fn load(path: &Path) -> Result<Self, ApiError> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            ApiError::Snapshot(format!("failed to read '{}': {}", path.display(), e))
        })?;

        let snapshot: Snapshot = serde_json::from_str(&raw)
            .map_err(|e| ApiError::Snapshot(format!("malformed snapshot file: {e}")))?;

        debug!(
            path = %path.display(),
            languages = snapshot.bulletins.len(),
            "loaded listing snapshot"
        );
        Ok(snapshot)
    }

    /// The normalized bulletins for a language, in file order, or `None`
    /// when the snapshot holds no entry for it.
    pub fn bulletins(&self, lang: Lang) -> Option<Vec<BulletinItem>> {
        self.bulletins
            .get(lang.code())
            .map(|records| records.iter().map(parse_bulletin).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn snapshot_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_and_filter_by_language() {
        let file = snapshot_file(
            r#"{
                "bulletins": {
                    "fr": [
                        { "BoNum": "7210", "BoDate": "/Date(1687392000000)/", "BoUrl": "/a.pdf" },
                        { "BoNum": "7209" }
                    ],
                    "ar": [
                        { "BoNum": "7195" }
                    ]
                }
            }"#,
        );

        let snapshot = Snapshot::load(file.path()).await.unwrap();

        let fr = snapshot.bulletins(Lang::Fr).unwrap();
        assert_eq!(fr.len(), 2);
        assert_eq!(fr[0].date.as_deref(), Some("2023-06-22T00:00:00Z"));
        assert_eq!(fr[0].document_url, "https://www.sgg.gov.ma/a.pdf");
        assert_eq!(fr[1].number, Some(serde_json::json!("7209")));

        let ar = snapshot.bulletins(Lang::Ar).unwrap();
        assert_eq!(ar.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_language_is_none() {
        let file = snapshot_file(r#"{ "bulletins": { "fr": [] } }"#);
        let snapshot = Snapshot::load(file.path()).await.unwrap();
        assert!(snapshot.bulletins(Lang::Ar).is_none());
        assert_eq!(snapshot.bulletins(Lang::Fr), Some(vec![]));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let err = Snapshot::load(Path::new("/nonexistent/snapshot.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Snapshot(_)));
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let file = snapshot_file("not json at all");
        let err = Snapshot::load(file.path()).await.unwrap_err();
        assert!(matches!(err, ApiError::Snapshot(_)));
    }

    #[tokio::test]
    async fn test_empty_object_has_no_languages() {
        let file = snapshot_file("{}");
        let snapshot = Snapshot::load(file.path()).await.unwrap();
        assert!(snapshot.bulletins(Lang::Fr).is_none());
    }
}
