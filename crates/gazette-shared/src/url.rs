//! Document URL resolution against the upstream origin.

/// Make a document path absolute.
///
/// Paths already carrying an HTTP(S) scheme pass through unchanged. Empty
/// paths stay empty; callers treat that as "no document available".
/// Anything else is concatenated onto `origin` directly, without slash
/// normalization, matching the upstream's own path format.
pub fn resolve_document_url(path: &str, origin: &str) -> String {
    if path.is_empty() || path.starts_with("http") {
        return path.to_string();
    }
    format!("{origin}{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://www.sgg.gov.ma";

    #[test]
    fn test_absolute_url_unchanged() {
        assert_eq!(
            resolve_document_url("https://x/y.pdf", ORIGIN),
            "https://x/y.pdf"
        );
    }

    #[test]
    fn test_relative_path_rewritten() {
        assert_eq!(
            resolve_document_url("/BO/fr/2023/BO_7210.pdf", ORIGIN),
            "https://www.sgg.gov.ma/BO/fr/2023/BO_7210.pdf"
        );
    }

    #[test]
    fn test_empty_path_stays_empty() {
        assert_eq!(resolve_document_url("", ORIGIN), "");
    }
}
