//! Best-effort normalization of raw upstream listing records.

use serde_json::Value;

use crate::constants::SGG_ORIGIN;
use crate::date::normalize_vendor_date;
use crate::types::BulletinItem;
use crate::url::resolve_document_url;

/// Turn one raw upstream record into a [`BulletinItem`].
///
/// The record schema belongs to the upstream system and is not validated
/// beyond presence checks: a missing or mistyped field degrades to
/// `None`/empty in the output, never to an error. The source is scraped
/// and schema-unstable, so the batch must survive individual bad records.
pub fn parse_bulletin(raw: &Value) -> BulletinItem {
    let date = match raw.get("BoDate") {
        Some(Value::String(s)) => normalize_vendor_date(s),
        Some(Value::Number(n)) => normalize_vendor_date(&n.to_string()),
        _ => None,
    };

    let document_url = raw
        .get("BoUrl")
        .and_then(Value::as_str)
        .map(|path| resolve_document_url(path, SGG_ORIGIN))
        .unwrap_or_default();

    let number = match raw.get("BoNum") {
        None | Some(Value::Null) => None,
        Some(v) => Some(v.clone()),
    };

    BulletinItem {
        id: raw.get("BoId").and_then(Value::as_i64),
        number,
        date,
        document_url,
    }
}
