//! Identifier extraction from scraped inline script text.
//!
//! The upstream bulletin pages embed the routing identifiers the AJAX
//! listing endpoint expects (`ModuleId`, `TabId`) in inline scripts. The
//! page holds several module blocks, one per content module, so `ModuleId`
//! matches more than once and a language-keyed tie-break picks the right
//! one.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::{IdentifierPair, Lang};

fn module_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"ModuleId\s*=\s*(\d+)").expect("valid regex"))
}

fn tab_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"var\s+TabId\s*=\s*(\d+)").expect("valid regex"))
}

/// Scan script text for the ModuleId/TabId pair of the given language.
///
/// The tab id is the first `var TabId = <digits>` declaration in document
/// order. The module id is picked from every `ModuleId = <digits>`
/// assignment: the French module block carries the lowest id on the page
/// and the Arabic one the highest, so `Fr` selects the minimum and `Ar`
/// the maximum. This mirrors the observed page markup, not a documented
/// upstream contract; it breaks silently if the markup order changes.
///
/// Pure text analysis: no I/O happens here.
pub fn extract_identifiers(script_text: &str, lang: Lang) -> IdentifierPair {
    let tab_id = tab_id_re()
        .captures(script_text)
        .map(|caps| caps[1].to_string());

    let module_ids: Vec<u64> = module_id_re()
        .captures_iter(script_text)
        .filter_map(|caps| caps[1].parse().ok())
        .collect();

    let module_id = match lang {
        Lang::Fr => module_ids.iter().min(),
        Lang::Ar => module_ids.iter().max(),
    }
    .map(u64::to_string);

    IdentifierPair { module_id, tab_id }
}
