// Domain layer for the Bulletin Officiel aggregation service: types,
// upstream constants, and the pure text transformations (date
// normalization, URL resolution, identifier extraction, record parsing).

pub mod constants;
pub mod date;
pub mod extract;
pub mod parse;
pub mod types;
pub mod url;

pub use date::normalize_vendor_date;
pub use extract::extract_identifiers;
pub use parse::parse_bulletin;
pub use types::{BulletinItem, FallbackIds, IdSource, IdentifierPair, Lang, ResolvedIds};
pub use url::resolve_document_url;
