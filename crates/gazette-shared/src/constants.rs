/// Origin of the upstream government site. Relative document paths in
/// listing records are resolved against it.
pub const SGG_ORIGIN: &str = "https://www.sgg.gov.ma";

/// AJAX endpoint serving the bulletin listing as a JSON array.
pub const SGG_AJAX_URL: &str =
    "https://www.sgg.gov.ma/DesktopModules/MVC/TableListBO/BO/AjaxMethod";

/// French bulletin page, scraped for live ModuleId/TabId values.
pub const BULLETIN_PAGE_FR: &str = "https://www.sgg.gov.ma/BulletinOfficiel.aspx";

/// Arabic bulletin page.
pub const BULLETIN_PAGE_AR: &str = "https://www.sgg.gov.ma/arabe/BulletinOfficiel.aspx";

/// Static fallback identifiers used when the live scrape fails or comes
/// back incomplete.
pub const FR_FALLBACK_MODULE_ID: &str = "2873";
pub const FR_FALLBACK_TAB_ID: &str = "775";
pub const AR_FALLBACK_MODULE_ID: &str = "3111";
pub const AR_FALLBACK_TAB_ID: &str = "847";

/// Default base URL of the page-scraping collaborator.
pub const DEFAULT_SCRAPER_BASE: &str = "https://scraper-api-py.vercel.app";

/// Default base URL of the PDF-to-text collaborator.
pub const DEFAULT_PDF2TEXT_BASE: &str = "https://pdf2text-api-py.vercel.app";

/// Timeout for the identifier scrape call in seconds.
pub const SCRAPE_TIMEOUT_SECS: u64 = 10;

/// Timeout for the latest-bulletin listing call in seconds.
pub const LISTING_LATEST_TIMEOUT_SECS: u64 = 15;

/// Timeout for the full listing call in seconds. Longer than the latest
/// call because the endpoint returns the whole dataset.
pub const LISTING_ALL_TIMEOUT_SECS: u64 = 20;

/// Timeout for PDF text extraction in seconds.
pub const PDF_TEXT_TIMEOUT_SECS: u64 = 60;

/// Default HTTP API port (server)
pub const DEFAULT_HTTP_PORT: u16 = 8080;
