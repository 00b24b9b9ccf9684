// src/config/consts.rs

// Flow endpoints
pub const BASE_URL: &str = "https://fischerpruefung-online.bayern.de";
pub const ENTRY_URL: &str = "https://fischerpruefung-online.bayern.de/fprApp/";
pub const LIST_URL: &str =
    "https://fischerpruefung-online.bayern.de/fprApp/verwaltung/Pruefungssuche?execution=e9s1";

// Markup anchors
pub const FORM_SELECTOR: &str = "form#pruefungsterminSearch";
pub const CONTROL_SELECTOR: &str = "input[type=submit].select";

// Net config
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";
pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
pub const MAX_REDIRECTS: usize = 20;
pub const REQUEST_TIMEOUT_SECS: u64 = 60; // 0 = no timeout

// Extraction
pub const MIN_TABLE_TEXT: usize = 50;      // bytes of flattened table text
pub const DETAIL_SKIP_CEILING: usize = 200; // containers are longer than this
pub const DETAIL_VALUE_CEILING: usize = 100;
pub const DATE_TIME_FORMAT: &str = "%d.%m.%Y, %H:%M";

// Concurrency
pub const WORKERS: usize = 10;

// Export
pub const DEFAULT_FILE: &str = "exam_appointments.json";
