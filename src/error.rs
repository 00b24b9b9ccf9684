// src/error.rs
use thiserror::Error;

/// Everything that can go wrong between fetching a listing and writing JSON.
///
/// Inside one enrichment task every variant is recoverable: the task degrades
/// its record to summary-only. Only failures while fetching the *initial*
/// listing propagate out of [`crate::scrape::run`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    FetchStatus { url: String, status: u16 },

    #[error("too many redirects for {0}")]
    TooManyRedirects(String),

    #[error("could not parse {what}: {reason}")]
    Parse { what: &'static str, reason: String },

    #[error("listing has no submission target (form action)")]
    NoSubmissionTarget,

    #[error("no listing row for {date_time} at {location}")]
    NoMatch { date_time: String, location: String },

    #[error("submission to {url} failed: {reason}")]
    Submission { url: String, reason: String },

    #[error("enrichment task panicked: {0}")]
    TaskPanicked(String),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Map a transport failure on a GET, splitting out redirect overflow.
    pub(crate) fn fetch(url: &str, source: reqwest::Error) -> Self {
        if source.is_redirect() {
            Error::TooManyRedirects(s!(url))
        } else {
            Error::Fetch { url: s!(url), source }
        }
    }

    /// Map a transport failure on a POST, splitting out redirect overflow.
    pub(crate) fn submission(url: &str, source: reqwest::Error) -> Self {
        if source.is_redirect() {
            Error::TooManyRedirects(s!(url))
        } else {
            Error::Submission { url: s!(url), reason: source.to_string() }
        }
    }
}
