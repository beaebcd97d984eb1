use reqwest::Method;
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

pub const DEFAULT_BASE_URL: &str = "https://codeforces.com";

const SEC_CH_UA: &str = r#""Chromium";v="128", "Not;A=Brand";v="24", "Google Chrome";v="128""#;
const SEC_CH_UA_MOBILE: &str = "?0";
const SEC_CH_UA_PLATFORM: &str = r#""Windows""#;
const UPGRADE_INSECURE_REQUESTS: &str = "1";
const REFERRER_POLICY: &str = "strict-origin-when-cross-origin";

/// Headers sent with every contest page request, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Display, AsRefStr)]
pub enum RequestHeader {
    #[strum(serialize = "sec-ch-ua")]
    SecChUa,
    #[strum(serialize = "sec-ch-ua-mobile")]
    SecChUaMobile,
    #[strum(serialize = "sec-ch-ua-platform")]
    SecChUaPlatform,
    #[strum(serialize = "upgrade-insecure-requests")]
    UpgradeInsecureRequests,
    #[strum(serialize = "Referer")]
    Referer,
    #[strum(serialize = "Referrer-Policy")]
    ReferrerPolicy,
}

impl RequestHeader {
    /// Value of this header for a request targeting `url`.
    pub fn value(&self, url: &str) -> String {
        match self {
            Self::SecChUa => SEC_CH_UA.to_string(),
            Self::SecChUaMobile => SEC_CH_UA_MOBILE.to_string(),
            Self::SecChUaPlatform => SEC_CH_UA_PLATFORM.to_string(),
            Self::UpgradeInsecureRequests => UPGRADE_INSECURE_REQUESTS.to_string(),
            Self::Referer => url.to_string(),
            Self::ReferrerPolicy => REFERRER_POLICY.to_string(),
        }
    }
}

/// A single GET for one contest page. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub contest_id: String,
    pub url: String,
    pub method: Method,
    pub headers: Vec<(RequestHeader, String)>,
}

/// Status and body of the one response. The body is only read for a 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    pub status: u16,
    pub body: String,
}

impl PageRequest {
    pub fn new(base_url: &str, contest_id: &str) -> Self {
        let url = get_url(base_url, contest_id);
        let headers = RequestHeader::iter()
            .map(|header| (header, header.value(&url)))
            .collect();

        Self {
            contest_id: contest_id.to_string(),
            url,
            method: Method::GET,
            headers,
        }
    }
}

fn get_url(base_url: &str, contest_id: &str) -> String {
    format!("{}/contest/{}", base_url.trim_end_matches('/'), contest_id)
}
