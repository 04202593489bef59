use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    /// Sent with every request. Merged over [`default_headers`].
    pub headers: HeaderMap,
    /// The maximum time limit for a call, including reading the response body.
    /// If unset, calls wait for the transport indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("valid url"),
            headers: default_headers(),
            timeout: None,
        }
    }
}

pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/json"),
    );
    headers
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self::default().base_url(base_url)
    }

    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Adds `headers` on top of the current ones; values for the same name are replaced.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut last_name: Option<HeaderName> = None;
        for (name, value) in headers {
            // `HeaderMap::into_iter` yields `None` names for extra values of the previous name
            match name {
                Some(name) => {
                    self.headers.insert(name.clone(), value);
                    last_name = Some(name);
                }
                None => {
                    if let Some(name) = &last_name {
                        self.headers.append(name.clone(), value);
                    }
                }
            }
        }
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }
}
