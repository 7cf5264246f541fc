// src/core/net.rs
// Blocking HTTP against the controller. Redirects are followed here, not by
// reqwest, so the chain of Location headers stays visible to the login code.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, LOCATION};
use reqwest::redirect::Policy;
use url::Url;

use crate::config::consts::{ACCEPT_HTML, MAX_REDIRECTS, USER_AGENT};
use crate::error::{Result, WatchError};

/// One raw HTTP exchange, no redirect handling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// URL this response was served from.
    pub url: String,
    /// `Location` header, if any.
    pub location: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status) && self.location.is_some()
    }
}

/// A finished request after following redirects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fetched {
    /// Every `Location` seen on the way, resolved to absolute URLs.
    pub history: Vec<String>,
    pub final_url: String,
    pub body: String,
}

/// Transport seam. The real one keeps a cookie jar, so one instance is one session.
pub trait HttpClient {
    fn get(&self, url: &str) -> Result<HttpResponse>;
    fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<HttpResponse>;
}

/// Hands out a fresh client (fresh cookie jar) for every login.
pub trait Connector {
    fn connect(&self) -> Result<Box<dyn HttpClient>>;
}

pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .map_err(|e| WatchError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    fn read(resp: reqwest::blocking::Response) -> Result<HttpResponse> {
        let status = resp.status().as_u16();
        let url = resp.url().to_string();
        let location = resp
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = resp.text()?;
        Ok(HttpResponse { status, url, location, body })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let resp = self.client.get(url).header(ACCEPT, ACCEPT_HTML).send()?;
        Self::read(resp)
    }

    fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<HttpResponse> {
        let resp = self.client.post(url).header(ACCEPT, ACCEPT_HTML).form(form).send()?;
        Self::read(resp)
    }
}

/// Builds a `ReqwestClient` per session.
pub struct ReqwestConnector {
    pub timeout: Duration,
}

impl Connector for ReqwestConnector {
    fn connect(&self) -> Result<Box<dyn HttpClient>> {
        Ok(Box::new(ReqwestClient::with_timeout(self.timeout)?))
    }
}

/// Resolve `target` against `base`. Absolute http(s) targets pass through untouched.
pub fn resolve_url(base: &str, target: &str) -> Result<String> {
    let lc = target.to_ascii_lowercase();
    if lc.starts_with("http://") || lc.starts_with("https://") {
        return Ok(s!(target));
    }
    let base = Url::parse(base).map_err(|e| WatchError::Transport(format!("bad base url {base}: {e}")))?;
    let joined = base
        .join(target)
        .map_err(|e| WatchError::Transport(format!("cannot resolve {target}: {e}")))?;
    Ok(joined.to_string())
}

/// GET `url`, following redirects.
pub fn get_following(client: &dyn HttpClient, url: &str) -> Result<Fetched> {
    let first = client.get(url)?;
    follow(client, first, None)
}

/// POST a form to `url`, following redirects. 301/302/303 continue as GET,
/// like a browser; 307/308 repeat the POST with the same form.
pub fn post_following(client: &dyn HttpClient, url: &str, form: &[(String, String)]) -> Result<Fetched> {
    let first = client.post_form(url, form)?;
    follow(client, first, Some(form))
}

fn follow(client: &dyn HttpClient, mut resp: HttpResponse, mut form: Option<&[(String, String)]>) -> Result<Fetched> {
    let mut history = Vec::new();
    while resp.is_redirect() {
        if history.len() >= MAX_REDIRECTS {
            return Err(WatchError::Transport(format!("too many redirects from {}", resp.url)));
        }
        let location = resp.location.as_deref().unwrap_or_default();
        let next = resolve_url(&resp.url, location)?;
        logd!("redirect {} {} -> {}", resp.status, resp.url, next);
        history.push(next.clone());

        if !matches!(resp.status, 307 | 308) {
            form = None;
        }
        resp = match form {
            Some(f) => client.post_form(&next, f)?,
            None => client.get(&next)?,
        };
    }
    if !resp.is_success() {
        return Err(WatchError::Transport(format!("HTTP {} from {}", resp.status, resp.url)));
    }
    Ok(Fetched { history, final_url: resp.url, body: resp.body })
}
