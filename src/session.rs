// src/session.rs
//! Login handshake against the controller.
//!
//! The firmware answers the login POST either with a redirect chain whose
//! URLs carry `param0=<HEX>`, or with a small HTML page holding one link
//! that carries it. [`TokenStrategy`] implementations cover each shape and
//! are tried in order by [`SessionAcquirer`].

use std::sync::LazyLock;

use regex::Regex;

use crate::config::WatcherConfig;
use crate::config::consts::{ALARMS_PAGE, DEFAULT_FORM_ACTION, LOGIN_PAGE, TOKEN_PARAM};
use crate::core::html;
use crate::core::net::{self, Connector, Fetched, HttpClient};
use crate::error::{Result, WatchError};

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"param0=([A-F0-9]+)").expect("static regex"));

/// First `param0=<HEX>` token in `s`.
pub fn find_token(s: &str) -> Option<String> {
    TOKEN_RE.captures(s).map(|c| s!(&c[1]))
}

/// One way of digging the token out of the login answer.
pub trait TokenStrategy {
    fn name(&self) -> &'static str;
    fn extract(&self, login: &Fetched) -> Option<String>;
}

/// Redirect locations first, then the final URL.
pub struct RedirectHistory;

impl TokenStrategy for RedirectHistory {
    fn name(&self) -> &'static str { "redirect-history" }

    fn extract(&self, login: &Fetched) -> Option<String> {
        login
            .history
            .iter()
            .chain(std::iter::once(&login.final_url))
            .find_map(|u| find_token(u))
    }
}

/// The first hyperlink of the returned page.
pub struct FirstLink;

impl TokenStrategy for FirstLink {
    fn name(&self) -> &'static str { "first-link" }

    fn extract(&self, login: &Fetched) -> Option<String> {
        html::first_link_href(&login.body).and_then(|h| find_token(&h))
    }
}

pub fn default_strategies() -> Vec<Box<dyn TokenStrategy>> {
    vec![Box::new(RedirectHistory), Box::new(FirstLink)]
}

/// An authenticated client plus its token. Good for one cycle only.
pub struct SessionHandle {
    client: Box<dyn HttpClient>,
    base_url: String,
    pub token: String,
}

impl SessionHandle {
    pub fn alarms_url(&self) -> String {
        format!("{}{}?{}={}", self.base_url, ALARMS_PAGE, TOKEN_PARAM, self.token)
    }

    pub fn signals_url(&self, path: &str) -> String {
        format!("{}{}?ovrideStart=0&{}={}", self.base_url, path, TOKEN_PARAM, self.token)
    }

    /// GET inside the session; returns the body.
    pub fn fetch(&self, url: &str) -> Result<String> {
        Ok(net::get_following(self.client.as_ref(), url)?.body)
    }
}

pub struct SessionAcquirer<'a> {
    config: &'a WatcherConfig,
    connector: &'a dyn Connector,
    strategies: Vec<Box<dyn TokenStrategy>>,
}

impl<'a> SessionAcquirer<'a> {
    pub fn new(config: &'a WatcherConfig, connector: &'a dyn Connector) -> Self {
        Self { config, connector, strategies: default_strategies() }
    }

    pub fn with_strategies(mut self, strategies: Vec<Box<dyn TokenStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Fresh client, fresh login.
    pub fn acquire(&self) -> Result<SessionHandle> {
        let client = self.connector.connect()?;
        let base = &self.config.base_url;

        let login_url = self.config.page_url(LOGIN_PAGE);
        let login_page = net::get_following(client.as_ref(), &login_url)?;

        let form = html::find_form(&login_page.body, &self.config.login_form_name)
            .ok_or_else(|| WatchError::Auth(s!("no login form")))?;

        let action = form.action.as_deref().filter(|a| !a.is_empty()).unwrap_or(DEFAULT_FORM_ACTION);
        // "/x" hangs off the configured base (which may carry a path prefix);
        // "//host/x" is protocol-relative and resolved like any other link
        let post_url = if action.starts_with('/') && !action.starts_with("//") {
            format!("{base}{action}")
        } else {
            net::resolve_url(&format!("{base}/"), action)?
        };

        let payload = self.build_payload(form.fields);
        logd!("posting {} fields to {}", payload.len(), post_url);
        let answer = net::post_following(client.as_ref(), &post_url, &payload)?;

        let token = self
            .strategies
            .iter()
            .find_map(|s| {
                let t = s.extract(&answer);
                if t.is_some() {
                    logd!("session token found by {}", s.name());
                }
                t
            })
            .ok_or_else(|| WatchError::Auth(s!("token not found")))?;

        Ok(SessionHandle { client, base_url: base.clone(), token })
    }

    /// Hidden fields as served, credentials written into their slots.
    fn build_payload(&self, mut fields: Vec<(String, String)>) -> Vec<(String, String)> {
        let (user_slot, pass_slot) = &self.config.credential_fields;
        for (slot, value) in [(user_slot, &self.config.username), (pass_slot, &self.config.password)] {
            match fields.iter_mut().find(|(n, _)| n == slot) {
                Some(f) => f.1 = value.clone(),
                None => fields.push((slot.clone(), value.clone())),
            }
        }
        fields
    }
}
