// tests/common/mod.rs
//
// Scripted controller, recording notifier and a fixed clock.
//
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};

use plc_watch::clock::Clock;
use plc_watch::config::WatcherConfig;
use plc_watch::core::net::{Connector, HttpClient, HttpResponse};
use plc_watch::notify::Notifier;
use plc_watch::specs::alarms::AlarmRecord;
use plc_watch::{Result, WatchError};

pub const BASE: &str = "http://plc.local";
pub const TOKEN: &str = "ABC123";

/* ---------------- Fake controller ---------------- */

#[derive(Default)]
struct Routes {
    gets: HashMap<String, HttpResponse>,
    posts: HashMap<String, HttpResponse>,
    requested: Vec<String>,
    forms: Vec<(String, Vec<(String, String)>)>,
    connects: usize,
}

#[derive(Clone, Default)]
pub struct FakeController {
    routes: Rc<RefCell<Routes>>,
}

fn ok(url: &str, body: &str) -> HttpResponse {
    HttpResponse { status: 200, url: url.to_string(), location: None, body: body.to_string() }
}

impl FakeController {
    pub fn new() -> Self { Self::default() }

    pub fn page(&self, url: &str, body: &str) -> &Self {
        self.routes.borrow_mut().gets.insert(url.to_string(), ok(url, body));
        self
    }

    pub fn redirect(&self, url: &str, location: &str) -> &Self {
        self.routes.borrow_mut().gets.insert(
            url.to_string(),
            HttpResponse { status: 302, url: url.to_string(), location: Some(location.to_string()), body: String::new() },
        );
        self
    }

    pub fn post_answer(&self, url: &str, resp: HttpResponse) -> &Self {
        self.routes.borrow_mut().posts.insert(url.to_string(), resp);
        self
    }

    pub fn post_page(&self, url: &str, body: &str) -> &Self {
        self.post_answer(url, ok(url, body))
    }

    pub fn post_redirect(&self, url: &str, location: &str) -> &Self {
        self.post_answer(
            url,
            HttpResponse { status: 302, url: url.to_string(), location: Some(location.to_string()), body: String::new() },
        )
    }

    pub fn requested(&self) -> Vec<String> { self.routes.borrow().requested.clone() }
    pub fn forms(&self) -> Vec<(String, Vec<(String, String)>)> { self.routes.borrow().forms.clone() }
    pub fn connects(&self) -> usize { self.routes.borrow().connects }

    /// Login page, redirecting login answer, alarm page with `alarm_rows`.
    pub fn standard<S: AsRef<str>>(alarm_rows: &[[S; 7]]) -> Self {
        let c = Self::new();
        c.page(&format!("{BASE}/login.htm"), LOGIN_PAGE);
        c.post_redirect(&format!("{BASE}/beginsession"), &format!("/main.htm?param0={TOKEN}"));
        c.page(&format!("{BASE}/main.htm?param0={TOKEN}"), "<html><body>menu</body></html>");
        c.set_alarms(alarm_rows);
        c
    }

    pub fn set_alarms<S: AsRef<str>>(&self, alarm_rows: &[[S; 7]]) {
        self.page(&format!("{BASE}/alarms.htm?param0={TOKEN}"), &alarms_page(alarm_rows));
    }
}

impl HttpClient for FakeController {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let mut r = self.routes.borrow_mut();
        r.requested.push(format!("GET {url}"));
        Ok(r.gets.get(url).cloned().unwrap_or(HttpResponse {
            status: 404,
            url: url.to_string(),
            location: None,
            body: String::new(),
        }))
    }

    fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<HttpResponse> {
        let mut r = self.routes.borrow_mut();
        r.requested.push(format!("POST {url}"));
        r.forms.push((url.to_string(), form.to_vec()));
        r.posts
            .get(url)
            .cloned()
            .ok_or_else(|| WatchError::Transport(format!("connection refused: {url}")))
    }
}

impl Connector for FakeController {
    fn connect(&self) -> Result<Box<dyn HttpClient>> {
        self.routes.borrow_mut().connects += 1;
        Ok(Box::new(self.clone()))
    }
}

/* ---------------- Notifier ---------------- */

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Rc<RefCell<Vec<(String, String)>>>,
    /// Deliveries that succeed before every further one fails.
    fail_after: Option<usize>,
    attempts: Rc<RefCell<usize>>,
}

impl RecordingNotifier {
    pub fn new() -> Self { Self::default() }

    pub fn failing_after(n: usize) -> Self {
        Self { fail_after: Some(n), ..Self::default() }
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent.borrow().iter().map(|(_, t)| t.clone()).collect()
    }

    pub fn destinations(&self) -> Vec<String> {
        self.sent.borrow().iter().map(|(d, _)| d.clone()).collect()
    }

    pub fn attempts(&self) -> usize { *self.attempts.borrow() }
}

impl Notifier for RecordingNotifier {
    fn name(&self) -> &'static str { "recording" }

    fn send(&self, destination: &str, text: &str) -> Result<()> {
        *self.attempts.borrow_mut() += 1;
        if self.fail_after.is_some_and(|n| self.sent.borrow().len() >= n) {
            return Err(WatchError::Notify("HTTP 502".into()));
        }
        self.sent.borrow_mut().push((destination.to_string(), text.to_string()));
        Ok(())
    }
}

/* ---------------- Clock ---------------- */

#[derive(Default)]
pub struct FixedClock {
    pub sleeps: RefCell<Vec<Duration>>,
}

impl FixedClock {
    pub fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 1, 31, 8, 15, 0).unwrap()
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> { Self::at() }
    fn sleep(&self, d: Duration) { self.sleeps.borrow_mut().push(d) }
}

/* ---------------- Fixtures ---------------- */

pub const LOGIN_PAGE: &str = r#"<html><head><title>Login</title></head><body>
<form name="beginsession" action="/beginsession" method="post">
  <input type="hidden" name="seed" value="5F3A">
  <input type="hidden" name="lang" value="es">
  User <input type="text" name="param1" value="">
  Password <input type="password" name="param2" value="">
  <input type="submit" value="Entrar">
</form>
</body></html>"#;

pub fn alarms_page<S: AsRef<str>>(rows: &[[S; 7]]) -> String {
    let mut html = String::from(
        "<html><body><h1>Alarmas</h1>\n<table border=1>\n\
         <tr><th>Ref</th><th>Etiqueta</th><th>Tipo</th><th>Valor</th><th>Hora</th><th>Transicion</th><th>Estado</th></tr>\n",
    );
    for r in rows {
        html.push_str("<tr>");
        for c in r {
            html.push_str(&format!("<td> {} </td>", c.as_ref()));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table></body></html>");
    html
}

pub fn signals_page(rows: &[[&str; 6]]) -> String {
    let mut html = String::from(
        "<html><body><table>\n<tr><td>Sensor</td><td>Etiqueta</td><td>Valor</td><td>Unidad</td><td>Tipo</td><td>Alarma</td></tr>\n",
    );
    for r in rows {
        html.push_str(&format!(
            "<tr><td><a href=\"S.htm?s={0}\">{0}</a></td><td>{1}</td><td>{2}</td><td>{3}</td><td>{4}</td><td>{5}</td></tr>\n",
            r[0], r[1], r[2], r[3], r[4], r[5]
        ));
    }
    html.push_str("</table></body></html>");
    html
}

/// Alarm row `n`, distinct per `n`.
pub fn row(n: usize) -> [String; 7] {
    [
        format!("A{n:02}"),
        format!("Alarm {n}"),
        "Digital".to_string(),
        format!("{n}"),
        format!("31/01/2026 08:{n:02}:00"),
        if n % 2 == 0 { "Eliminado".to_string() } else { "Ocurrido".to_string() },
        "Activo".to_string(),
    ]
}

pub fn record(n: usize) -> AlarmRecord {
    let r = row(n);
    AlarmRecord::new(&r[0], &r[1], &r[2], &r[3], &r[4], &r[5], &r[6], "http://plc.local/alarms.htm?param0=ABC123")
}

/// Table rows `newest..=1`, most recent first.
pub fn rows_desc(newest: usize) -> Vec<[String; 7]> {
    (1..=newest).rev().map(row).collect()
}

/// Most-recent-first list of records `newest..=1`.
pub fn records_desc(newest: usize) -> Vec<AlarmRecord> {
    (1..=newest).rev().map(record).collect()
}

pub fn config_in(dir: &std::path::Path) -> WatcherConfig {
    let mut cfg = WatcherConfig::new(BASE, "operator", "s3cret", "123:bot", "-100200");
    cfg.state_path = dir.join("state").join("alarm_state.json");
    cfg.alarm_log_path = dir.join("logs").join("alarms_log.csv");
    cfg
}
