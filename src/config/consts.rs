// src/config/consts.rs

// Controller pages
pub const LOGIN_PAGE: &str = "/login.htm";
pub const ALARMS_PAGE: &str = "/alarms.htm";
pub const LOGIN_FORM_NAME: &str = "beginsession";
pub const DEFAULT_FORM_ACTION: &str = "/beginsession";
pub const USER_FIELD: &str = "param1";
pub const PASSWORD_FIELD: &str = "param2";
pub const TOKEN_PARAM: &str = "param0";

// Net
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux armv7l) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120 Safari/537.36";
pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
pub const MAX_REDIRECTS: usize = 10;

// Loop
pub const POLL_SECS: u64 = 900;
pub const MAX_NOTIFICATIONS_PER_CYCLE: usize = 10;

// Messages
pub const SUBJECT_PREFIX: &str = "[Caldera Pellet]";
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const NOTIFY_TIMEOUT_SECS: u64 = 10;

// Local files
pub const STATE_FILE: &str = "alarm_state.json";
pub const ALARM_LOG_CSV: &str = "alarms_log.csv";

// Table shapes
pub const ALARM_COLUMNS: usize = 7;
pub const SIGNAL_COLUMNS: usize = 6;
