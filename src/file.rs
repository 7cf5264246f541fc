// src/file.rs
// Append-only CSV logs. One writer process per file is assumed; nothing here
// locks against other processes appending to the same files.

use std::{
    fs::{self, File, OpenOptions},
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};

use crate::csv::{first_row, parse_rows, write_row};
use crate::error::{Result, WatchError};
use crate::specs::alarms::AlarmRecord;
use crate::specs::signals::SignalRecord;

pub const ALARM_LOG_HEADERS: [&str; 10] = [
    "saved_at_local",
    "ref",
    "label",
    "type",
    "value",
    "plc_time",
    "transition",
    "current_state",
    "alarms_url",
    "alarm_id",
];

/// One line of the alarm log as read back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlarmLogEntry {
    pub saved_at: String,
    pub record: AlarmRecord,
}

pub struct AlarmLog {
    path: PathBuf,
}

impl AlarmLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Append `alarms` in the given order. The header goes in once, when the file is created.
    pub fn append(&self, alarms: &[AlarmRecord], saved_at: &str) -> Result<()> {
        if alarms.is_empty() {
            return Ok(());
        }
        let fresh = !self.path.exists();
        let mut out = open_append(&self.path)?;
        if fresh {
            write_row(&mut out, &ALARM_LOG_HEADERS)?;
        }
        for a in alarms {
            write_row(&mut out, &[
                saved_at,
                a.reference.as_str(),
                a.label.as_str(),
                a.kind.as_str(),
                a.value.as_str(),
                a.timestamp_text.as_str(),
                a.transition.as_str(),
                a.state.as_str(),
                a.source_url.as_str(),
                a.id.as_str(),
            ])?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Read the alarm log back, header skipped. The stored id is kept verbatim.
pub fn read_alarm_log(path: &Path) -> Result<Vec<AlarmLogEntry>> {
    let text = fs::read_to_string(path)?;
    let mut rows = parse_rows(&text).into_iter();
    match rows.next() {
        Some(h) if h == ALARM_LOG_HEADERS => {}
        Some(h) => return Err(WatchError::Parse(format!("unexpected alarm log header: {}", h.join(",")))),
        None => return Ok(Vec::new()),
    }

    let mut out = Vec::new();
    for (i, row) in rows.enumerate() {
        let Ok([saved_at, reference, label, kind, value, time, transition, state, url, id]) =
            <[String; 10]>::try_from(row)
        else {
            return Err(WatchError::Parse(format!("alarm log line {} has wrong column count", i + 2)));
        };
        out.push(AlarmLogEntry {
            saved_at,
            record: AlarmRecord {
                id,
                reference,
                label,
                kind,
                value,
                timestamp_text: time,
                transition,
                state,
                source_url: url,
            },
        });
    }
    Ok(out)
}

pub struct SignalLog {
    path: PathBuf,
}

impl SignalLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn headers(signals: &[SignalRecord]) -> Vec<String> {
        let mut h = vec![s!("timestamp_local"), s!("source_url")];
        h.extend(signals.iter().map(SignalRecord::header));
        h
    }

    /// Append one snapshot row. If the existing file was written for another
    /// signal set, a new `<stem>_<YYYYmmdd_HHMMSS>.csv` is started beside it.
    /// Returns the file written, `None` for an empty snapshot.
    pub fn append_snapshot(
        &self,
        signals: &[SignalRecord],
        source_url: &str,
        now: DateTime<Local>,
    ) -> Result<Option<PathBuf>> {
        if signals.is_empty() {
            return Ok(None);
        }
        let headers = Self::headers(signals);
        let mut target = self.path.clone();
        let mut fresh = !target.exists();

        if !fresh {
            match read_header(&target) {
                Ok(Some(existing)) if existing == headers => {}
                Ok(_) => {
                    target = timestamped_sibling(&self.path, now);
                    logw!("signal header changed, starting new CSV: {}", target.display());
                    fresh = !target.exists();
                }
                Err(e) => logw!("could not check header of {}: {}", self.path.display(), e),
            }
        }

        let mut out = open_append(&target)?;
        if fresh {
            write_row(&mut out, &headers)?;
        }
        let mut row = vec![now.format("%Y-%m-%dT%H:%M:%S").to_string(), s!(source_url)];
        row.extend(signals.iter().map(|s| s.value.clone()));
        write_row(&mut out, &row)?;
        out.flush()?;
        Ok(Some(target))
    }
}

fn read_header(path: &Path) -> Result<Option<Vec<String>>> {
    let mut line = s!();
    BufReader::new(File::open(path)?).read_line(&mut line)?;
    Ok(first_row(&line))
}

/// `dir/name.csv` → `dir/name_20260101_120000.csv`
pub fn timestamped_sibling(path: &Path, now: DateTime<Local>) -> PathBuf {
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let name = format!("{}_{}.csv", stem, now.format("%Y%m%d_%H%M%S"));
    path.with_file_name(name)
}

fn open_append(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(BufWriter::new(file))
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(WatchError::Io(std::io::Error::other(format!(
            "path exists but is not a directory: {}",
            dir.display()
        ))));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
