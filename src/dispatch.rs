// src/dispatch.rs
use crate::clock::Clock;
use crate::config::NotifyFilter;
use crate::error::Result;
use crate::file::AlarmLog;
use crate::notify::Notifier;
use crate::specs::alarms::{AlarmRecord, Transition};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Alarm messages delivered.
    pub sent: usize,
    /// Eligible alarms left unsent because of the cap.
    pub skipped: usize,
    /// Alarms excluded by the filter mode (logged, never sent).
    pub filtered: usize,
    /// The overflow summary could not be delivered.
    pub summary_failed: bool,
}

pub struct Dispatcher<'a> {
    pub notifier: &'a dyn Notifier,
    pub destination: &'a str,
    pub alarm_log: &'a AlarmLog,
    pub clock: &'a dyn Clock,
    pub subject_prefix: &'a str,
    pub filter: NotifyFilter,
}

impl Dispatcher<'_> {
    /// Append to the alarm log only.
    pub fn record(&self, alarms: &[AlarmRecord]) -> Result<()> {
        self.alarm_log.append(alarms, &self.clock.now().format("%Y-%m-%dT%H:%M:%S").to_string())
    }

    /// Log every alarm, then notify up to `cap` of them, oldest first.
    ///
    /// The first failed delivery aborts the rest of the batch with
    /// `WatchError::Notify`. When more alarms were eligible than `cap`, one
    /// summary message follows; its failure is logged, not returned.
    pub fn dispatch(&self, new_alarms: &[AlarmRecord], cap: usize) -> Result<DispatchOutcome> {
        self.record(new_alarms)?;

        let eligible: Vec<&AlarmRecord> = new_alarms
            .iter()
            .filter(|a| match self.filter {
                NotifyFilter::All => true,
                NotifyFilter::OccurredOnly => a.transition_kind() == Transition::Occurred,
            })
            .collect();

        let mut outcome = DispatchOutcome {
            filtered: new_alarms.len() - eligible.len(),
            skipped: eligible.len().saturating_sub(cap),
            ..Default::default()
        };

        for alarm in eligible.iter().take(cap) {
            self.notifier.send(self.destination, &format_alarm(alarm, self.subject_prefix))?;
            outcome.sent += 1;
        }

        if outcome.skipped > 0 {
            let text = format_limit_summary(self.subject_prefix, outcome.sent, eligible.len(), outcome.skipped);
            if let Err(e) = self.notifier.send(self.destination, &text) {
                loge!("limit summary via {} failed: {}", self.notifier.name(), e);
                outcome.summary_failed = true;
            }
        }
        Ok(outcome)
    }
}

pub fn format_alarm(alarm: &AlarmRecord, prefix: &str) -> String {
    let header = match alarm.transition_kind() {
        Transition::Occurred => format!("🚨 {prefix} ALARM OCCURRED"),
        Transition::Cleared => format!("✅ {prefix} ALARM CLEARED"),
        Transition::Other => format!("ℹ️ {prefix} ALARM UPDATE"),
    };
    format!(
        "{header}\n{} - {}\n🕒 {}\n🔁 {} | 📌 {}\n🔢 Value: {}\n🌐 {}",
        alarm.reference,
        alarm.label,
        alarm.timestamp_text,
        alarm.transition,
        alarm.state,
        alarm.value,
        alarm.source_url,
    )
}

pub fn format_limit_summary(prefix: &str, sent: usize, total: usize, skipped: usize) -> String {
    format!(
        "⚠️ {prefix} Notification limit reached\n\
         Sent {sent}/{total} alarm notifications in this cycle.\n\
         {skipped} additional alarm(s) were NOT sent.\n\
         All alarms were still logged to CSV."
    )
}
