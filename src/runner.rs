// src/runner.rs
use crate::{
    clock::Clock,
    config::{FirstRunPolicy, WatcherConfig},
    core::net::Connector,
    dispatch::{DispatchOutcome, Dispatcher},
    engine::detect_new,
    error::Result,
    file::{AlarmLog, SignalLog},
    notify::Notifier,
    session::SessionAcquirer,
    specs,
    store::StateStore,
};

/// What one successful cycle did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Signals written to the signal log, when signal logging is on.
    pub signals_logged: Option<usize>,
    /// Rows in the alarm table.
    pub alarms_seen: usize,
    pub new_alarms: usize,
    /// `None` when nothing was dispatched (no news, or first-run seeding).
    pub outcome: Option<DispatchOutcome>,
    /// Id stored as last seen by this cycle.
    pub saved_id: Option<String>,
}

/// Summary of a bounded `run`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: usize,
    pub failures: usize,
}

/// The poll loop. Everything it touches is handed in at construction.
pub struct Watcher<'a> {
    config: &'a WatcherConfig,
    connector: &'a dyn Connector,
    notifier: &'a dyn Notifier,
    clock: &'a dyn Clock,
    store: StateStore,
    alarm_log: AlarmLog,
    signal_log: Option<SignalLog>,
}

impl<'a> Watcher<'a> {
    pub fn new(
        config: &'a WatcherConfig,
        connector: &'a dyn Connector,
        notifier: &'a dyn Notifier,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            config,
            connector,
            notifier,
            clock,
            store: StateStore::new(&config.state_path),
            alarm_log: AlarmLog::new(&config.alarm_log_path),
            signal_log: config.signals.as_ref().map(|s| SignalLog::new(&s.log_path)),
        }
    }

    /// login → (signals) → alarms → detect → log + notify → persist.
    /// State is only written when every step before it succeeded.
    pub fn run_cycle(&self) -> Result<CycleReport> {
        let last_id = self.store.load();
        let session = SessionAcquirer::new(self.config, self.connector).acquire()?;
        let mut report = CycleReport::default();

        if let (Some(sig), Some(log)) = (&self.config.signals, &self.signal_log) {
            let url = session.signals_url(&sig.path);
            let signals = specs::signals::parse(&session.fetch(&url)?)?;
            log.append_snapshot(&signals, &url, self.clock.now())?;
            logf!("Signals logged: {}", signals.len());
            report.signals_logged = Some(signals.len());
        }

        let alarms_url = session.alarms_url();
        let alarms = specs::alarms::parse(&session.fetch(&alarms_url)?, &alarms_url)?;
        report.alarms_seen = alarms.len();
        let Some(newest) = alarms.first() else {
            logf!("No alarms in the table.");
            return Ok(report);
        };

        let fresh = detect_new(&alarms, last_id.as_deref());
        report.new_alarms = fresh.len();
        if fresh.is_empty() {
            logf!("Nothing new.");
            return Ok(report);
        }

        let dispatcher = Dispatcher {
            notifier: self.notifier,
            destination: &self.config.telegram.chat_id,
            alarm_log: &self.alarm_log,
            clock: self.clock,
            subject_prefix: &self.config.subject_prefix,
            filter: self.config.filter,
        };

        if last_id.is_none() && self.config.first_run == FirstRunPolicy::SeedOnly {
            dispatcher.record(&fresh)?;
            logf!("First run: {} alarm(s) logged, none notified.", fresh.len());
        } else {
            let outcome = dispatcher.dispatch(&fresh, self.config.max_notifications_per_cycle)?;
            logf!(
                "New: {} | Notified: {} | Skipped: {} | Filtered: {}",
                fresh.len(), outcome.sent, outcome.skipped, outcome.filtered
            );
            report.outcome = Some(outcome);
        }

        // newest observed, not newest notified: capped alarms are never re-sent
        self.store.save(&newest.id, &self.clock.stamp())?;
        report.saved_id = Some(newest.id.clone());
        Ok(report)
    }

    /// Run cycles back to back with the poll interval between them.
    /// `max_cycles = None` runs until the process is killed. A failing cycle
    /// is logged and the loop carries on.
    pub fn run(&self, max_cycles: Option<usize>) -> RunSummary {
        let mut summary = RunSummary::default();
        loop {
            if let Err(e) = self.run_cycle() {
                loge!("ERROR: {}", e);
                summary.failures += 1;
            }
            summary.cycles += 1;

            if max_cycles.is_some_and(|max| summary.cycles >= max) {
                return summary;
            }
            logf!("Sleeping {} seconds...", self.config.poll_interval.as_secs());
            self.clock.sleep(self.config.poll_interval);
        }
    }
}
