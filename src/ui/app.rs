//! Demo application state

use crate::config::Config;
use crate::intent::Intent;
use chrono::{DateTime, Local};
use std::collections::{HashMap, VecDeque};
use std::time::Instant;

/// Application running state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Running,
    Paused,
    Quitting,
}

/// One line of the on-screen intent log. Consecutive samples of the same
/// intent coalesce into a single entry with a tick count.
#[derive(Debug, Clone)]
pub struct IntentEntry {
    pub intent: Intent,
    pub first_seen: DateTime<Local>,
    pub ticks: u64,
}

/// Demo application: run state, intent history and the status line.
pub struct App {
    pub state: AppState,
    pub config: Config,
    pub start_time: Instant,
    /// Samples taken while running
    pub total_samples: u64,
    /// Intent activations across all samples
    pub total_intents: u64,
    log: VecDeque<IntentEntry>,
    totals: HashMap<Intent, u64>,
    /// Intents active in the previous sample, for log coalescing
    last_active: Vec<Intent>,
    status_message: Option<String>,
    status_time: Option<Instant>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            state: AppState::Running,
            config,
            start_time: Instant::now(),
            total_samples: 0,
            total_intents: 0,
            log: VecDeque::new(),
            totals: HashMap::new(),
            last_active: Vec::new(),
            status_message: None,
            status_time: None,
        }
    }

    /// Record one sample's worth of active intents.
    pub fn record(&mut self, intents: &[Intent]) {
        if self.state != AppState::Running {
            return;
        }

        self.total_samples += 1;
        for &intent in intents {
            self.total_intents += 1;
            *self.totals.entry(intent).or_insert(0) += 1;

            // A held intent bumps its latest entry instead of scrolling the log
            let held = self.last_active.contains(&intent);
            let existing = self
                .log
                .iter_mut()
                .rev()
                .find(|entry| entry.intent == intent)
                .filter(|_| held);
            match existing {
                Some(entry) => entry.ticks += 1,
                None => self.log.push_back(IntentEntry {
                    intent,
                    first_seen: Local::now(),
                    ticks: 1,
                }),
            }
        }
        self.last_active = intents.to_vec();

        while self.log.len() > self.config.demo.intent_log_len {
            self.log.pop_front();
        }
    }

    /// Most recent log entries, newest last.
    pub fn log(&self) -> impl Iterator<Item = &IntentEntry> {
        self.log.iter()
    }

    /// Total activations recorded for one intent.
    pub fn total_for(&self, intent: Intent) -> u64 {
        self.totals.get(&intent).copied().unwrap_or(0)
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            AppState::Running => {
                self.set_status("Paused".to_string());
                AppState::Paused
            }
            AppState::Paused => {
                self.set_status("Resumed".to_string());
                AppState::Running
            }
            AppState::Quitting => AppState::Quitting,
        };
    }

    pub fn quit(&mut self) {
        self.state = AppState::Quitting;
    }

    /// Clear the log and counters without touching the run state.
    pub fn reset(&mut self) {
        self.log.clear();
        self.totals.clear();
        self.last_active.clear();
        self.total_samples = 0;
        self.total_intents = 0;
        self.start_time = Instant::now();
        self.set_status("Reset".to_string());
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_time = Some(Instant::now());
    }

    /// Current status message; messages expire after a few seconds.
    pub fn status(&self) -> Option<&str> {
        match (&self.status_message, self.status_time) {
            (Some(message), Some(at)) if at.elapsed().as_secs() < 3 => Some(message.as_str()),
            _ => None,
        }
    }

    /// Session duration as mm:ss
    pub fn elapsed_formatted(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}
