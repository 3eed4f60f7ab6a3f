//! Live clock display.
//!
//! [`ClockTicker`] runs a periodic task that publishes the local wall-clock
//! time as `HH:MM:SS`. The task lives exactly as long as the ticker: dropping
//! it aborts the task.

use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Default refresh period of the clock display
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Format a timestamp the way the clock displays it
pub fn format_clock<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%H:%M:%S").to_string()
}

/// Current local time formatted for display
pub fn now_display() -> String {
    format_clock(&Local::now())
}

/// Scoped periodic task producing clock strings
pub struct ClockTicker {
    receiver: watch::Receiver<String>,
    task: JoinHandle<()>,
}

impl ClockTicker {
    /// Start ticking every `period` on the current tokio runtime
    pub fn spawn(period: Duration) -> Self {
        let (sender, receiver) = watch::channel(now_display());
        let task = tokio::spawn(async move {
            let mut ticks = interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                if sender.send(now_display()).is_err() {
                    break;
                }
            }
        });

        Self { receiver, task }
    }

    /// Latest published clock string
    pub fn current(&self) -> String {
        self.receiver.borrow().clone()
    }

    /// A receiver that observes every subsequent tick
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.receiver.clone()
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
