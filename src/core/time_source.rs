use crate::domain::model::{Period, TimeSnapshot};
use crate::domain::ports::Clock;
use chrono::{NaiveDateTime, Timelike};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

pub const TICK: Duration = Duration::from_millis(1000);

/// Convert a 0..=23 hour into the displayed hour and its period.
pub fn display_hour(hour: u32, use_24_hour: bool) -> (u32, Period) {
    if use_24_hour {
        return (hour, Period::None);
    }

    let period = if hour >= 12 { Period::Pm } else { Period::Am };
    // 0 點與 12 點都顯示為 12，不會出現 00
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    (hour, period)
}

pub fn snapshot_at(now: &NaiveDateTime, use_24_hour: bool) -> TimeSnapshot {
    let (hour, period) = display_hour(now.hour(), use_24_hour);

    TimeSnapshot {
        hours: format!("{:02}", hour),
        minutes: format!("{:02}", now.minute()),
        seconds: format!("{:02}", now.second()),
        period: period.as_str().to_string(),
        // en-US 長日期，例如 "SUNDAY, OCT 18, 2026"
        full_date: now.format("%A, %b %-d, %Y").to_string().to_uppercase(),
    }
}

pub struct TimeSource<C: Clock> {
    clock: Arc<C>,
    tick: Duration,
}

impl<C: Clock> TimeSource<C> {
    pub fn new(clock: C) -> Self {
        Self::with_tick(clock, TICK)
    }

    pub fn with_tick(clock: C, tick: Duration) -> Self {
        Self {
            clock: Arc::new(clock),
            tick,
        }
    }

    pub fn snapshot(&self, use_24_hour: bool) -> TimeSnapshot {
        snapshot_at(&self.clock.now(), use_24_hour)
    }

    /// Emit a snapshot now and then once per tick until the returned
    /// [`Observation`] is stopped or dropped. Must be called inside a tokio
    /// runtime.
    pub fn observe<F>(&self, use_24_hour: bool, mut on_snapshot: F) -> Observation
    where
        F: FnMut(TimeSnapshot) + Send + 'static,
    {
        let (format_tx, mut format_rx) = watch::channel(use_24_hour);
        let clock = Arc::clone(&self.clock);
        let tick = self.tick;

        let task = tokio::spawn(async move {
            loop {
                let use_24_hour = *format_rx.borrow_and_update();
                on_snapshot(snapshot_at(&clock.now(), use_24_hour));

                // 每次切換格式都重新開始計時
                let mut interval = time::interval_at(Instant::now() + tick, tick);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            on_snapshot(snapshot_at(&clock.now(), use_24_hour));
                        }
                        changed = format_rx.changed() => {
                            if changed.is_err() {
                                return;
                            }
                            tracing::debug!("🕒 Hour format changed, recomputing");
                            break;
                        }
                    }
                }
            }
        });

        tracing::debug!("🕒 Time source observation started (24h: {})", use_24_hour);

        Observation {
            format_tx,
            task: Some(task),
        }
    }
}

/// Handle to a running time source. Dropping it cancels the timer.
pub struct Observation {
    format_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl Observation {
    /// Switch hour format. A real change triggers an immediate snapshot and
    /// restarts the one-second cadence; setting the current value is a no-op.
    pub fn set_24_hour(&self, use_24_hour: bool) {
        self.format_tx.send_if_modified(|current| {
            if *current == use_24_hour {
                false
            } else {
                *current = use_24_hour;
                true
            }
        });
    }

    pub fn is_24_hour(&self) -> bool {
        *self.format_tx.borrow()
    }

    /// Cancel the timer and wait until the task is gone. No callback runs
    /// after this returns.
    pub async fn stop(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
        tracing::debug!("🕒 Time source observation stopped");
    }
}

impl Drop for Observation {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
