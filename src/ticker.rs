//! Periodic order-status progression.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, Instrument};

use crate::clients::StoreClient;

/// Background task that asks the store to advance order statuses once per
/// period. The first tick fires one full period after [`StatusTicker::spawn`].
pub struct StatusTicker {
    cancelled: Arc<AtomicBool>,
    wake: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl StatusTicker {
    pub fn spawn(client: StoreClient, period: Duration) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let wake = Arc::new(Notify::new());

        let span = tracing::info_span!("status_ticker", period_secs = period.as_secs());
        let handle = tokio::spawn(
            run(client, period, Arc::clone(&cancelled), Arc::clone(&wake)).instrument(span),
        );

        Self {
            cancelled,
            wake,
            handle,
        }
    }

    /// Cancels the ticker and waits for its task to finish. No tick is sent
    /// once this returns.
    pub async fn stop(self) {
        self.cancelled.store(true, Ordering::SeqCst);
        // Stores a permit if the task is mid-request, so it cannot miss the wakeup.
        self.wake.notify_one();

        if let Err(e) = self.handle.await {
            error!(error = ?e, "Status ticker task failed");
        }
    }
}

async fn run(client: StoreClient, period: Duration, cancelled: Arc<AtomicBool>, wake: Arc<Notify>) {
    info!("Status ticker starting");

    let mut timer = time::interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = timer.tick() => {}
            _ = wake.notified() => {}
        }

        if cancelled.load(Ordering::SeqCst) {
            break;
        }

        match client.tick().await {
            Ok(advanced) => debug!(advanced, "Tick delivered"),
            Err(e) => {
                debug!(error = %e, "Store unavailable, ticker exiting");
                break;
            }
        }
    }

    info!("Status ticker stopped");
}
