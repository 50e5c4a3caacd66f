use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::tracker::Tracker;

const MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Scoped handle to the polling timer.
///
/// The timer stops when the handle is stopped or dropped. Fetches that were
/// already issued are left to finish and still update the tracker.
#[derive(Debug)]
pub struct Poller {
    stop_tx: Option<oneshot::Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl Poller {
    /// Fetches immediately, then once per `every`.
    pub fn start(tracker: Tracker, every: Duration) -> Self {
        let every = every.max(MIN_INTERVAL);
        let (stop_tx, stop_rx) = oneshot::channel();
        let join = tokio::spawn(run_poll_loop(tracker, every, stop_rx));

        log::info!(
            "Poller started, fetching every {}",
            humantime::format_duration(every)
        );

        Self {
            stop_tx: Some(stop_tx),
            join: Some(join),
        }
    }

    pub async fn stop(mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.await;
        }
        log::info!("Poller stopped");
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if let Some(join) = self.join.take() {
            join.abort();
        }
    }
}

async fn run_poll_loop(tracker: Tracker, every: Duration, mut stop_rx: oneshot::Receiver<()>) {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let tracker = tracker.clone();
                tokio::spawn(async move {
                    // Failures are already logged and recorded on the snapshot.
                    let _ = tracker.refresh().await;
                });
            }
            _ = &mut stop_rx => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::MapView;
    use crate::position::testing::{reading, Outcome, ScriptedProvider};
    use std::sync::Arc;
    use tokio::time::sleep;

    fn setup() -> (Arc<ScriptedProvider>, Tracker) {
        let provider = Arc::new(ScriptedProvider::new());
        let tracker = Tracker::new(provider.clone(), MapView::default());
        (provider, tracker)
    }

    #[tokio::test(start_paused = true)]
    async fn fetches_immediately_then_every_interval() {
        let (provider, tracker) = setup();
        let poller = Poller::start(tracker.clone(), Duration::from_secs(10));

        sleep(Duration::from_millis(1)).await;
        assert_eq!(provider.calls(), 1);
        assert!(tracker.snapshot().reading.is_some());

        sleep(Duration::from_secs(10)).await;
        assert_eq!(provider.calls(), 2);

        sleep(Duration::from_secs(10)).await;
        assert_eq!(provider.calls(), 3);

        poller.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_the_timer() {
        let (provider, tracker) = setup();
        let poller = Poller::start(tracker, Duration::from_secs(10));

        sleep(Duration::from_millis(1)).await;
        poller.stop().await;

        sleep(Duration::from_secs(60)).await;
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_in_flight_at_stop_still_applies() {
        let (provider, tracker) = setup();
        let gate = provider.push_gated(Outcome::Reading(reading(7.0, 8.0)));
        let poller = Poller::start(tracker.clone(), Duration::from_secs(10));

        sleep(Duration::from_millis(1)).await;
        assert_eq!(provider.calls(), 1);
        assert!(tracker.snapshot().loading);

        poller.stop().await;
        assert!(tracker.snapshot().reading.is_none());

        gate.notify_one();
        sleep(Duration::from_millis(1)).await;

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.reading, Some(reading(7.0, 8.0)));
        assert!(!snapshot.loading);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels_the_timer() {
        let (provider, tracker) = setup();
        let poller = Poller::start(tracker, Duration::from_secs(10));

        sleep(Duration::from_secs(15)).await;
        assert_eq!(provider.calls(), 2);

        drop(poller);
        sleep(Duration::from_secs(60)).await;
        assert_eq!(provider.calls(), 2);
    }
}
