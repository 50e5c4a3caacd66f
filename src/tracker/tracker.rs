use chrono::Utc;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use tokio::sync::watch;

use super::error::TrackerError;
use super::types::Snapshot;
use crate::display::MapView;
use crate::position::{PositionError, PositionProvider, Reading};

/// Message shown for every kind of fetch failure.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching ISS data";

#[derive(Debug)]
struct Shared {
    snapshot: Snapshot,
    map: MapView,
    in_flight: usize,
    next_seq: u64,
    applied_seq: u64,
}

impl Shared {
    fn begin(&mut self) -> u64 {
        self.next_seq += 1;
        self.in_flight += 1;
        self.snapshot.loading = true;
        self.next_seq
    }

    fn end(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.snapshot.loading = self.in_flight > 0;
    }
}

/// Holds the most recent reading and applies fetch outcomes to it.
#[derive(Clone)]
pub struct Tracker {
    provider: Arc<dyn PositionProvider>,
    shared: Arc<StdMutex<Shared>>,
    revision_tx: Arc<watch::Sender<u64>>,
}

impl Tracker {
    pub fn new(provider: Arc<dyn PositionProvider>, map: MapView) -> Self {
        let (revision_tx, _) = watch::channel(0);
        Self {
            provider,
            shared: Arc::new(StdMutex::new(Shared {
                snapshot: Snapshot::default(),
                map,
                in_flight: 0,
                next_seq: 0,
                applied_seq: 0,
            })),
            revision_tx: Arc::new(revision_tx),
        }
    }

    pub fn provider(&self) -> &Arc<dyn PositionProvider> {
        &self.provider
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot.clone()
    }

    /// Notified with the new revision whenever a fetch outcome is applied.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision_tx.subscribe()
    }

    /// Fetches the current reading, regardless of other fetches in flight.
    pub async fn refresh(&self) -> Result<Reading, TrackerError> {
        let seq = self.lock().begin();
        self.fetch(seq).await
    }

    /// Like [`Tracker::refresh`], but refuses to start while another fetch
    /// is in flight.
    pub async fn manual_refresh(&self) -> Result<Reading, TrackerError> {
        let seq = {
            let mut shared = self.lock();
            if shared.in_flight > 0 {
                return Err(TrackerError::Busy);
            }
            shared.begin()
        };
        self.fetch(seq).await
    }

    async fn fetch(&self, seq: u64) -> Result<Reading, TrackerError> {
        let mut guard = InFlight {
            tracker: self,
            armed: true,
        };
        let outcome = self.provider.current().await;
        guard.armed = false;
        self.apply(seq, outcome)
    }

    fn apply(
        &self,
        seq: u64,
        outcome: Result<Reading, PositionError>,
    ) -> Result<Reading, TrackerError> {
        let mut shared = self.lock();
        shared.end();

        if seq < shared.applied_seq {
            log::debug!(
                "Discarding stale fetch #{} (already applied #{})",
                seq,
                shared.applied_seq
            );
            return outcome.map_err(TrackerError::from);
        }
        shared.applied_seq = seq;

        let result = match outcome {
            Ok(reading) => {
                let frame = shared.map.render(reading.latitude, reading.longitude);
                shared.snapshot.reading = Some(reading.clone());
                shared.snapshot.error = None;
                shared.snapshot.updated_at = Some(Utc::now());
                shared.snapshot.map = Some(frame);
                Ok(reading)
            }
            Err(e) => {
                log::error!("Error fetching ISS data: {}", e);
                shared.snapshot.error = Some(FETCH_ERROR_MESSAGE.to_string());
                Err(TrackerError::Fetch(e))
            }
        };

        shared.snapshot.revision += 1;
        self.revision_tx.send_replace(shared.snapshot.revision);

        result
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases the in-flight slot if a fetch future is dropped before it
/// completes.
struct InFlight<'a> {
    tracker: &'a Tracker,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.tracker.lock().end();
        }
    }
}
