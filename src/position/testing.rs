use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use super::error::PositionError;
use super::provider::PositionProvider;
use super::types::Reading;

pub fn reading(latitude: f64, longitude: f64) -> Reading {
    Reading {
        latitude,
        longitude,
        altitude: Some(408.123),
        velocity: Some(27600.456),
        visibility: Some("daylight".to_string()),
        timestamp: 1_700_000_000,
    }
}

pub enum Outcome {
    Reading(Reading),
    Status(u16),
    Malformed,
}

struct Step {
    gate: Option<Arc<Notify>>,
    outcome: Outcome,
}

/// Provider that answers from a queue of scripted outcomes. Once the queue
/// is empty, it keeps answering with the fallback reading.
pub struct ScriptedProvider {
    steps: Mutex<VecDeque<Step>>,
    fallback: Reading,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            steps: Mutex::new(VecDeque::new()),
            fallback: reading(1.0, 2.0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn push(&self, outcome: Outcome) -> &Self {
        self.steps.lock().unwrap().push_back(Step {
            gate: None,
            outcome,
        });
        self
    }

    /// Queues an outcome that is only returned after the gate is notified.
    pub fn push_gated(&self, outcome: Outcome) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.steps.lock().unwrap().push_back(Step {
            gate: Some(gate.clone()),
            outcome,
        });
        gate
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn next(&self) -> Outcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(step) => {
                if let Some(gate) = step.gate {
                    gate.notified().await;
                }
                step.outcome
            }
            None => Outcome::Reading(self.fallback.clone()),
        }
    }
}

#[async_trait]
impl PositionProvider for ScriptedProvider {
    async fn current(&self) -> Result<Reading, PositionError> {
        match self.next().await {
            Outcome::Reading(reading) => Ok(reading),
            Outcome::Status(code) => Err(PositionError::Status(code)),
            Outcome::Malformed => Err(PositionError::Decode("expected value".into())),
        }
    }

    async fn raw(&self) -> Result<Value, PositionError> {
        let reading = self.current().await?;
        Ok(serde_json::to_value(reading)?)
    }
}
