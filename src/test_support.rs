// Test doubles shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::client::InterviewApi;
use crate::form::{Field, Level};
use crate::models::{InterviewRequest, Interviewer, Slot};

pub fn slot(id: &str, date: Option<&str>, start: &str, end: &str, interviewer: Option<&str>) -> Slot {
    Slot {
        id: id.to_string(),
        date: date.map(String::from),
        start_time: start.to_string(),
        end_time: end.to_string(),
        interviewer: interviewer.map(|name| Interviewer {
            name: Some(name.to_string()),
        }),
    }
}

/// In-memory backend. Calls are recorded before any gate is awaited, so a
/// test can hold a response back and observe the page mid-request.
#[derive(Default)]
pub struct FakeApi {
    slots: HashMap<(Field, Level), Vec<Slot>>,
    fail_availability: bool,
    fail_schedule: bool,
    availability_gates: Mutex<HashMap<(Field, Level), oneshot::Receiver<()>>>,
    schedule_gate: Mutex<Option<oneshot::Receiver<()>>>,
    availability_calls: Mutex<Vec<(Field, Level)>>,
    schedule_calls: Mutex<Vec<InterviewRequest>>,
}

impl FakeApi {
    pub fn with_slots(mut self, field: Field, level: Level, slots: Vec<Slot>) -> Self {
        self.slots.insert((field, level), slots);
        self
    }

    pub fn failing_availability(mut self) -> Self {
        self.fail_availability = true;
        self
    }

    pub fn failing_schedule(mut self) -> Self {
        self.fail_schedule = true;
        self
    }

    /// The next availability call for this pair waits until the sender fires.
    pub fn gate_availability(&self, field: Field, level: Level) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.availability_gates
            .lock()
            .unwrap()
            .insert((field, level), rx);
        tx
    }

    pub fn gate_schedule(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.schedule_gate.lock().unwrap() = Some(rx);
        tx
    }

    pub fn availability_calls(&self) -> Vec<(Field, Level)> {
        self.availability_calls.lock().unwrap().clone()
    }

    pub fn schedule_calls(&self) -> Vec<InterviewRequest> {
        self.schedule_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InterviewApi for FakeApi {
    async fn availability(&self, field: Field, level: Level) -> Result<Vec<Slot>> {
        self.availability_calls.lock().unwrap().push((field, level));
        let gate = self
            .availability_gates
            .lock()
            .unwrap()
            .remove(&(field, level));
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        if self.fail_availability {
            bail!("availability service unavailable");
        }
        Ok(self.slots.get(&(field, level)).cloned().unwrap_or_default())
    }

    async fn schedule_interview(&self, request: &InterviewRequest) -> Result<()> {
        self.schedule_calls.lock().unwrap().push(request.clone());
        let gate = self.schedule_gate.lock().unwrap().take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        if self.fail_schedule {
            bail!("interviews endpoint returned 500");
        }
        Ok(())
    }
}
