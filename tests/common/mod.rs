//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use caredesk::adapters::api::PatientSource;
use caredesk::domain::{PatientDraft, PatientId, PatientPatch, PatientRecord, Result};
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Remote source backed by a fixed list, paged like the real API
///
/// Every fetch suspends at least once, either yielding to the scheduler or
/// waiting on the gate when one is set.
pub struct InMemorySource {
    records: Vec<PatientRecord>,
    calls: Mutex<Vec<u32>>,
    gate: Option<Arc<Notify>>,
}

impl InMemorySource {
    pub fn new(records: Vec<PatientRecord>) -> Self {
        Self {
            records,
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Records with ids "1"..="count"
    pub fn numbered(count: usize) -> Self {
        Self::new(
            (1..=count)
                .map(|n| remote_record(&n.to_string(), &format!("Remote patient {n}")))
                .collect(),
        )
    }

    /// Hold every fetch until `gate` is notified
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Pages requested so far
    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PatientSource for InMemorySource {
    async fn fetch_page(&self, page: u32, limit: usize) -> Result<Vec<PatientRecord>> {
        self.calls.lock().unwrap().push(page);

        match &self.gate {
            Some(gate) => gate.notified().await,
            None => tokio::task::yield_now().await,
        }

        let start = (page as usize - 1) * limit;
        let end = (start + limit).min(self.records.len());
        Ok(self
            .records
            .get(start..end)
            .map(<[PatientRecord]>::to_vec)
            .unwrap_or_default())
    }

    fn endpoint(&self) -> &str {
        "memory://patients"
    }
}

pub fn remote_record(id: &str, name: &str) -> PatientRecord {
    PatientRecord::synthesize(
        PatientId::new(id).unwrap(),
        PatientPatch::default()
            .name(name)
            .description("Seeded remote patient")
            .website("https://remote.example.com")
            .created_at("2023-03-01T09:30:00.000Z"),
    )
}

/// A draft that passes validation, with generated name and notes
pub fn valid_draft() -> PatientDraft {
    let name: String = Name().fake();
    let notes: String = Sentence(3..8).fake();
    PatientDraft {
        name,
        description: format!("Clinical notes: {notes}"),
        website: "https://patient.example.com".to_string(),
        avatar: String::new(),
    }
}
