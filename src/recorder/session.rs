use super::types::{ActionData, Record};
use uuid::Uuid;

/// One start-to-stop tracking interval.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub started_at_ms: i64,
    records: Vec<Record>,
}

impl Session {
    pub fn new(started_at_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at_ms,
            records: Vec::new(),
        }
    }

    /// Append a record, keeping timestamps non-decreasing.
    ///
    /// A wall clock stepping backwards is clamped to the previous timestamp.
    pub fn add_record(&mut self, timestamp_ms: i64, data: ActionData) {
        let timestamp_ms = match self.records.last() {
            Some(last) => timestamp_ms.max(last.timestamp_ms),
            None => timestamp_ms,
        };
        self.records.push(Record::new(timestamp_ms, data));
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
