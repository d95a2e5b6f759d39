//! Per-call crawl state
//!
//! A [`CrawlSession`] holds the records accumulated for one operation and the first
//! error raised while producing them. It is created by the coordinator for each call
//! and passed by reference through the extraction rules; nothing in it is shared.

use crate::VosDroitsError;

/// What a finished crawl produced
#[derive(Debug)]
pub enum CrawlOutcome<T> {
    /// At least one record; any error raised alongside them was suppressed
    Records(Vec<T>),
    /// No records and no error
    Empty,
    /// No records and an error
    Failed(VosDroitsError),
}

#[derive(Debug)]
pub struct CrawlSession<T> {
    records: Vec<T>,
    first_error: Option<VosDroitsError>,
}

impl<T> Default for CrawlSession<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CrawlSession<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            first_error: None,
        }
    }

    pub fn push(&mut self, record: T) {
        self.records.push(record);
    }

    /// Pushes `record` unless an already collected record matches `same`
    ///
    /// Returns whether the record was kept. The first occurrence always wins.
    pub fn push_unique_by<F>(&mut self, record: T, same: F) -> bool
    where
        F: Fn(&T, &T) -> bool,
    {
        if self.records.iter().any(|existing| same(existing, &record)) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Keeps the first error only
    pub fn record_error(&mut self, error: VosDroitsError) {
        if self.first_error.is_none() {
            self.first_error = Some(error);
        } else {
            tracing::debug!("Dropping secondary crawl error: {}", error);
        }
    }

    pub fn has_error(&self) -> bool {
        self.first_error.is_some()
    }

    /// Applies the result policy
    ///
    /// Records win over errors: once anything was collected, the error is only logged.
    pub fn finish(self) -> CrawlOutcome<T> {
        match (self.records.is_empty(), self.first_error) {
            (false, Some(error)) => {
                tracing::debug!(
                    "Returning {} partial records despite error: {}",
                    self.records.len(),
                    error
                );
                CrawlOutcome::Records(self.records)
            }
            (false, None) => CrawlOutcome::Records(self.records),
            (true, Some(error)) => CrawlOutcome::Failed(error),
            (true, None) => CrawlOutcome::Empty,
        }
    }
}
