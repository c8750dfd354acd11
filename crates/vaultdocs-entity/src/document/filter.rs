//! List filters for document records.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::doc_type::DocumentType;
use super::model::DocumentRecord;
use super::status::DocumentStatus;

/// Optional criteria for listing records. Absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFilter {
    /// Record has at least one file under this type.
    pub doc_type: Option<DocumentType>,
    /// Record is in this review status.
    pub status: Option<DocumentStatus>,
    /// Record was submitted on this UTC day.
    pub date: Option<NaiveDate>,
    /// Case-insensitive substring of the submitter name or email.
    pub submitter: Option<String>,
}

impl DocumentFilter {
    /// Submission window `[start, end)` for the date criterion.
    pub fn submitted_between(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.date.map(day_bounds)
    }

    /// Trimmed, non-empty submitter needle.
    pub fn submitter_needle(&self) -> Option<&str> {
        self.submitter
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Evaluate the filter against a record.
    pub fn matches(&self, record: &DocumentRecord) -> bool {
        if let Some(doc_type) = self.doc_type {
            if !record.has_type(doc_type) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        if let Some((start, end)) = self.submitted_between() {
            if record.submitted_at < start || record.submitted_at >= end {
                return false;
            }
        }
        if let Some(needle) = self.submitter_needle() {
            let needle = needle.to_lowercase();
            if !record.name.to_lowercase().contains(&needle)
                && !record.email.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// UTC bounds `[start of day, start of next day)` for a calendar date.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}

/// Order records newest first, breaking timestamp ties by id.
pub fn sort_newest_first(records: &mut [DocumentRecord]) {
    records.sort_by(|a, b| {
        b.submitted_at
            .cmp(&a.submitted_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
