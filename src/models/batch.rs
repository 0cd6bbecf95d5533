use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

const BATCH_CODE_LEN: usize = 6;
const BATCH_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl BatchStatus {
    /// Upcoming and ongoing batches count toward active metrics and
    /// available-seat totals.
    pub fn is_active(self) -> bool {
        matches!(self, BatchStatus::Upcoming | BatchStatus::Ongoing)
    }
}

/// One scheduled run (cohort) of a course, embedded by value in the parent
/// course document. A batch has no identity of its own beyond its position
/// in the parent's `batches` array and its human-facing `batchCode`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub batch_code: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub seats: u32,
    #[serde(default)]
    pub enrolled_students: u32,
    pub status: BatchStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBatchRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_seats")]
    pub seats: u32,
    pub status: BatchStatus,
    /// Generated when omitted.
    #[serde(default)]
    pub batch_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBatchRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub seats: u32,
    pub enrolled_students: u32,
    pub status: BatchStatus,
}

fn default_seats() -> u32 {
    30
}

/// 6 uppercase-alphanumeric characters, e.g. "K3QX7A". Intended-unique
/// within a course but not enforced.
pub fn generate_batch_code() -> String {
    let mut rng = rand::thread_rng();
    (0..BATCH_CODE_LEN)
        .map(|_| BATCH_CODE_CHARSET[rng.gen_range(0..BATCH_CODE_CHARSET.len())] as char)
        .collect()
}

/// Batch dates carry no meaningful time-of-day; they are stored normalized
/// to midnight UTC.
pub fn at_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
