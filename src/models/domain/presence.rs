use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A student check-in to a seance. The level is copied from the seance at
/// creation time, not re-derived on read.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Presence {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub level: String,
    pub seance_id: i64,
    pub student_id: i64,
}

impl Presence {
    pub fn new(id: i64, date: DateTime<Utc>, level: &str, seance_id: i64, student_id: i64) -> Self {
        Presence {
            id,
            date,
            level: level.to_string(),
            seance_id,
            student_id,
        }
    }
}
