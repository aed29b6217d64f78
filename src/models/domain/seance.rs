use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course session with an image banner. The image field always holds
/// zlib-compressed bytes; decompression happens at read time for transport.
/// A seance has exactly one owning teacher and is immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Seance {
    pub id: i64,
    pub link: String,
    pub title: String,
    pub level: String,
    pub module: String,
    pub date: DateTime<Utc>,
    pub description: String,
    #[serde(with = "serde_bytes")]
    pub image: Vec<u8>,
    pub teacher_id: i64,
    pub teacher_email: String,
}

impl Seance {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        link: &str,
        title: &str,
        level: &str,
        module: &str,
        description: &str,
        compressed_image: Vec<u8>,
        teacher_id: i64,
        teacher_email: &str,
    ) -> Self {
        Seance {
            id,
            link: link.to_string(),
            title: title.to_string(),
            level: level.to_string(),
            module: module.to_string(),
            date: Utc::now(),
            description: description.to_string(),
            image: compressed_image,
            teacher_id,
            teacher_email: teacher_email.to_string(),
        }
    }
}
