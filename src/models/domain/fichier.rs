use serde::{Deserialize, Serialize};

/// A file attached to a seance. `data` holds the document payload verbatim;
/// `image` holds its compressed thumbnail. Immutable after upload.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Fichier {
    pub id: i64,
    pub name: String,
    #[serde(with = "serde_bytes")]
    pub data: Vec<u8>,
    #[serde(with = "serde_bytes")]
    pub image: Vec<u8>,
    pub seance_id: i64,
}

impl Fichier {
    pub fn new(id: i64, name: &str, data: Vec<u8>, compressed_image: Vec<u8>, seance_id: i64) -> Self {
        Fichier {
            id,
            name: name.to_string(),
            data,
            image: compressed_image,
            seance_id,
        }
    }
}
