use serde::{Deserialize, Serialize};

/// Tri-state like flag stored as a nullable boolean: NULL means the
/// user has expressed no opinion yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeStatus {
    #[default]
    Unknown,
    Liked,
    Disliked,
}

impl LikeStatus {
    pub fn as_db(&self) -> Option<bool> {
        match self {
            LikeStatus::Unknown => None,
            LikeStatus::Liked => Some(true),
            LikeStatus::Disliked => Some(false),
        }
    }

    pub fn from_db(value: Option<bool>) -> Self {
        match value {
            None => LikeStatus::Unknown,
            Some(true) => LikeStatus::Liked,
            Some(false) => LikeStatus::Disliked,
        }
    }
}
