use serde::{Deserialize, Serialize};

use super::SegmentId;

/// A segment definition, referenced by id from `FeatureSegment::segment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Segment {
    pub fn new(id: SegmentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
        }
    }
}
