use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{vocabulary_serde, Vocabulary};

/// `InProgress` is the only state a reception is created in; `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceptionStatus {
    InProgress,
    Closed,
}

impl Vocabulary for ReceptionStatus {
    const ALL: &'static [Self] = &[ReceptionStatus::InProgress, ReceptionStatus::Closed];

    fn as_str(&self) -> &'static str {
        match self {
            ReceptionStatus::InProgress => "in_progress",
            ReceptionStatus::Closed => "closed",
        }
    }

    /// Exact match only; these values are never case-normalised.
    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == raw)
    }
}

vocabulary_serde!(ReceptionStatus, "reception status");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reception {
    pub id: Uuid,
    pub pvz_id: Uuid,
    pub status: ReceptionStatus,
    pub date_time: DateTime<Utc>,
}
