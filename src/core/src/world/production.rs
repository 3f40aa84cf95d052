use crate::club::TacticalCard;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A tactical card being crafted for a club.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Production {
    pub id: u32,
    pub club_id: u32,
    pub card: TacticalCard,
    pub completes_at: NaiveDateTime,
}

impl Production {
    pub fn is_complete(&self, now: NaiveDateTime) -> bool {
        now >= self.completes_at
    }
}
