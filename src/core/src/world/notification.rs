use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    MatchResult,
    RoundSummary,
    LeagueChampion,
    CupWinner,
    ProductionComplete,
    SafetyNet,
    Transfer,
    TacticsChange,
    SeasonEnd,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub date: NaiveDateTime,
    pub kind: NotificationKind,
    pub message: String,
}

/// Append-only feed, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationFeed {
    items: VecDeque<Notification>,
}

impl NotificationFeed {
    pub fn new() -> Self {
        NotificationFeed::default()
    }

    pub fn push(&mut self, date: NaiveDateTime, kind: NotificationKind, message: String) {
        self.items.push_front(Notification {
            date,
            kind,
            message,
        });
    }

    pub fn items(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.front()
    }

    pub fn of_kind(&self, kind: NotificationKind) -> impl Iterator<Item = &Notification> {
        self.items.iter().filter(move |item| item.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
