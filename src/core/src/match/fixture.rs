use crate::r#match::MatchResult;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Fixture lifecycle; transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FixtureStatus {
    Scheduled,
    Locked,
    Playing,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: String,
    pub home_club_id: u32,
    pub away_club_id: u32,
    pub kickoff: NaiveDateTime,
    pub round: u32,
    status: FixtureStatus,
    result: Option<MatchResult>,
}

impl Fixture {
    pub fn new(id: String, home_club_id: u32, away_club_id: u32, kickoff: NaiveDateTime, round: u32) -> Self {
        Fixture {
            id,
            home_club_id,
            away_club_id,
            kickoff,
            round,
            status: FixtureStatus::Scheduled,
            result: None,
        }
    }

    pub fn status(&self) -> FixtureStatus {
        self.status
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.status == FixtureStatus::Finished
    }

    pub fn involves(&self, club_id: u32) -> bool {
        self.home_club_id == club_id || self.away_club_id == club_id
    }

    /// Moves to `next` if it is later in the lifecycle. Finishing goes
    /// through [`Fixture::finish`].
    pub fn advance(&mut self, next: FixtureStatus) -> bool {
        if next <= self.status || next == FixtureStatus::Finished {
            return false;
        }

        self.status = next;
        true
    }

    /// Locks the line-ups and starts play. True once the fixture is playing.
    pub fn kick_off(&mut self) -> bool {
        self.advance(FixtureStatus::Locked);
        self.advance(FixtureStatus::Playing);

        self.status == FixtureStatus::Playing
    }

    /// Stores the result once; a finished fixture is immutable.
    pub fn finish(&mut self, result: MatchResult) -> bool {
        if self.is_finished() {
            return false;
        }

        self.status = FixtureStatus::Finished;
        self.result = Some(result);
        true
    }

    pub fn winner(&self) -> Option<u32> {
        self.result.as_ref().and_then(|result| result.winner())
    }
}
