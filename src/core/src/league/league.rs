use crate::SimulationSettings;
use crate::league::{LeagueTable, ScheduleGenerator};
use crate::r#match::{Fixture, MatchResult};
use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub id: u32,
    pub name: String,
    pub club_ids: Vec<u32>,
    pub table: LeagueTable,
    pub fixtures: Vec<Fixture>,
}

impl League {
    pub fn new(id: u32, name: String, club_ids: Vec<u32>) -> Self {
        let table = LeagueTable::new(&club_ids);

        League {
            id,
            name,
            club_ids,
            table,
            fixtures: Vec::new(),
        }
    }

    /// Fresh table and a full double round-robin starting at `first_date`.
    pub fn schedule_season(&mut self, first_date: NaiveDate, settings: &SimulationSettings) {
        self.table = LeagueTable::new(&self.club_ids);
        self.fixtures = ScheduleGenerator::generate(self.id, &self.club_ids, first_date, settings);

        info!(
            "📅 {}: {} fixtures over {} rounds",
            self.name,
            self.fixtures.len(),
            self.total_rounds()
        );
    }

    pub fn total_rounds(&self) -> u32 {
        ScheduleGenerator::total_rounds(self.club_ids.len())
    }

    pub fn round_fixtures(&self, round: u32) -> impl Iterator<Item = &Fixture> {
        self.fixtures.iter().filter(move |fixture| fixture.round == round)
    }

    pub fn fixture_mut(&mut self, fixture_id: &str) -> Option<&mut Fixture> {
        self.fixtures.iter_mut().find(|fixture| fixture.id == fixture_id)
    }

    pub fn kick_off(&mut self, fixture_id: &str) -> bool {
        self.fixture_mut(fixture_id)
            .map(|fixture| fixture.kick_off())
            .unwrap_or(false)
    }

    /// Stores the result on its fixture and updates the table. A fixture that
    /// is already finished is left untouched.
    pub fn record_result(&mut self, fixture_id: &str, result: MatchResult) -> bool {
        let Some(fixture) = self.fixture_mut(fixture_id) else {
            return false;
        };

        if !fixture.finish(result.clone()) {
            debug!("fixture {} already finished", fixture_id);
            return false;
        }

        self.table.update(&result);
        true
    }

    pub fn is_finished(&self) -> bool {
        !self.fixtures.is_empty() && self.fixtures.iter().all(|fixture| fixture.is_finished())
    }

    /// Table leader once every fixture is played.
    pub fn champion(&self) -> Option<u32> {
        if !self.is_finished() {
            return None;
        }

        self.table.leader()
    }
}
