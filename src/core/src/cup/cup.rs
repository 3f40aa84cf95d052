use crate::config::CupSettings;
use crate::cup::BracketBuilder;
use crate::r#match::{Fixture, MatchResult};
use crate::utils::SimulationRng;
use chrono::NaiveDateTime;
use log::{debug, info};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CupStage {
    pub index: u32,
    pub fixtures: Vec<Fixture>,
    pub byes: Vec<u32>,
}

impl CupStage {
    pub fn is_finished(&self) -> bool {
        self.fixtures.iter().all(|fixture| fixture.is_finished())
    }

    /// Fixture winners in fixture order, then clubs that had a bye.
    pub fn winners(&self) -> Vec<u32> {
        self.fixtures
            .iter()
            .filter_map(|fixture| fixture.winner())
            .chain(self.byes.iter().copied())
            .collect()
    }
}

/// Single-elimination cup. Stages are created lazily, one at a time, from the
/// winners of the previous stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cup {
    pub id: u32,
    pub name: String,
    pub qualifying_positions: (usize, usize),
    pub pool: Vec<u32>,
    pub stages: Vec<CupStage>,
    pub winner: Option<u32>,
}

impl Cup {
    pub fn new(settings: &CupSettings) -> Self {
        Cup {
            id: settings.id,
            name: settings.name.clone(),
            qualifying_positions: settings.qualifying_positions,
            pool: Vec::new(),
            stages: Vec::new(),
            winner: None,
        }
    }

    pub fn reset(&mut self) {
        self.pool.clear();
        self.stages.clear();
        self.winner = None;
    }

    pub fn is_seeded(&self) -> bool {
        !self.pool.is_empty()
    }

    /// Shuffles `entrants` into the first-stage order. Seeding happens once.
    pub fn seed(&mut self, entrants: Vec<u32>, rng: &mut SimulationRng) -> bool {
        if self.is_seeded() {
            return false;
        }

        self.pool = BracketBuilder::seed(entrants, rng);

        if self.pool.len() == 1 {
            self.winner = self.pool.first().copied();
        }

        info!("🏆 {} seeded with {} clubs", self.name, self.pool.len());
        true
    }

    pub fn total_stages(&self) -> u32 {
        BracketBuilder::stage_count(self.pool.len())
    }

    pub fn stage(&self, index: u32) -> Option<&CupStage> {
        self.stages.get(index as usize)
    }

    /// Entrants of stage `index`, once they are known.
    pub fn entrants(&self, index: u32) -> Option<Vec<u32>> {
        if index == 0 {
            return self.is_seeded().then(|| self.pool.clone());
        }

        self.stage(index - 1)
            .filter(|previous| previous.is_finished())
            .map(|previous| previous.winners())
    }

    /// Builds stage `index` the first time it is reached. Returns whether the
    /// stage exists afterwards.
    pub fn ensure_stage(&mut self, index: u32, kickoff: NaiveDateTime) -> bool {
        if (index as usize) < self.stages.len() {
            return true;
        }

        if index as usize != self.stages.len() || index >= self.total_stages() {
            return false;
        }

        let Some(entrants) = self.entrants(index) else {
            return false;
        };

        let pairing = BracketBuilder::pair(&entrants);

        let fixtures = pairing
            .pairs
            .iter()
            .enumerate()
            .map(|(fixture_index, &(home, away))| {
                Fixture::new(
                    format!("cup{}-{}-{}", self.id, index + 1, fixture_index),
                    home,
                    away,
                    kickoff,
                    index + 1,
                )
            })
            .collect::<Vec<Fixture>>();

        debug!(
            "{} stage {}: {} fixtures, bye {:?}",
            self.name,
            index + 1,
            fixtures.len(),
            pairing.bye
        );

        self.stages.push(CupStage {
            index,
            fixtures,
            byes: pairing.bye.into_iter().collect(),
        });

        true
    }

    pub fn fixture_mut(&mut self, stage_index: u32, fixture_id: &str) -> Option<&mut Fixture> {
        self.stages
            .get_mut(stage_index as usize)?
            .fixtures
            .iter_mut()
            .find(|fixture| fixture.id == fixture_id)
    }

    pub fn kick_off(&mut self, stage_index: u32, fixture_id: &str) -> bool {
        self.fixture_mut(stage_index, fixture_id)
            .map(|fixture| fixture.kick_off())
            .unwrap_or(false)
    }

    /// Records a knockout result; a draw is settled on penalties first.
    pub fn record_result(
        &mut self,
        stage_index: u32,
        fixture_id: &str,
        mut result: MatchResult,
        rng: &mut SimulationRng,
    ) -> bool {
        let Some(stage) = self.stages.get_mut(stage_index as usize) else {
            return false;
        };

        let Some(fixture) = stage.fixtures.iter_mut().find(|f| f.id == fixture_id) else {
            return false;
        };

        if fixture.is_finished() {
            return false;
        }

        BracketBuilder::resolve_penalties(&mut result, rng);
        fixture.finish(result)
    }

    /// Sets the winner once the final stage is complete.
    pub fn crown(&mut self) -> Option<u32> {
        if self.winner.is_some() {
            return self.winner;
        }

        let final_stage = self.stage(self.total_stages().checked_sub(1)?)?;

        if !final_stage.is_finished() {
            return None;
        }

        self.winner = final_stage.winners().first().copied();
        self.winner
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }
}
