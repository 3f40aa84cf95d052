use serde::{Deserialize, Serialize};

/// Where the season is, derived purely from the round counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonPhase {
    LeagueRounds { round: u32 },
    /// `stage` is 0-based within the cup.
    CupStages { cup_index: usize, stage: u32 },
    SeasonEnd,
}

impl SeasonPhase {
    /// League rounds come first, then every cup's stages in cup order.
    pub fn for_round(round: u32, league_rounds: u32, cup_stage_counts: &[u32]) -> Self {
        if round <= league_rounds {
            return SeasonPhase::LeagueRounds { round };
        }

        let mut offset = league_rounds;

        for (cup_index, stages) in cup_stage_counts.iter().enumerate() {
            if round <= offset + stages {
                return SeasonPhase::CupStages {
                    cup_index,
                    stage: round - offset - 1,
                };
            }

            offset += stages;
        }

        SeasonPhase::SeasonEnd
    }

    pub fn is_season_end(&self) -> bool {
        matches!(self, SeasonPhase::SeasonEnd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_cursor() {
        let cups = [3, 2];

        assert_eq!(SeasonPhase::for_round(0, 18, &cups), SeasonPhase::LeagueRounds { round: 0 });
        assert_eq!(SeasonPhase::for_round(18, 18, &cups), SeasonPhase::LeagueRounds { round: 18 });
        assert_eq!(
            SeasonPhase::for_round(19, 18, &cups),
            SeasonPhase::CupStages { cup_index: 0, stage: 0 }
        );
        assert_eq!(
            SeasonPhase::for_round(21, 18, &cups),
            SeasonPhase::CupStages { cup_index: 0, stage: 2 }
        );
        assert_eq!(
            SeasonPhase::for_round(23, 18, &cups),
            SeasonPhase::CupStages { cup_index: 1, stage: 1 }
        );
        assert_eq!(SeasonPhase::for_round(24, 18, &cups), SeasonPhase::SeasonEnd);
    }

    #[test]
    fn test_cup_without_stages_is_skipped() {
        assert_eq!(
            SeasonPhase::for_round(3, 2, &[0, 1]),
            SeasonPhase::CupStages { cup_index: 1, stage: 0 }
        );
    }
}
