use crate::SimulationSettings;
use crate::r#match::Fixture;
use chrono::{Duration, NaiveDate, NaiveTime};

pub struct ScheduleGenerator;

impl ScheduleGenerator {
    /// Double round-robin via the circle method.
    ///
    /// `club_ids` must have an even length; the first club stays fixed and the
    /// rest rotate one place per round. Rounds `1..=n-1` are the first leg,
    /// rounds `n..=2(n-1)` replay them with home and away swapped. Round `r`
    /// kicks off on `first_date + (r - 1) × fixture_interval_days`.
    pub fn generate(
        league_id: u32,
        club_ids: &[u32],
        first_date: NaiveDate,
        settings: &SimulationSettings,
    ) -> Vec<Fixture> {
        let n = club_ids.len();

        if n < 2 {
            return Vec::new();
        }

        let legs = n as u32 - 1;
        let mut rotation = club_ids.to_vec();
        let mut first_leg: Vec<Vec<(u32, u32)>> = Vec::with_capacity(n - 1);

        for round in 0..legs {
            let pairings = (0..n / 2)
                .map(|index| {
                    let (home, away) = (rotation[index], rotation[n - 1 - index]);

                    // Alternate the fixed club so it does not host every round.
                    if index == 0 && round % 2 == 1 {
                        (away, home)
                    } else {
                        (home, away)
                    }
                })
                .collect();

            first_leg.push(pairings);
            rotation[1..].rotate_right(1);
        }

        let second_leg: Vec<Vec<(u32, u32)>> = first_leg
            .iter()
            .map(|pairings| pairings.iter().map(|&(home, away)| (away, home)).collect())
            .collect();

        first_leg
            .into_iter()
            .chain(second_leg)
            .enumerate()
            .flat_map(|(round_index, pairings)| {
                let round = round_index as u32 + 1;
                let date = first_date
                    + Duration::days(round_index as i64 * settings.fixture_interval_days as i64);

                pairings
                    .into_iter()
                    .enumerate()
                    .map(move |(index, (home, away))| {
                        let kickoff_time =
                            NaiveTime::from_hms_opt(settings.kickoff_hour(index), 0, 0)
                                .unwrap_or(NaiveTime::MIN);

                        Fixture::new(
                            format!("{}-{}-{}", league_id, round, index),
                            home,
                            away,
                            date.and_time(kickoff_time),
                            round,
                        )
                    })
            })
            .collect()
    }

    pub fn total_rounds(club_count: usize) -> u32 {
        if club_count < 2 {
            0
        } else {
            2 * (club_count as u32 - 1)
        }
    }
}
