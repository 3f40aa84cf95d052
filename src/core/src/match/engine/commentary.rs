use crate::r#match::{MatchEvent, MatchEventKind, MatchSquad};

pub const COMMENTARY_EVENTS: u32 = 25;
/// Real-time playback window the commentary is spread across, in tenths of a second.
pub const PLAYBACK_TENTHS: u32 = 3600;
/// One line every 14.4 seconds.
pub const COMMENTARY_CADENCE_TENTHS: u32 = PLAYBACK_TENTHS / COMMENTARY_EVENTS;

const COMMENTARY_MINUTES: u32 = 90;

const COMMENTARY_LINES: [&str; 6] = [
    "Both sides probe for an opening",
    "Patient build-up through the middle",
    "A long ball is hoofed clear",
    "The crowd lifts the tempo",
    "Possession changes hands in midfield",
    "Instructions are barked from the touchline",
];

pub struct CommentaryGenerator;

impl CommentaryGenerator {
    /// Simulated minute of the `index`-th line: `floor(second / 360 × 90)`.
    pub fn minute_at(index: u32) -> u8 {
        (index * COMMENTARY_CADENCE_TENTHS * COMMENTARY_MINUTES / PLAYBACK_TENTHS) as u8
    }

    /// Narrative lines only; they carry no gameplay effect and draw no randomness.
    pub fn generate(home: &MatchSquad, away: &MatchSquad, events: &[MatchEvent]) -> Vec<MatchEvent> {
        (0..COMMENTARY_EVENTS)
            .map(|index| {
                let minute = Self::minute_at(index);

                let text = if index == 0 {
                    format!("Kick-off: {} vs {}", home.club_name, away.club_name)
                } else {
                    let (home_goals, away_goals) = Self::score_at(home.club_id, events, minute);

                    format!(
                        "{} ({} {}-{} {})",
                        COMMENTARY_LINES[index as usize % COMMENTARY_LINES.len()],
                        home.club_name,
                        home_goals,
                        away_goals,
                        away.club_name
                    )
                };

                MatchEvent::new(minute, None, MatchEventKind::Commentary { text })
            })
            .collect()
    }

    fn score_at(home_club_id: u32, events: &[MatchEvent], minute: u8) -> (u8, u8) {
        events
            .iter()
            .filter(|event| event.minute <= minute)
            .filter(|event| matches!(event.kind, MatchEventKind::Goal { .. }))
            .fold((0, 0), |(home, away), event| {
                if event.club_id == Some(home_club_id) {
                    (home + 1, away)
                } else {
                    (home, away + 1)
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cadence_maps_to_minutes() {
        assert_eq!(COMMENTARY_CADENCE_TENTHS, 144);
        assert_eq!(CommentaryGenerator::minute_at(0), 0);
        assert_eq!(CommentaryGenerator::minute_at(1), 3);
        assert_eq!(CommentaryGenerator::minute_at(5), 18);
        assert_eq!(CommentaryGenerator::minute_at(24), 86);
    }

    #[test]
    fn test_generates_fixed_count_with_running_score() {
        let home = MatchSquad::empty(1, "Home");
        let away = MatchSquad::empty(2, "Away");

        let events = vec![MatchEvent::new(
            10,
            Some(1),
            MatchEventKind::Goal { scorer_id: 5, assist_id: None },
        )];

        let commentary = CommentaryGenerator::generate(&home, &away, &events);

        assert_eq!(commentary.len(), 25);
        assert!(commentary.iter().all(|event| event.is_commentary()));
        assert!(commentary.windows(2).all(|w| w[0].minute <= w[1].minute));

        match &commentary[24].kind {
            MatchEventKind::Commentary { text } => assert!(text.contains("Home 1-0 Away")),
            _ => unreachable!(),
        }
    }
}
