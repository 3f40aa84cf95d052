use serde::{Deserialize, Serialize};

pub const MAX_EQUIPPED_CARDS: usize = 3;
pub const CHEMISTRY_MAX_VALUE: u8 = 100;

/// Multipliers a play style contributes to each phase of play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleModifiers {
    pub attack: f32,
    pub midfield: f32,
    pub defense: f32,
    pub stamina_drain: f32,
    /// Fraction removed from the opponent's event intensity while this side
    /// is out of possession.
    pub tick_reduction: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayStyle {
    Balanced,
    Possession,
    Pressing,
    DirectPlay,
    Counter,
    ParkTheBus,
}

pub const PLAY_STYLE_MODIFIERS: [(PlayStyle, StyleModifiers); 6] = [
    (
        PlayStyle::Balanced,
        StyleModifiers { attack: 1.0, midfield: 1.0, defense: 1.0, stamina_drain: 2.0, tick_reduction: 0.0 },
    ),
    (
        PlayStyle::Possession,
        StyleModifiers { attack: 1.0, midfield: 1.15, defense: 0.95, stamina_drain: 2.0, tick_reduction: 0.05 },
    ),
    (
        PlayStyle::Pressing,
        StyleModifiers { attack: 1.05, midfield: 1.1, defense: 0.95, stamina_drain: 3.5, tick_reduction: 0.0 },
    ),
    (
        PlayStyle::DirectPlay,
        StyleModifiers { attack: 1.12, midfield: 0.9, defense: 0.95, stamina_drain: 2.5, tick_reduction: 0.0 },
    ),
    (
        PlayStyle::Counter,
        StyleModifiers { attack: 1.08, midfield: 0.9, defense: 1.05, stamina_drain: 2.0, tick_reduction: 0.1 },
    ),
    (
        PlayStyle::ParkTheBus,
        StyleModifiers { attack: 0.85, midfield: 0.9, defense: 1.2, stamina_drain: 1.5, tick_reduction: 0.2 },
    ),
];

impl PlayStyle {
    pub fn modifiers(&self) -> &'static StyleModifiers {
        let (_, modifiers) = PLAY_STYLE_MODIFIERS
            .iter()
            .find(|(style, _)| style == self)
            .unwrap_or(&PLAY_STYLE_MODIFIERS[0]);

        modifiers
    }

    /// Next step towards a deeper block; `ParkTheBus` is the end of the chain.
    pub fn more_defensive(&self) -> PlayStyle {
        match self {
            PlayStyle::Pressing | PlayStyle::Possession => PlayStyle::Balanced,
            PlayStyle::DirectPlay | PlayStyle::Balanced => PlayStyle::Counter,
            PlayStyle::Counter | PlayStyle::ParkTheBus => PlayStyle::ParkTheBus,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MentalityModifiers {
    pub attack: f32,
    pub defense: f32,
    pub late_game: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mentality {
    VeryDefensive,
    Defensive,
    Balanced,
    Attacking,
    VeryAttacking,
}

pub const MENTALITY_MODIFIERS: [(Mentality, MentalityModifiers); 5] = [
    (Mentality::VeryDefensive, MentalityModifiers { attack: 0.9, defense: 1.1, late_game: 0.95 }),
    (Mentality::Defensive, MentalityModifiers { attack: 0.95, defense: 1.05, late_game: 0.98 }),
    (Mentality::Balanced, MentalityModifiers { attack: 1.0, defense: 1.0, late_game: 1.0 }),
    (Mentality::Attacking, MentalityModifiers { attack: 1.05, defense: 0.95, late_game: 1.05 }),
    (Mentality::VeryAttacking, MentalityModifiers { attack: 1.1, defense: 0.9, late_game: 1.1 }),
];

impl Mentality {
    pub fn modifiers(&self) -> &'static MentalityModifiers {
        let (_, modifiers) = MENTALITY_MODIFIERS
            .iter()
            .find(|(mentality, _)| mentality == self)
            .unwrap_or(&MENTALITY_MODIFIERS[2]);

        modifiers
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardModifiers {
    pub attack: f32,
    pub midfield: f32,
    pub defense: f32,
    pub late_game: f32,
    pub chaos: f32,
}

impl CardModifiers {
    const NEUTRAL: CardModifiers = CardModifiers {
        attack: 1.0,
        midfield: 1.0,
        defense: 1.0,
        late_game: 1.0,
        chaos: 0.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TacticalCard {
    MidfieldMaestro,
    IronWall,
    LethalFinisher,
    SecondWind,
    WildCard,
}

impl TacticalCard {
    pub fn modifiers(&self) -> CardModifiers {
        match self {
            TacticalCard::MidfieldMaestro => CardModifiers { midfield: 1.08, ..CardModifiers::NEUTRAL },
            TacticalCard::IronWall => CardModifiers { defense: 1.08, ..CardModifiers::NEUTRAL },
            TacticalCard::LethalFinisher => CardModifiers { attack: 1.08, ..CardModifiers::NEUTRAL },
            TacticalCard::SecondWind => CardModifiers { late_game: 1.1, ..CardModifiers::NEUTRAL },
            TacticalCard::WildCard => CardModifiers { chaos: 8.0, ..CardModifiers::NEUTRAL },
        }
    }

    /// Days a crafting queue needs to produce this card.
    pub fn production_days(&self) -> u32 {
        match self {
            TacticalCard::WildCard => 2,
            TacticalCard::SecondWind => 3,
            _ => 5,
        }
    }
}

/// A club's tactical profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubTactics {
    pub play_style: PlayStyle,
    pub mentality: Mentality,
    pub aggressiveness: u8,
    pub line_position: u8,
    pub chemistry: u8,
    cards: Vec<TacticalCard>,
}

impl Default for ClubTactics {
    fn default() -> Self {
        ClubTactics::new(PlayStyle::Balanced, Mentality::Balanced)
    }
}

impl ClubTactics {
    pub fn new(play_style: PlayStyle, mentality: Mentality) -> Self {
        ClubTactics {
            play_style,
            mentality,
            aggressiveness: 50,
            line_position: 50,
            chemistry: 70,
            cards: Vec::with_capacity(MAX_EQUIPPED_CARDS),
        }
    }

    pub fn with_sliders(mut self, aggressiveness: u8, line_position: u8) -> Self {
        self.aggressiveness = aggressiveness.min(100);
        self.line_position = line_position.min(100);
        self
    }

    pub fn with_chemistry(mut self, chemistry: u8) -> Self {
        self.chemistry = chemistry.min(CHEMISTRY_MAX_VALUE);
        self
    }

    pub fn cards(&self) -> &[TacticalCard] {
        &self.cards
    }

    /// Equips a card if a slot is free. Returns whether it was equipped.
    pub fn equip(&mut self, card: TacticalCard) -> bool {
        if self.cards.len() >= MAX_EQUIPPED_CARDS {
            return false;
        }

        self.cards.push(card);
        true
    }

    pub fn unequip(&mut self, card: TacticalCard) -> bool {
        match self.cards.iter().position(|c| *c == card) {
            Some(index) => {
                self.cards.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn change_chemistry(&mut self, delta: i16) {
        self.chemistry = (self.chemistry as i16 + delta).clamp(0, CHEMISTRY_MAX_VALUE as i16) as u8;
    }

    /// Chemistry mapped onto `0.5..=1.0`.
    pub fn chemistry_factor(&self) -> f32 {
        0.5 + self.chemistry as f32 / 200.0
    }

    /// Product of one modifier across all equipped cards.
    pub fn card_modifier(&self, pick: impl Fn(&CardModifiers) -> f32) -> f32 {
        self.cards.iter().map(|card| pick(&card.modifiers())).product()
    }

    pub fn card_chaos(&self) -> f32 {
        self.cards.iter().map(|card| card.modifiers().chaos).sum()
    }

    /// A high line pushes attack up and opens the back.
    pub fn line_attack_factor(&self) -> f32 {
        1.0 + (self.line_position as f32 - 50.0) / 500.0
    }

    pub fn line_defense_factor(&self) -> f32 {
        1.0 - (self.line_position as f32 - 50.0) / 500.0
    }

    pub fn chaos_ceiling(&self) -> f32 {
        10.0 + self.aggressiveness as f32 / 10.0 + self.card_chaos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_style_has_table_entry() {
        for style in [
            PlayStyle::Balanced,
            PlayStyle::Possession,
            PlayStyle::Pressing,
            PlayStyle::DirectPlay,
            PlayStyle::Counter,
            PlayStyle::ParkTheBus,
        ] {
            assert!(PLAY_STYLE_MODIFIERS.iter().any(|(s, _)| *s == style));
            assert!(style.modifiers().midfield > 0.0);
        }
    }

    #[test]
    fn test_more_defensive_chain_ends() {
        let mut style = PlayStyle::Pressing;

        for _ in 0..5 {
            style = style.more_defensive();
        }

        assert_eq!(style, PlayStyle::ParkTheBus);
        assert_eq!(style.more_defensive(), PlayStyle::ParkTheBus);
    }

    #[test]
    fn test_equip_is_capped_at_three() {
        let mut tactics = ClubTactics::default();

        assert!(tactics.equip(TacticalCard::IronWall));
        assert!(tactics.equip(TacticalCard::MidfieldMaestro));
        assert!(tactics.equip(TacticalCard::LethalFinisher));
        assert!(!tactics.equip(TacticalCard::WildCard));
        assert_eq!(tactics.cards().len(), 3);

        assert!(tactics.unequip(TacticalCard::IronWall));
        assert!(!tactics.unequip(TacticalCard::IronWall));
    }

    #[test]
    fn test_card_modifier_product() {
        let mut tactics = ClubTactics::default();
        assert_eq!(tactics.card_modifier(|m| m.midfield), 1.0);

        tactics.equip(TacticalCard::MidfieldMaestro);
        tactics.equip(TacticalCard::IronWall);

        assert!((tactics.card_modifier(|m| m.midfield) - 1.08).abs() < 1e-6);
        assert!((tactics.card_modifier(|m| m.defense) - 1.08).abs() < 1e-6);
    }

    #[test]
    fn test_chemistry_is_clamped() {
        let mut tactics = ClubTactics::default().with_chemistry(95);

        tactics.change_chemistry(20);
        assert_eq!(tactics.chemistry, 100);
        assert_eq!(tactics.chemistry_factor(), 1.0);

        tactics.change_chemistry(-200);
        assert_eq!(tactics.chemistry, 0);
    }
}
