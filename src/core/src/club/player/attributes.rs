use crate::club::PlayerPositionType;
use serde::{Deserialize, Serialize};

pub const PENTAGON_MAX_VALUE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PentagonAxis {
    Power,
    Agility,
    Intelligence,
    Tactics,
    Technique,
}

impl PentagonAxis {
    pub const ALL: [PentagonAxis; 5] = [
        PentagonAxis::Power,
        PentagonAxis::Agility,
        PentagonAxis::Intelligence,
        PentagonAxis::Tactics,
        PentagonAxis::Technique,
    ];
}

/// Five-axis attribute vector, each axis within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pentagon {
    pub power: u8,
    pub agility: u8,
    pub intelligence: u8,
    pub tactics: u8,
    pub technique: u8,
}

impl Pentagon {
    pub fn new(power: u8, agility: u8, intelligence: u8, tactics: u8, technique: u8) -> Self {
        Pentagon {
            power: power.min(PENTAGON_MAX_VALUE),
            agility: agility.min(PENTAGON_MAX_VALUE),
            intelligence: intelligence.min(PENTAGON_MAX_VALUE),
            tactics: tactics.min(PENTAGON_MAX_VALUE),
            technique: technique.min(PENTAGON_MAX_VALUE),
        }
    }

    pub fn uniform(value: u8) -> Self {
        Self::new(value, value, value, value, value)
    }

    pub fn get(&self, axis: PentagonAxis) -> u8 {
        match axis {
            PentagonAxis::Power => self.power,
            PentagonAxis::Agility => self.agility,
            PentagonAxis::Intelligence => self.intelligence,
            PentagonAxis::Tactics => self.tactics,
            PentagonAxis::Technique => self.technique,
        }
    }

    fn axis_mut(&mut self, axis: PentagonAxis) -> &mut u8 {
        match axis {
            PentagonAxis::Power => &mut self.power,
            PentagonAxis::Agility => &mut self.agility,
            PentagonAxis::Intelligence => &mut self.intelligence,
            PentagonAxis::Tactics => &mut self.tactics,
            PentagonAxis::Technique => &mut self.technique,
        }
    }

    pub fn increase(&mut self, axis: PentagonAxis) {
        let value = self.axis_mut(axis);
        *value = value.saturating_add(1).min(PENTAGON_MAX_VALUE);
    }

    pub fn decrease(&mut self, axis: PentagonAxis) {
        let value = self.axis_mut(axis);
        *value = value.saturating_sub(1);
    }

    pub fn total(&self) -> u16 {
        PentagonAxis::ALL.iter().map(|&axis| self.get(axis) as u16).sum()
    }

    /// Role-dependent composite skills, each the sum of two axes.
    pub fn fusion_skills(&self, position: PlayerPositionType) -> [FusionSkill; 2] {
        let fuse = |kind, a: PentagonAxis, b: PentagonAxis| FusionSkill {
            kind,
            value: self.get(a) as u16 + self.get(b) as u16,
        };

        match position {
            PlayerPositionType::Goalkeeper => [
                fuse(FusionSkillKind::Reflexes, PentagonAxis::Agility, PentagonAxis::Intelligence),
                fuse(FusionSkillKind::Command, PentagonAxis::Tactics, PentagonAxis::Power),
            ],
            PlayerPositionType::Defender => [
                fuse(FusionSkillKind::Tackling, PentagonAxis::Power, PentagonAxis::Tactics),
                fuse(FusionSkillKind::Interception, PentagonAxis::Intelligence, PentagonAxis::Agility),
            ],
            PlayerPositionType::Midfielder => [
                fuse(FusionSkillKind::Playmaking, PentagonAxis::Intelligence, PentagonAxis::Technique),
                fuse(FusionSkillKind::Engine, PentagonAxis::Power, PentagonAxis::Agility),
            ],
            PlayerPositionType::Forward => [
                fuse(FusionSkillKind::Finishing, PentagonAxis::Technique, PentagonAxis::Power),
                fuse(FusionSkillKind::Dribbling, PentagonAxis::Agility, PentagonAxis::Technique),
            ],
        }
    }
}

impl Default for Pentagon {
    fn default() -> Self {
        Self::uniform(50)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FusionSkillKind {
    Reflexes,
    Command,
    Tackling,
    Interception,
    Playmaking,
    Engine,
    Finishing,
    Dribbling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusionSkill {
    pub kind: FusionSkillKind,
    pub value: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_axes() {
        let pentagon = Pentagon::new(120, 10, 100, 0, 255);

        assert_eq!(pentagon.power, 100);
        assert_eq!(pentagon.technique, 100);
        assert_eq!(pentagon.tactics, 0);
    }

    #[test]
    fn test_increase_and_decrease_stay_in_bounds() {
        let mut pentagon = Pentagon::new(100, 0, 50, 50, 50);

        pentagon.increase(PentagonAxis::Power);
        pentagon.decrease(PentagonAxis::Agility);

        assert_eq!(pentagon.power, 100);
        assert_eq!(pentagon.agility, 0);

        pentagon.increase(PentagonAxis::Intelligence);
        assert_eq!(pentagon.intelligence, 51);
    }

    #[test]
    fn test_fusion_skills_depend_on_role() {
        let pentagon = Pentagon::new(80, 60, 40, 20, 90);

        let forward = pentagon.fusion_skills(PlayerPositionType::Forward);
        assert_eq!(forward[0].kind, FusionSkillKind::Finishing);
        assert_eq!(forward[0].value, 170);

        let defender = pentagon.fusion_skills(PlayerPositionType::Defender);
        assert_eq!(defender[0].kind, FusionSkillKind::Tackling);
        assert_eq!(defender[0].value, 100);
    }
}
