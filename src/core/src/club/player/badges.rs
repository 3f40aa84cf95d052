use serde::{Deserialize, Serialize};

pub const TECHNICAL_BADGE_MULTIPLIER: f32 = 1.05;
pub const POSITIVE_PROFILE_MULTIPLIER: f32 = 1.10;
pub const NEGATIVE_PROFILE_MULTIPLIER: f32 = 0.90;
pub const SPECIAL_BADGE_MULTIPLIER: f32 = 1.20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TechnicalBadge {
    Playmaker,
    Finisher,
    Wall,
    Sweeper,
    Dribbler,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileBadge {
    Leader,
    Professional,
    Lazy,
    HotHead,
}

impl ProfileBadge {
    pub fn is_positive(&self) -> bool {
        matches!(self, ProfileBadge::Leader | ProfileBadge::Professional)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialBadge {
    Prodigy,
    Legend,
}

/// Up to three trait tags: one technical, one profile, one special.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBadges {
    pub technical: Option<TechnicalBadge>,
    pub profile: Option<ProfileBadge>,
    pub special: Option<SpecialBadge>,
}

impl PlayerBadges {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.technical.is_some() as usize
            + self.profile.is_some() as usize
            + self.special.is_some() as usize
    }

    /// Evolution multipliers in application order: technical, profile, special.
    pub fn evolution_multipliers(&self) -> Vec<f32> {
        let mut multipliers = Vec::with_capacity(3);

        if self.technical.is_some() {
            multipliers.push(TECHNICAL_BADGE_MULTIPLIER);
        }

        if let Some(profile) = self.profile {
            multipliers.push(if profile.is_positive() {
                POSITIVE_PROFILE_MULTIPLIER
            } else {
                NEGATIVE_PROFILE_MULTIPLIER
            });
        }

        if self.special.is_some() {
            multipliers.push(SPECIAL_BADGE_MULTIPLIER);
        }

        multipliers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipliers_follow_badge_order() {
        let badges = PlayerBadges {
            technical: Some(TechnicalBadge::Finisher),
            profile: Some(ProfileBadge::Lazy),
            special: Some(SpecialBadge::Prodigy),
        };

        assert_eq!(badges.count(), 3);
        assert_eq!(
            badges.evolution_multipliers(),
            vec![
                TECHNICAL_BADGE_MULTIPLIER,
                NEGATIVE_PROFILE_MULTIPLIER,
                SPECIAL_BADGE_MULTIPLIER
            ]
        );
    }

    #[test]
    fn test_no_badges_no_multipliers() {
        assert!(PlayerBadges::none().evolution_multipliers().is_empty());
    }
}
