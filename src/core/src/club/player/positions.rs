use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayerPositionType {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl PlayerPositionType {
    pub fn get_short_name(&self) -> &'static str {
        match self {
            PlayerPositionType::Goalkeeper => "GK",
            PlayerPositionType::Defender => "DF",
            PlayerPositionType::Midfielder => "MF",
            PlayerPositionType::Forward => "FW",
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        *self == PlayerPositionType::Goalkeeper
    }
}
