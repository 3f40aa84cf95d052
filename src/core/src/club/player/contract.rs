use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerClubContract {
    pub club_id: Option<u32>,
    pub value: u32,
}

impl PlayerClubContract {
    pub fn new(club_id: u32, value: u32) -> Self {
        PlayerClubContract {
            club_id: Some(club_id),
            value,
        }
    }

    pub fn free_agent(value: u32) -> Self {
        PlayerClubContract {
            club_id: None,
            value,
        }
    }

    pub fn is_free_agent(&self) -> bool {
        self.club_id.is_none()
    }
}
