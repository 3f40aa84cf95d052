use thiserror::Error;

/// A reference in the snapshot that does not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("club {0} not found")]
    ClubNotFound(u32),
    #[error("player {0} not found")]
    PlayerNotFound(u32),
    #[error("league {0} not found")]
    LeagueNotFound(u32),
    #[error("cup {0} not found")]
    CupNotFound(u32),
}
