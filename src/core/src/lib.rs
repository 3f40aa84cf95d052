pub mod config;
pub use config::*;

pub mod simulator;
pub use simulator::*;

pub mod club;
pub mod cup;
pub mod league;
pub mod r#match;
pub mod transfers;
pub mod world;

pub mod shared;
pub mod utils;

// Re-export club items
pub use club::{
    // Club itself
    Club, ClubColors, ClubFinances, POWER_CAP_MAX, POWER_CAP_MIN,
    // Automated upkeep
    ClubAi, ClubUpkeepResult,
    // History
    MatchHistory, MatchHistoryItem,
    // Tactics
    CardModifiers, ClubTactics, Mentality, MentalityModifiers, PlayStyle, StyleModifiers,
    TacticalCard, CHEMISTRY_MAX_VALUE, MAX_EQUIPPED_CARDS, MENTALITY_MODIFIERS,
    PLAY_STYLE_MODIFIERS,
    // Player exports
    Player, PlayerBuilder, PlayerClubContract, PlayerPositionType, PlayerStatistics,
    FusionSkill, FusionSkillKind, Pentagon, PentagonAxis, PENTAGON_MAX_VALUE,
    PlayerBadges, ProfileBadge, SpecialBadge, TechnicalBadge,
    EvolutionOutcome, Participation, PlayerEvolutionCalculator, PlayerValueCalculator,
    FORM_WINDOW_SIZE, PLAYER_MAX_RATING, SATISFACTION_MAX_VALUE,
};

pub use cup::{BracketBuilder, Cup, CupStage};
pub use league::{League, LeagueTable, LeagueTableRow, ScheduleGenerator};
pub use transfers::{TransferError, TransferMarket};
pub use world::{
    LookupError, Notification, NotificationFeed, NotificationKind, Production, SeasonPhase,
    WorldState, WorldStatus,
};

pub use utils::*;
