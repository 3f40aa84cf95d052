use crate::world::{LookupError, WorldState};
use crate::PlayerValueCalculator;
use log::debug;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("player {0} is not a free agent")]
    NotAFreeAgent(u32),
    #[error("club {club_id} cannot absorb rating {rating} (squad {squad_rating}, cap {power_cap})")]
    PowerCapExceeded {
        club_id: u32,
        rating: u16,
        squad_rating: u32,
        power_cap: u32,
    },
    #[error("player {player_id} is not on the roster of club {club_id}")]
    NotInRoster { club_id: u32, player_id: u32 },
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Free-agent signings and releases. Every signing is guarded by the club's
/// power cap.
pub struct TransferMarket;

impl TransferMarket {
    pub fn can_sign(world: &WorldState, club_id: u32, player_id: u32) -> Result<(), TransferError> {
        let club = world.club(club_id)?;
        let player = world.player(player_id)?;

        if !player.is_free_agent() || !world.free_agents.contains(&player_id) {
            return Err(TransferError::NotAFreeAgent(player_id));
        }

        let squad_rating = world.squad_rating(club_id);

        if !club.can_absorb(squad_rating, player.rating) {
            return Err(TransferError::PowerCapExceeded {
                club_id,
                rating: player.rating,
                squad_rating,
                power_cap: club.power_cap,
            });
        }

        Ok(())
    }

    /// Highest-rated free agent (lowest id on ties) the club can afford.
    pub fn best_affordable_free_agent(world: &WorldState, club_id: u32) -> Option<u32> {
        let club = world.club(club_id).ok()?;
        let squad_rating = world.squad_rating(club_id);

        world
            .free_agents
            .iter()
            .filter_map(|id| world.players.get(id))
            .filter(|player| club.can_absorb(squad_rating, player.rating))
            .max_by(|a, b| a.rating.cmp(&b.rating).then(b.id.cmp(&a.id)))
            .map(|player| player.id)
    }

    pub fn sign(world: &mut WorldState, club_id: u32, player_id: u32) -> Result<(), TransferError> {
        Self::can_sign(world, club_id, player_id)?;
        Self::assign(world, club_id, player_id)
    }

    /// Moves a free agent onto a roster without the power-cap check. Used by
    /// the safety net after it has raised the cap itself.
    pub fn assign(world: &mut WorldState, club_id: u32, player_id: u32) -> Result<(), TransferError> {
        world.club(club_id)?;

        let player = world.player_mut(player_id)?;

        if !player.is_free_agent() {
            return Err(TransferError::NotAFreeAgent(player_id));
        }

        let value = PlayerValueCalculator::calculate(player);
        player.contract.club_id = Some(club_id);
        player.contract.value = value;

        world.free_agents.retain(|id| *id != player_id);
        world.club_mut(club_id)?.add_player(player_id);

        debug!("transfer: player {} signed by club {} (value {})", player_id, club_id, value);

        Ok(())
    }

    pub fn release(world: &mut WorldState, club_id: u32, player_id: u32) -> Result<(), TransferError> {
        if !world.club_mut(club_id)?.remove_player(player_id) {
            return Err(TransferError::NotInRoster { club_id, player_id });
        }

        if let Ok(player) = world.player_mut(player_id) {
            player.contract.club_id = None;
        }

        if !world.free_agents.contains(&player_id) {
            world.free_agents.push(player_id);
        }

        debug!("transfer: player {} released by club {}", player_id, club_id);

        Ok(())
    }
}
