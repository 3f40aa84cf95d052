use crate::generators::PlayerGenerator;
use crate::{ClubEntity, DatabaseEntity, LeagueEntity};
use log::info;
use matchday_core::utils::SimulationRng;
use matchday_core::{
    Club, ClubColors, ClubTactics, League, Mentality, PlayStyle, PlayerPositionType,
    SimulationSettings, WorldState,
};

const SQUAD_COMPOSITION: [(PlayerPositionType, usize); 4] = [
    (PlayerPositionType::Goalkeeper, 2),
    (PlayerPositionType::Defender, 6),
    (PlayerPositionType::Midfielder, 6),
    (PlayerPositionType::Forward, 6),
];

const FREE_AGENT_COUNT: usize = 40;
const FREE_AGENT_RATING_MIN: u32 = 250;
const FREE_AGENT_RATING_MAX: u32 = 550;

/// Headroom above the generated squad rating every club starts with.
const POWER_CAP_HEADROOM: u32 = 600;

const PLAY_STYLES: [PlayStyle; 6] = [
    PlayStyle::Balanced,
    PlayStyle::Possession,
    PlayStyle::Pressing,
    PlayStyle::DirectPlay,
    PlayStyle::Counter,
    PlayStyle::ParkTheBus,
];

const MENTALITIES: [Mentality; 5] = [
    Mentality::VeryDefensive,
    Mentality::Defensive,
    Mentality::Balanced,
    Mentality::Attacking,
    Mentality::VeryAttacking,
];

pub struct DatabaseGenerator;

impl DatabaseGenerator {
    pub fn generate(
        data: &DatabaseEntity,
        settings: SimulationSettings,
        rng: &mut SimulationRng,
    ) -> Result<WorldState, String> {
        let mut world = WorldState::new(data.season_start, settings);
        let mut player_generator = PlayerGenerator::with_people_names(&data.names);

        for league in &data.leagues {
            Self::generate_league(&mut world, league, &mut player_generator, rng)?;
        }

        Self::generate_free_agents(&mut world, &mut player_generator, rng)?;

        info!(
            "🌍 world generated: {} leagues, {} clubs, {} players, {} free agents",
            world.leagues.len(),
            world.clubs.len(),
            world.players.len(),
            world.free_agents.len()
        );

        Ok(world)
    }

    fn generate_league(
        world: &mut WorldState,
        league: &LeagueEntity,
        player_generator: &mut PlayerGenerator,
        rng: &mut SimulationRng,
    ) -> Result<(), String> {
        if league.clubs.len() % 2 != 0 {
            return Err(format!(
                "league {} has an odd number of clubs ({})",
                league.id,
                league.clubs.len()
            ));
        }

        let club_ids = league.clubs.iter().map(|club| club.id).collect();

        for club in &league.clubs {
            if world.clubs.contains_key(&club.id) {
                return Err(format!("duplicate club id {}", club.id));
            }

            Self::generate_club(world, league.id, club, player_generator, rng)?;
        }

        world
            .leagues
            .push(League::new(league.id, league.name.clone(), club_ids));

        Ok(())
    }

    fn generate_club(
        world: &mut WorldState,
        league_id: u32,
        entity: &ClubEntity,
        player_generator: &mut PlayerGenerator,
        rng: &mut SimulationRng,
    ) -> Result<(), String> {
        let mut club = Club::new(
            entity.id,
            entity.name.clone(),
            league_id,
            Self::generate_tactics(rng),
            0,
        );

        club.colors = ClubColors {
            background: entity.colors.background.clone(),
            foreground: entity.colors.foreground.clone(),
        };

        let mut squad_rating = 0;

        for (position, count) in SQUAD_COMPOSITION {
            for _ in 0..count {
                let rating = PlayerGenerator::rating_for_reputation(entity.reputation, rng);
                let player = player_generator.generate(position, rating, Some(club.id), rng)?;

                squad_rating += player.rating as u32;
                club.add_player(player.id);
                world.players.insert(player.id, player);
            }
        }

        club.set_power_cap(squad_rating + POWER_CAP_HEADROOM);

        world.clubs.insert(club.id, club);

        Ok(())
    }

    fn generate_free_agents(
        world: &mut WorldState,
        player_generator: &mut PlayerGenerator,
        rng: &mut SimulationRng,
    ) -> Result<(), String> {
        for index in 0..FREE_AGENT_COUNT {
            let (position, _) = SQUAD_COMPOSITION[index % SQUAD_COMPOSITION.len()];
            let rating = rng.range_u32(FREE_AGENT_RATING_MIN, FREE_AGENT_RATING_MAX) as u16;

            let player = player_generator.generate(position, rating, None, rng)?;

            world.free_agents.push(player.id);
            world.players.insert(player.id, player);
        }

        Ok(())
    }

    fn generate_tactics(rng: &mut SimulationRng) -> ClubTactics {
        let play_style = PLAY_STYLES[rng.index(PLAY_STYLES.len())];
        let mentality = MENTALITIES[rng.index(MENTALITIES.len())];

        ClubTactics::new(play_style, mentality)
            .with_sliders(rng.range_u32(30, 70) as u8, rng.range_u32(30, 70) as u8)
            .with_chemistry(rng.range_u32(60, 80) as u8)
    }
}
