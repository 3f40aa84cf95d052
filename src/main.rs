use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use database::{DatabaseGenerator, DatabaseLoader};
use env_logger::Env;
use log::info;
use matchday_core::r#match::{MatchEngine, MatchEventKind, MatchResult, MatchSquad};
use matchday_core::utils::{SimulationRng, TimeEstimation};
use matchday_core::{FootballSimulator, SimulationSettings, WorldState};
use std::env;
use std::fs;

#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const SEED_ENV: &str = "MATCHDAY_SEED";

#[derive(Parser)]
#[command(name = "matchday")]
#[command(about = "Football club management season simulator", long_about = None)]
struct Cli {
    /// Seed for the simulation; falls back to MATCHDAY_SEED, then entropy
    #[arg(short, long)]
    seed: Option<u64>,

    /// Settings JSON file; missing fields take their defaults
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a season day by day
    Season {
        /// Days to simulate (default: the configured season length)
        #[arg(long)]
        days: Option<u32>,
        /// Club controlled by the player; it receives match notifications
        #[arg(long)]
        human_club: Option<u32>,
    },
    /// Play a single match between two clubs
    Match {
        /// Home club id
        home: u32,
        /// Away club id
        away: u32,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let settings = load_settings(cli.config.as_deref())?;
    let mut rng = create_rng(cli.seed)?;

    let (database, estimated) = TimeEstimation::estimate(DatabaseLoader::load);
    let database = database.wrap_err("embedded world data is malformed")?;

    info!("database loaded: {} ms", estimated);

    let world = DatabaseGenerator::generate(&database, settings, &mut rng).map_err(|e| eyre!(e))?;

    match cli.command {
        Commands::Season { days, human_club } => run_season(world, days, human_club, &mut rng),
        Commands::Match { home, away } => run_match(&world, home, away, &mut rng),
    }
}

fn load_settings(path: Option<&str>) -> Result<SimulationSettings> {
    let Some(path) = path else {
        return Ok(SimulationSettings::default());
    };

    let json = fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path))?;

    serde_json::from_str(&json).wrap_err_with(|| format!("invalid settings in {}", path))
}

fn create_rng(seed: Option<u64>) -> Result<SimulationRng> {
    let seed = match seed {
        Some(seed) => Some(seed),
        None => match env::var(SEED_ENV) {
            Ok(value) => Some(
                value
                    .parse::<u64>()
                    .wrap_err_with(|| format!("{} must be an unsigned integer", SEED_ENV))?,
            ),
            Err(_) => None,
        },
    };

    Ok(match seed {
        Some(seed) => {
            info!("seed: {}", seed);
            SimulationRng::from_seed(seed)
        }
        None => SimulationRng::from_entropy(),
    })
}

fn run_season(
    mut world: WorldState,
    days: Option<u32>,
    human_club: Option<u32>,
    rng: &mut SimulationRng,
) -> Result<()> {
    if let Some(club_id) = human_club {
        world.club(club_id)?;
        world.human_club_id = Some(club_id);
    }

    world.start_season();

    let days = days.unwrap_or(world.settings.season_days);

    for _ in 0..days {
        let (next, result) = FootballSimulator::simulate(&world, rng);
        world = next;

        if result.season_finished {
            break;
        }
    }

    print_tables(&world);
    print_cups(&world);
    print_notifications(&world);

    Ok(())
}

fn run_match(world: &WorldState, home: u32, away: u32, rng: &mut SimulationRng) -> Result<()> {
    let home_squad = MatchSquad::from_club(world.club(home)?, &world.roster(home));
    let away_squad = MatchSquad::from_club(world.club(away)?, &world.roster(away));

    let result = MatchEngine::play(&home_squad, &away_squad, rng);

    print_match(world, &home_squad, &away_squad, &result);

    Ok(())
}

fn club_name(world: &WorldState, club_id: u32) -> String {
    world
        .club(club_id)
        .map(|club| club.name.clone())
        .unwrap_or_else(|_| format!("#{}", club_id))
}

fn player_name(world: &WorldState, player_id: u32) -> String {
    world
        .player(player_id)
        .map(|player| player.full_name.short())
        .unwrap_or_else(|_| format!("#{}", player_id))
}

fn print_tables(world: &WorldState) {
    for league in &world.leagues {
        println!();
        println!("{}", league.name);
        println!(
            "{:>3} {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4}",
            "#", "Club", "P", "W", "D", "L", "GF", "GA", "Pts"
        );

        for (index, row) in league.table.rows.iter().enumerate() {
            println!(
                "{:>3} {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4}",
                index + 1,
                club_name(world, row.club_id),
                row.played,
                row.win,
                row.draw,
                row.lost,
                row.goal_scored,
                row.goal_concerned,
                row.points
            );
        }
    }
}

fn print_cups(world: &WorldState) {
    for cup in &world.cups {
        let winner = cup
            .winner
            .map(|club_id| club_name(world, club_id))
            .unwrap_or_else(|| "undecided".to_string());

        println!();
        println!("{}: {}", cup.name, winner);
    }
}

fn print_notifications(world: &WorldState) {
    println!();
    println!("Notifications ({})", world.notifications.len());

    for notification in world.notifications.items() {
        println!(
            "{} [{:?}] {}",
            notification.date.date(),
            notification.kind,
            notification.message
        );
    }
}

fn print_match(world: &WorldState, home: &MatchSquad, away: &MatchSquad, result: &MatchResult) {
    println!(
        "{} {} - {} {}",
        home.club_name, result.score.home, result.score.away, away.club_name
    );
    println!(
        "possession {}% - {}%, shots {} - {}",
        result.stats.home_possession,
        result.stats.away_possession,
        result.stats.home_shots,
        result.stats.away_shots
    );
    println!();

    for event in &result.events {
        let line = match &event.kind {
            MatchEventKind::Goal { scorer_id, assist_id } => match assist_id {
                Some(assist_id) => format!(
                    "GOAL {} (assist {})",
                    player_name(world, *scorer_id),
                    player_name(world, *assist_id)
                ),
                None => format!("GOAL {}", player_name(world, *scorer_id)),
            },
            MatchEventKind::Chance { player_id, on_target } => {
                let target = if *on_target { "saved" } else { "off target" };
                format!("chance for {} ({})", player_name(world, *player_id), target)
            }
            MatchEventKind::Foul { player_id } => format!("foul by {}", player_name(world, *player_id)),
            MatchEventKind::YellowCard { player_id } => {
                format!("yellow card: {}", player_name(world, *player_id))
            }
            MatchEventKind::RedCard { player_id } => {
                format!("red card: {}", player_name(world, *player_id))
            }
            MatchEventKind::Injury { player_id } => {
                format!("injury: {}", player_name(world, *player_id))
            }
            MatchEventKind::Penalties => "decided on penalties".to_string(),
            MatchEventKind::Commentary { text } => text.clone(),
        };

        println!("{:>2}' {}", event.minute, line);
    }
}
