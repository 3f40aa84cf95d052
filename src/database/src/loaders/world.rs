use chrono::NaiveDate;
use serde::Deserialize;

const STATIC_WORLD_JSON: &str = include_str!("../data/world.json");

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseEntity {
    pub season_start: NaiveDate,
    pub leagues: Vec<LeagueEntity>,
    pub names: PeopleNamesEntity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueEntity {
    pub id: u32,
    pub name: String,
    pub clubs: Vec<ClubEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClubEntity {
    pub id: u32,
    pub name: String,
    pub reputation: u16,
    pub colors: ClubColorsEntity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClubColorsEntity {
    pub background: String,
    pub foreground: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeopleNamesEntity {
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
}

pub struct DatabaseLoader;

impl DatabaseLoader {
    pub fn load() -> Result<DatabaseEntity, serde_json::Error> {
        Self::from_json(STATIC_WORLD_JSON)
    }

    pub fn from_json(json: &str) -> Result<DatabaseEntity, serde_json::Error> {
        serde_json::from_str(json)
    }
}
