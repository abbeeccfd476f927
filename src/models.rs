use jiff::civil::Date;
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::{AppError, AppResult};

/// A value together with the id storage assigned to it. Serializes flat.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stored<T> {
    pub id: i32,
    #[serde(flatten)]
    pub data: T,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "dataNascimento", default)]
    pub birth_date: Option<Date>,
    #[serde(rename = "nacionalidade", default)]
    pub nationality: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "anoLancamento", default)]
    pub release_year: i32,
    #[serde(rename = "genero", default)]
    pub genre: String,
    #[serde(rename = "duracaoMinutos", default)]
    pub duration_minutes: i32,
    #[serde(rename = "sinopse", default)]
    pub synopsis: String,
    #[serde(rename = "imagemUrl", default)]
    pub poster_url: String,
}

/// Links a movie to an actor. Neither id is checked for existence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieActor {
    #[serde(rename = "filmeId", default)]
    pub movie_id: i32,
    #[serde(rename = "atorId", default)]
    pub actor_id: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "nota", default)]
    pub score: f64,
    #[serde(rename = "popularidade", default)]
    pub popularity: i32,
    #[serde(rename = "qtdeVotos", default)]
    pub vote_count: i32,
    #[serde(rename = "filmeId", default)]
    pub movie_id: i32,
}

/// Optional filters of the combined movie search.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieSearch {
    #[serde(rename = "titulo")]
    pub title: Option<String>,
    #[serde(rename = "genero")]
    pub genre: Option<String>,
    #[serde(rename = "ano", default, deserialize_with = "empty_as_none")]
    pub year: Option<i32>,
}

/// Query strings send `ano=` as an empty string; treat it like a missing key.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Years at or below this are ignored by the combined search.
pub const SEARCH_YEAR_FLOOR: i32 = 1800;

impl MovieSearch {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref().filter(|g| !g.is_empty())
    }

    pub fn year(&self) -> Option<i32> {
        self.year.filter(|y| *y > SEARCH_YEAR_FLOOR)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RatingExtreme {
    HighestScore,
    LowestScore,
    MostPopular,
    LeastPopular,
    MostVoted,
    LeastVoted,
}

pub trait Validate {
    fn validate(&self) -> AppResult<()>;
}

impl Validate for Actor {
    fn validate(&self) -> AppResult<()> {
        let mut errors = Vec::new();
        required(&mut errors, "nome", &self.name, 100);
        max_len(&mut errors, "nacionalidade", &self.nationality, 50);
        finish(errors)
    }
}

impl Validate for Movie {
    fn validate(&self) -> AppResult<()> {
        let mut errors = Vec::new();
        required(&mut errors, "titulo", &self.title, 200);
        required(&mut errors, "genero", &self.genre, 50);
        max_len(&mut errors, "sinopse", &self.synopsis, 500);
        required(&mut errors, "imagemUrl", &self.poster_url, 150);
        finish(errors)
    }
}

impl Validate for MovieActor {
    fn validate(&self) -> AppResult<()> {
        Ok(())
    }
}

impl Validate for Rating {
    fn validate(&self) -> AppResult<()> {
        Ok(())
    }
}

fn required(errors: &mut Vec<String>, field: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.push(format!("{field} is required"));
    } else {
        max_len(errors, field, value, max);
    }
}

fn max_len(errors: &mut Vec<String>, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(format!("{field} must be at most {max} characters"));
    }
}

fn finish(errors: Vec<String>) -> AppResult<()> {
    if errors.is_empty() { Ok(()) } else { Err(AppError::Validation(errors)) }
}
