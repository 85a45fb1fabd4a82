use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// TMDB returns bare image paths; this prefix makes poster URLs absolute
const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// OMDB fills absent fields with a literal "N/A" string
const OMDB_ABSENT: &str = "N/A";

/// One movie in a search or trending result, as returned to the client
///
/// Absent optional fields serialize as explicit `null` so clients never have
/// to probe for key presence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    /// Provider-native identifier, opaque to callers
    pub id: String,
    pub title: String,
    pub release_date: Option<String>,
    pub poster_url: Option<String>,
    pub rating: Option<f32>,
    pub overview: Option<String>,
}

/// A crew member and the role they held on the production
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrewCredit {
    pub name: String,
    pub role: String,
}

/// A cast member
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastCredit {
    pub name: String,
}

/// A related video clip (trailer, teaser); only TMDB supplies these
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Full movie record returned by the detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: String,
    pub title: String,
    pub release_date: Option<String>,
    pub poster_url: Option<String>,
    pub rating: Option<f32>,
    pub overview: Option<String>,
    /// Age certification, where the provider carries one
    pub rated: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub genres: Vec<String>,
    pub crew: Vec<CrewCredit>,
    pub cast: Vec<CastCredit>,
    pub countries: Vec<String>,
    pub languages: Vec<String>,
    /// Score keyed by rating source ("Internet Movie Database", "TMDB", ...)
    pub ratings: HashMap<String, String>,
    pub box_office: Option<String>,
    pub production: Vec<String>,
    pub videos: Vec<Video>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Envelope for TMDB search and trending lists
#[derive(Debug, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

/// One entry of a TMDB results array
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl From<TmdbMovie> for MovieSummary {
    fn from(movie: TmdbMovie) -> Self {
        MovieSummary {
            id: movie.id.to_string(),
            title: movie.title,
            release_date: movie.release_date.filter(|d| !d.is_empty()),
            poster_url: tmdb_poster_url(movie.poster_path),
            rating: movie.vote_average,
            overview: movie.overview.filter(|o| !o.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCompany {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCountry {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbLanguage {
    #[serde(default)]
    pub english_name: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCrewMember {
    pub name: String,
    pub job: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbVideos {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

/// TMDB movie detail envelope, with credits and videos appended in-call
#[derive(Debug, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub production_companies: Vec<TmdbCompany>,
    #[serde(default)]
    pub production_countries: Vec<TmdbCountry>,
    #[serde(default)]
    pub spoken_languages: Vec<TmdbLanguage>,
    #[serde(default)]
    pub revenue: Option<i64>,
    #[serde(default)]
    pub credits: Option<TmdbCredits>,
    #[serde(default)]
    pub videos: Option<TmdbVideos>,
}

/// Crew jobs worth surfacing; everything else (grips, editors, ...) is noise
/// for a catalog view
const TMDB_CREW_JOBS: [&str; 4] = ["Director", "Writer", "Screenplay", "Producer"];

/// TMDB credit lists run to hundreds of names; only the top of the bill is kept
const TMDB_CAST_LIMIT: usize = 20;

impl From<TmdbMovieDetails> for MovieDetails {
    fn from(details: TmdbMovieDetails) -> Self {
        let credits = details.credits.unwrap_or_default();

        let crew = credits
            .crew
            .into_iter()
            .filter(|member| TMDB_CREW_JOBS.contains(&member.job.as_str()))
            .map(|member| CrewCredit {
                name: member.name,
                role: member.job,
            })
            .collect();

        let cast = credits
            .cast
            .into_iter()
            .take(TMDB_CAST_LIMIT)
            .map(|member| CastCredit { name: member.name })
            .collect();

        let mut ratings = HashMap::new();
        if let Some(average) = details.vote_average {
            ratings.insert("TMDB".to_string(), format!("{:.1}/10", average));
        }

        MovieDetails {
            id: details.id.to_string(),
            title: details.title,
            release_date: details.release_date.filter(|d| !d.is_empty()),
            poster_url: tmdb_poster_url(details.poster_path),
            rating: details.vote_average,
            overview: details.overview.filter(|o| !o.is_empty()),
            rated: None,
            runtime_minutes: details.runtime.filter(|r| *r > 0),
            genres: details.genres.into_iter().map(|g| g.name).collect(),
            crew,
            cast,
            countries: details
                .production_countries
                .into_iter()
                .map(|c| c.name)
                .collect(),
            languages: details
                .spoken_languages
                .into_iter()
                .map(|l| l.english_name.unwrap_or(l.name))
                .collect(),
            ratings,
            box_office: details.revenue.filter(|r| *r > 0).map(|r| r.to_string()),
            production: details
                .production_companies
                .into_iter()
                .map(|c| c.name)
                .collect(),
            videos: details
                .videos
                .unwrap_or_default()
                .results
                .into_iter()
                .map(|v| Video {
                    key: v.key,
                    site: v.site,
                    kind: v.kind,
                })
                .collect(),
        }
    }
}

fn tmdb_poster_url(path: Option<String>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{}{}", TMDB_IMAGE_BASE, p))
}

// ============================================================================
// OMDB API Types
// ============================================================================

/// OMDB search envelope; failures come back as HTTP 200 with `Response: "False"`
#[derive(Debug, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    pub search: Vec<OmdbMovie>,
    #[serde(rename = "Response", default)]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbSearchResponse {
    pub fn is_failure(&self) -> bool {
        self.response.eq_ignore_ascii_case("false")
    }
}

/// One entry of an OMDB `Search` array
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbMovie {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
}

impl From<OmdbMovie> for MovieSummary {
    fn from(movie: OmdbMovie) -> Self {
        MovieSummary {
            id: movie.imdb_id,
            title: movie.title,
            release_date: omdb_field(movie.year),
            poster_url: omdb_field(movie.poster),
            // OMDB search results carry neither score nor plot
            rating: None,
            overview: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OmdbRating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// OMDB movie detail envelope, same in-body failure flag as search
#[derive(Debug, Deserialize)]
pub struct OmdbMovieDetails {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Rated", default)]
    pub rated: Option<String>,
    #[serde(rename = "Released", default)]
    pub released: Option<String>,
    #[serde(rename = "Runtime", default)]
    pub runtime: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "Director", default)]
    pub director: Option<String>,
    #[serde(rename = "Writer", default)]
    pub writer: Option<String>,
    #[serde(rename = "Actors", default)]
    pub actors: Option<String>,
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    #[serde(rename = "Language", default)]
    pub language: Option<String>,
    #[serde(rename = "Country", default)]
    pub country: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<OmdbRating>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(rename = "BoxOffice", default)]
    pub box_office: Option<String>,
    #[serde(rename = "Production", default)]
    pub production: Option<String>,
    #[serde(rename = "Response", default)]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbMovieDetails {
    pub fn is_failure(&self) -> bool {
        self.response.eq_ignore_ascii_case("false")
    }
}

impl From<OmdbMovieDetails> for MovieDetails {
    fn from(details: OmdbMovieDetails) -> Self {
        let mut crew: Vec<CrewCredit> = Vec::new();
        for name in split_omdb_list(details.director) {
            crew.push(CrewCredit {
                name,
                role: "Director".to_string(),
            });
        }
        for name in split_omdb_list(details.writer) {
            crew.push(CrewCredit {
                name,
                role: "Writer".to_string(),
            });
        }

        let ratings = details
            .ratings
            .into_iter()
            .map(|r| (r.source, r.value))
            .collect();

        MovieDetails {
            id: details.imdb_id,
            title: details.title,
            release_date: omdb_field(details.released).or(omdb_field(details.year)),
            poster_url: omdb_field(details.poster),
            rating: omdb_field(details.imdb_rating).and_then(|r| r.parse().ok()),
            overview: omdb_field(details.plot),
            rated: omdb_field(details.rated),
            runtime_minutes: parse_omdb_runtime(details.runtime),
            genres: split_omdb_list(details.genre),
            crew,
            cast: split_omdb_list(details.actors)
                .into_iter()
                .map(|name| CastCredit { name })
                .collect(),
            countries: split_omdb_list(details.country),
            languages: split_omdb_list(details.language),
            ratings,
            box_office: omdb_field(details.box_office),
            production: split_omdb_list(details.production),
            // OMDB has no video sub-resource
            videos: Vec::new(),
        }
    }
}

/// Collapses OMDB's "N/A" sentinel and empty strings to a real absence
fn omdb_field(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != OMDB_ABSENT)
}

/// Splits OMDB's comma-joined list fields ("Action, Sci-Fi") preserving order
fn split_omdb_list(value: Option<String>) -> Vec<String> {
    omdb_field(value)
        .map(|v| {
            v.split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Parses OMDB's "136 min" runtime strings
fn parse_omdb_runtime(value: Option<String>) -> Option<u32> {
    omdb_field(value).and_then(|r| r.split_whitespace().next()?.parse().ok())
}
