use super::{
    CastMember, Credits, CrewMember, ExternalIds, Genre, Images, Keywords, ProductionCompany,
    Videos, movie::parse_date,
};
use crate::mapper::{Describe, TypeDescriptor};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TvSeries {
    pub id: i64,
    pub name: String,
    pub original_name: String,
    pub original_language: String,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub status: Option<String>,
    pub kind: Option<String>,
    pub homepage: Option<String>,
    pub first_air_date: Option<String>,
    pub last_air_date: Option<String>,
    pub in_production: bool,
    pub number_of_seasons: i32,
    pub number_of_episodes: i32,
    pub episode_run_time: Vec<i32>,
    pub origin_country: Vec<String>,
    pub languages: Vec<String>,
    pub popularity: f64,
    pub vote_average: f64,
    pub vote_count: i32,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub created_by: Vec<Creator>,
    pub genres: Vec<Genre>,
    pub networks: Vec<ProductionCompany>,
    pub production_companies: Vec<ProductionCompany>,
    pub seasons: Vec<Season>,

    // Appended sub-resources
    pub credits: Option<Credits>,
    pub images: Option<Images>,
    pub keywords: Option<Keywords>,
    pub videos: Option<Videos>,
    pub external_ids: Option<ExternalIds>,
}

impl TvSeries {
    #[must_use]
    pub fn first_aired_on(&self) -> Option<NaiveDate> {
        parse_date(self.first_air_date.as_deref())
    }

    /// Season by number; 0 holds specials
    #[must_use]
    pub fn season(&self, number: i32) -> Option<&Season> {
        self.seasons.iter().find(|s| s.season_number == number)
    }

    /// Typical episode runtime in minutes
    #[must_use]
    pub fn runtime(&self) -> Option<i32> {
        self.episode_run_time.first().copied()
    }
}

impl Describe for TvSeries {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("TvSeries")
            .scalar("id", |t, v| t.id = v)
            .scalar("name", |t, v| t.name = v)
            .scalar("original_name", |t, v| t.original_name = v)
            .scalar("original_language", |t, v| t.original_language = v)
            .scalar("overview", |t, v| t.overview = v)
            .scalar("tagline", |t, v| t.tagline = v)
            .scalar("status", |t, v| t.status = v)
            .scalar("type", |t, v| t.kind = v)
            .scalar("homepage", |t, v| t.homepage = v)
            .scalar("first_air_date", |t, v| t.first_air_date = v)
            .scalar("last_air_date", |t, v| t.last_air_date = v)
            .scalar("in_production", |t, v| t.in_production = v)
            .scalar("number_of_seasons", |t, v| t.number_of_seasons = v)
            .scalar("number_of_episodes", |t, v| t.number_of_episodes = v)
            .scalar("episode_run_time", |t, v| t.episode_run_time = v)
            .scalar("origin_country", |t, v| t.origin_country = v)
            .scalar("languages", |t, v| t.languages = v)
            .scalar("popularity", |t, v| t.popularity = v)
            .scalar("vote_average", |t, v| t.vote_average = v)
            .scalar("vote_count", |t, v| t.vote_count = v)
            .scalar("poster_path", |t, v| t.poster_path = v)
            .scalar("backdrop_path", |t, v| t.backdrop_path = v)
            .list("created_by", |t, v| t.created_by = v)
            .list("genres", |t, v| t.genres = v)
            .list("networks", |t, v| t.networks = v)
            .list("production_companies", |t, v| t.production_companies = v)
            .list("seasons", |t, v| t.seasons = v)
            .object("credits", |t, v| t.credits = Some(v))
            .object("images", |t, v| t.images = Some(v))
            .object("keywords", |t, v| t.keywords = Some(v))
            .object("videos", |t, v| t.videos = Some(v))
            .object("external_ids", |t, v| t.external_ids = Some(v))
            // episode objects, fetched separately when needed
            .ignore("last_episode_to_air")
            .ignore("next_episode_to_air")
            .build()
    }
}

/// Series entry as it appears in searches and listings
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TvSummary {
    pub id: i64,
    pub name: String,
    pub original_name: String,
    pub original_language: Option<String>,
    pub overview: Option<String>,
    pub first_air_date: Option<String>,
    pub origin_country: Vec<String>,
    pub genre_ids: Vec<i32>,
    pub popularity: f64,
    pub vote_average: f64,
    pub vote_count: i32,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

impl Describe for TvSummary {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("TvSummary")
            .scalar("id", |t, v| t.id = v)
            .scalar("name", |t, v| t.name = v)
            .scalar("original_name", |t, v| t.original_name = v)
            .scalar("original_language", |t, v| t.original_language = v)
            .scalar("overview", |t, v| t.overview = v)
            .scalar("first_air_date", |t, v| t.first_air_date = v)
            .scalar("origin_country", |t, v| t.origin_country = v)
            .scalar("genre_ids", |t, v| t.genre_ids = v)
            .scalar("popularity", |t, v| t.popularity = v)
            .scalar("vote_average", |t, v| t.vote_average = v)
            .scalar("vote_count", |t, v| t.vote_count = v)
            .scalar("poster_path", |t, v| t.poster_path = v)
            .scalar("backdrop_path", |t, v| t.backdrop_path = v)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Creator {
    pub id: i64,
    pub credit_id: Option<String>,
    pub name: String,
    pub gender: i32,
    pub profile_path: Option<String>,
}

impl Describe for Creator {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("Creator")
            .scalar("id", |c, v| c.id = v)
            .scalar("credit_id", |c, v| c.credit_id = v)
            .scalar("name", |c, v| c.name = v)
            .scalar("gender", |c, v| c.gender = v)
            .scalar("profile_path", |c, v| c.profile_path = v)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Season {
    pub id: i64,
    pub season_number: i32,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub air_date: Option<String>,
    pub episode_count: Option<i32>,
    pub vote_average: f64,
    pub poster_path: Option<String>,
    /// Only filled by the season details endpoint
    pub episodes: Vec<Episode>,
}

impl Season {
    #[must_use]
    pub const fn is_specials(&self) -> bool {
        self.season_number == 0
    }

    #[must_use]
    pub fn episode(&self, number: i32) -> Option<&Episode> {
        self.episodes.iter().find(|e| e.episode_number == number)
    }
}

impl Describe for Season {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("Season")
            .scalar("id", |s, v| s.id = v)
            .scalar("season_number", |s, v| s.season_number = v)
            .scalar("name", |s, v| s.name = v)
            .scalar("overview", |s, v| s.overview = v)
            .scalar("air_date", |s, v| s.air_date = v)
            .scalar("episode_count", |s, v| s.episode_count = v)
            .scalar("vote_average", |s, v| s.vote_average = v)
            .scalar("poster_path", |s, v| s.poster_path = v)
            .list("episodes", |s, v| s.episodes = v)
            .ignore("_id")
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Episode {
    pub id: i64,
    pub show_id: Option<i64>,
    pub season_number: i32,
    pub episode_number: i32,
    pub name: String,
    pub overview: Option<String>,
    pub air_date: Option<String>,
    pub runtime: Option<i32>,
    pub production_code: Option<String>,
    pub still_path: Option<String>,
    pub vote_average: f64,
    pub vote_count: i32,
    pub crew: Vec<CrewMember>,
    pub guest_stars: Vec<CastMember>,
}

impl Episode {
    #[must_use]
    pub fn aired_on(&self) -> Option<NaiveDate> {
        parse_date(self.air_date.as_deref())
    }

    /// `S01E02` style label
    #[must_use]
    pub fn label(&self) -> String {
        format!("S{:02}E{:02}", self.season_number, self.episode_number)
    }
}

impl Describe for Episode {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("Episode")
            .scalar("id", |e, v| e.id = v)
            .scalar("show_id", |e, v| e.show_id = v)
            .scalar("season_number", |e, v| e.season_number = v)
            .scalar("episode_number", |e, v| e.episode_number = v)
            .scalar("name", |e, v| e.name = v)
            .scalar("overview", |e, v| e.overview = v)
            .scalar("air_date", |e, v| e.air_date = v)
            .scalar("runtime", |e, v| e.runtime = v)
            .scalar("production_code", |e, v| e.production_code = v)
            .scalar("still_path", |e, v| e.still_path = v)
            .scalar("vote_average", |e, v| e.vote_average = v)
            .scalar("vote_count", |e, v| e.vote_count = v)
            .list("crew", |e, v| e.crew = v)
            .list("guest_stars", |e, v| e.guest_stars = v)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::from_str;

    #[test]
    fn test_series_with_seasons() {
        let series: TvSeries = from_str(
            r#"{
                "id": 1396, "name": "Breaking Bad", "original_name": "Breaking Bad",
                "type": "Scripted", "in_production": false,
                "episode_run_time": [45, 47], "origin_country": ["US"],
                "created_by": [{"id": 66633, "name": "Vince Gilligan", "gender": 2}],
                "networks": [{"id": 174, "name": "AMC", "origin_country": "US"}],
                "seasons": [
                    {"id": 3577, "season_number": 0, "name": "Specials", "episode_count": 9},
                    {"id": 3572, "season_number": 1, "name": "Season 1", "episode_count": 7}
                ],
                "last_episode_to_air": {"id": 62161, "name": "Felina"}
            }"#,
        )
        .unwrap();

        assert_eq!(series.kind.as_deref(), Some("Scripted"));
        assert_eq!(series.runtime(), Some(45));
        assert_eq!(series.created_by[0].name, "Vince Gilligan");
        assert_eq!(series.networks[0].name, "AMC");
        assert!(series.season(0).unwrap().is_specials());
        assert_eq!(series.season(1).and_then(|s| s.episode_count), Some(7));
        assert!(series.season(5).is_none());
    }

    #[test]
    fn test_season_with_episodes() {
        let season: Season = from_str(
            r#"{
                "_id": "52542282760ee313280017f9", "id": 3572, "season_number": 1,
                "episodes": [
                    {"id": 62085, "episode_number": 1, "season_number": 1, "name": "Pilot", "air_date": "2008-01-20",
                     "guest_stars": [{"id": 92495, "name": "John Koyama", "character": "Emilio Koyama"}],
                     "crew": [{"id": 66633, "name": "Vince Gilligan", "job": "Writer"}]},
                    {"id": 62086, "episode_number": 2, "season_number": 1, "name": "Cat's in the Bag..."}
                ]
            }"#,
        )
        .unwrap();

        let pilot = season.episode(1).unwrap();
        assert_eq!(pilot.label(), "S01E01");
        assert_eq!(pilot.aired_on(), NaiveDate::from_ymd_opt(2008, 1, 20));
        assert_eq!(pilot.guest_stars[0].character.as_deref(), Some("Emilio Koyama"));
        assert_eq!(season.episodes.len(), 2);
    }
}
