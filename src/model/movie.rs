use super::{
    AlternativeTitles, CollectionSummary, Credits, ExternalIds, Genre, Images, Keywords,
    ResultList, Videos,
};
use crate::mapper::{Describe, TypeDescriptor};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Full movie record, optionally carrying appended sub-resources
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Movie {
    pub id: i64,
    pub imdb_id: Option<String>,
    pub title: String,
    pub original_title: String,
    pub original_language: String,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub status: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<i32>,
    pub budget: i64,
    pub revenue: i64,
    pub homepage: Option<String>,
    pub adult: bool,
    pub video: bool,
    pub popularity: f64,
    pub vote_average: f64,
    pub vote_count: i32,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub belongs_to_collection: Option<CollectionSummary>,
    pub genres: Vec<Genre>,
    pub production_companies: Vec<ProductionCompany>,
    pub production_countries: Vec<ProductionCountry>,
    pub spoken_languages: Vec<SpokenLanguage>,

    // Appended sub-resources
    pub credits: Option<Credits>,
    pub images: Option<Images>,
    pub keywords: Option<Keywords>,
    pub videos: Option<Videos>,
    pub external_ids: Option<ExternalIds>,
    pub alternative_titles: Option<AlternativeTitles>,
    pub similar: Option<ResultList<MovieSummary>>,
}

impl Movie {
    /// Release date, when the service sent a valid one
    #[must_use]
    pub fn released_on(&self) -> Option<NaiveDate> {
        parse_date(self.release_date.as_deref())
    }

    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        self.released_on().map(|d| d.year())
    }

    /// Names of all genres, in service order
    pub fn genre_names(&self) -> impl Iterator<Item = &str> {
        self.genres.iter().map(|g| g.name.as_str())
    }
}

impl Describe for Movie {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("Movie")
            .scalar("id", |m, v| m.id = v)
            .scalar("imdb_id", |m, v| m.imdb_id = v)
            .scalar("title", |m, v| m.title = v)
            .scalar("original_title", |m, v| m.original_title = v)
            .scalar("original_language", |m, v| m.original_language = v)
            .scalar("tagline", |m, v| m.tagline = v)
            .scalar("overview", |m, v| m.overview = v)
            .scalar("status", |m, v| m.status = v)
            .scalar("release_date", |m, v| m.release_date = v)
            .scalar("runtime", |m, v| m.runtime = v)
            .scalar("budget", |m, v| m.budget = v)
            .scalar("revenue", |m, v| m.revenue = v)
            .scalar("homepage", |m, v| m.homepage = v)
            .scalar("adult", |m, v| m.adult = v)
            .scalar("video", |m, v| m.video = v)
            .scalar("popularity", |m, v| m.popularity = v)
            .scalar("vote_average", |m, v| m.vote_average = v)
            .scalar("vote_count", |m, v| m.vote_count = v)
            .scalar("poster_path", |m, v| m.poster_path = v)
            .scalar("backdrop_path", |m, v| m.backdrop_path = v)
            .object("belongs_to_collection", |m, v| m.belongs_to_collection = Some(v))
            .list("genres", |m, v| m.genres = v)
            .list("production_companies", |m, v| m.production_companies = v)
            .list("production_countries", |m, v| m.production_countries = v)
            .list("spoken_languages", |m, v| m.spoken_languages = v)
            .object("credits", |m, v| m.credits = Some(v))
            .object("images", |m, v| m.images = Some(v))
            .object("keywords", |m, v| m.keywords = Some(v))
            .object("videos", |m, v| m.videos = Some(v))
            .object("external_ids", |m, v| m.external_ids = Some(v))
            .object("alternative_titles", |m, v| m.alternative_titles = Some(v))
            .object("similar", |m, v| m.similar = Some(v))
            .build()
    }
}

/// Movie entry as it appears in searches and listings
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    pub original_title: String,
    pub original_language: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub genre_ids: Vec<i32>,
    pub adult: bool,
    pub video: bool,
    pub popularity: f64,
    pub vote_average: f64,
    pub vote_count: i32,
}

impl MovieSummary {
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        parse_date(self.release_date.as_deref()).map(|d| d.year())
    }
}

impl Describe for MovieSummary {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("MovieSummary")
            .scalar("id", |m, v| m.id = v)
            .scalar("title", |m, v| m.title = v)
            .scalar("original_title", |m, v| m.original_title = v)
            .scalar("original_language", |m, v| m.original_language = v)
            .scalar("overview", |m, v| m.overview = v)
            .scalar("release_date", |m, v| m.release_date = v)
            .scalar("poster_path", |m, v| m.poster_path = v)
            .scalar("backdrop_path", |m, v| m.backdrop_path = v)
            .scalar("genre_ids", |m, v| m.genre_ids = v)
            .scalar("adult", |m, v| m.adult = v)
            .scalar("video", |m, v| m.video = v)
            .scalar("popularity", |m, v| m.popularity = v)
            .scalar("vote_average", |m, v| m.vote_average = v)
            .scalar("vote_count", |m, v| m.vote_count = v)
            .build()
    }
}

/// Studio or network
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductionCompany {
    pub id: i64,
    pub name: String,
    pub logo_path: Option<String>,
    pub origin_country: Option<String>,
}

impl Describe for ProductionCompany {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("ProductionCompany")
            .scalar("id", |c, v| c.id = v)
            .scalar("name", |c, v| c.name = v)
            .scalar("logo_path", |c, v| c.logo_path = v)
            .scalar("origin_country", |c, v| c.origin_country = v)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

impl Describe for ProductionCountry {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("ProductionCountry")
            .scalar("iso_3166_1", |c, v| c.iso_3166_1 = v)
            .scalar("name", |c, v| c.name = v)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpokenLanguage {
    pub iso_639_1: String,
    pub english_name: Option<String>,
    pub name: String,
}

impl Describe for SpokenLanguage {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("SpokenLanguage")
            .scalar("iso_639_1", |l, v| l.iso_639_1 = v)
            .scalar("english_name", |l, v| l.english_name = v)
            .scalar("name", |l, v| l.name = v)
            .build()
    }
}

/// Curated movie listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieListKind {
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
}

impl MovieListKind {
    /// Path segment of the listing endpoint
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
            Self::NowPlaying => "now_playing",
            Self::Upcoming => "upcoming",
        }
    }
}

// The service sends "" for unknown dates.
pub(super) fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::from_str;

    const BLADE_RUNNER: &str = r#"{
        "adult": false,
        "backdrop_path": "/eIi3klFf7mp3oL5EEF4mLIDs26r.jpg",
        "belongs_to_collection": {"id": 422837, "name": "Blade Runner Collection", "poster_path": "/qTcATCpiFDcgY8snQIfS2j0bFP7.jpg", "backdrop_path": null},
        "budget": 28000000,
        "genres": [{"id": 878, "name": "Science Fiction"}, {"id": 18, "name": "Drama"}, {"id": 53, "name": "Thriller"}],
        "homepage": "",
        "id": 78,
        "imdb_id": "tt0083658",
        "original_language": "en",
        "original_title": "Blade Runner",
        "overview": "In the smog-choked dystopian Los Angeles of 2019...",
        "popularity": 54.1,
        "poster_path": "/63N9uy8nd9j7Eog2axPQ8lbr3Wj.jpg",
        "production_companies": [{"id": 7965, "logo_path": null, "name": "The Ladd Company", "origin_country": "US"}],
        "production_countries": [{"iso_3166_1": "US", "name": "United States of America"}],
        "release_date": "1982-06-25",
        "revenue": 41722424,
        "runtime": 118,
        "spoken_languages": [{"english_name": "English", "iso_639_1": "en", "name": "English"}],
        "status": "Released",
        "tagline": "Man has made his match... now it's his problem.",
        "title": "Blade Runner",
        "video": false,
        "vote_average": 7.9,
        "vote_count": 13800,
        "external_ids": {"id": 78, "imdb_id": "tt0083658", "wikidata_id": "Q184843", "facebook_id": null},
        "credits": {
            "cast": [{"id": 3, "name": "Harrison Ford", "character": "Rick Deckard", "order": 0}],
            "crew": [{"id": 578, "name": "Ridley Scott", "job": "Director", "department": "Directing"}]
        }
    }"#;

    #[test]
    fn test_full_movie_document() {
        let movie: Movie = from_str(BLADE_RUNNER).unwrap();

        assert_eq!(movie.id, 78);
        assert_eq!(movie.runtime, Some(118));
        assert_eq!(movie.budget, 28_000_000);
        assert_eq!(movie.release_year(), Some(1982));
        assert_eq!(
            movie.genre_names().collect::<Vec<_>>(),
            vec!["Science Fiction", "Drama", "Thriller"]
        );
        assert_eq!(
            movie.belongs_to_collection.as_ref().map(|c| c.id),
            Some(422_837)
        );
        assert_eq!(movie.production_companies[0].origin_country.as_deref(), Some("US"));
        assert_eq!(movie.spoken_languages[0].iso_639_1, "en");

        let ids = movie.external_ids.as_ref().unwrap();
        assert_eq!(ids.wikidata_id.as_deref(), Some("Q184843"));
        assert!(ids.facebook_id.is_none());

        let credits = movie.credits.as_ref().unwrap();
        assert_eq!(credits.cast[0].character.as_deref(), Some("Rick Deckard"));
        assert_eq!(credits.directors().next().map(|c| c.name.as_str()), Some("Ridley Scott"));

        assert!(movie.images.is_none());
    }

    #[test]
    fn test_empty_release_date() {
        let movie: Movie = from_str(r#"{"id": 1, "release_date": ""}"#).unwrap();

        assert_eq!(movie.release_date.as_deref(), Some(""));
        assert!(movie.released_on().is_none());
        assert!(movie.release_year().is_none());
    }

    #[test]
    fn test_summary_release_year() {
        let summary: MovieSummary =
            from_str(r#"{"id": 335984, "title": "Blade Runner 2049", "release_date": "2017-10-04", "genre_ids": [878, 18]}"#)
                .unwrap();

        assert_eq!(summary.release_year(), Some(2017));
        assert_eq!(summary.genre_ids, vec![878, 18]);
    }

    #[test]
    fn test_list_kind_paths() {
        assert_eq!(MovieListKind::TopRated.path(), "top_rated");
        assert_eq!(MovieListKind::NowPlaying.path(), "now_playing");
    }
}
