use crate::mapper::{Describe, TypeDescriptor};
use serde::{Deserialize, Serialize};

/// Kind of resource an entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
    Person,
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Tv => write!(f, "tv"),
            Self::Person => write!(f, "person"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One page of a paged listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultList<T> {
    pub page: i32,
    pub total_pages: i32,
    pub total_results: i32,
    pub results: Vec<T>,
}

impl<T> Default for ResultList<T> {
    fn default() -> Self {
        Self {
            page: 0,
            total_pages: 0,
            total_results: 0,
            results: Vec::new(),
        }
    }
}

impl<T> ResultList<T> {
    /// Whether a later page exists
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.results.iter()
    }
}

impl<T> IntoIterator for ResultList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<T: Describe> Describe for ResultList<T> {
    fn describe() -> TypeDescriptor<Self> {
        // one descriptor per element type, so the name carries `T`
        TypeDescriptor::<Self>::builder(std::any::type_name::<Self>())
            .scalar("page", |r, v| r.page = v)
            .scalar("total_pages", |r, v| r.total_pages = v)
            .scalar("total_results", |r, v| r.total_results = v)
            .list("results", |r, v| r.results = v)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl Describe for Genre {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("Genre")
            .scalar("id", |g, v| g.id = v)
            .scalar("name", |g, v| g.name = v)
            .build()
    }
}

/// Response of the genre listing endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenreList {
    pub genres: Vec<Genre>,
}

impl GenreList {
    /// Genre name for an id, as found in search results
    #[must_use]
    pub fn name_of(&self, id: i32) -> Option<&str> {
        self.genres
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.name.as_str())
    }
}

impl Describe for GenreList {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("GenreList")
            .list("genres", |g, v| g.genres = v)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Keyword {
    pub id: i32,
    pub name: String,
}

impl Describe for Keyword {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("Keyword")
            .scalar("id", |k, v| k.id = v)
            .scalar("name", |k, v| k.name = v)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Keywords {
    pub id: i64,
    pub keywords: Vec<Keyword>,
}

impl Describe for Keywords {
    fn describe() -> TypeDescriptor<Self> {
        // movies answer with `keywords`, series with `results`
        TypeDescriptor::<Self>::builder("Keywords")
            .scalar("id", |k, v| k.id = v)
            .list("keywords", |k, v| k.keywords = v)
            .list("results", |k, v| k.keywords = v)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Video {
    pub id: String,
    pub iso_639_1: Option<String>,
    pub iso_3166_1: Option<String>,
    pub key: String,
    pub name: String,
    pub site: String,
    pub size: i32,
    pub kind: String,
    pub official: bool,
    pub published_at: Option<String>,
}

impl Video {
    /// Watch URL for videos hosted on YouTube
    #[must_use]
    pub fn youtube_url(&self) -> Option<String> {
        (self.site == "YouTube" && !self.key.is_empty())
            .then(|| format!("https://www.youtube.com/watch?v={}", self.key))
    }

    #[must_use]
    pub fn is_trailer(&self) -> bool {
        self.kind == "Trailer"
    }
}

impl Describe for Video {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("Video")
            .scalar("id", |v, x| v.id = x)
            .scalar("iso_639_1", |v, x| v.iso_639_1 = x)
            .scalar("iso_3166_1", |v, x| v.iso_3166_1 = x)
            .scalar("key", |v, x| v.key = x)
            .scalar("name", |v, x| v.name = x)
            .scalar("site", |v, x| v.site = x)
            .scalar("size", |v, x| v.size = x)
            .scalar("type", |v, x| v.kind = x)
            .scalar("official", |v, x| v.official = x)
            .scalar("published_at", |v, x| v.published_at = x)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Videos {
    pub id: i64,
    pub results: Vec<Video>,
}

impl Videos {
    pub fn trailers(&self) -> impl Iterator<Item = &Video> {
        self.results.iter().filter(|v| v.is_trailer())
    }
}

impl Describe for Videos {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("Videos")
            .scalar("id", |v, x| v.id = x)
            .list("results", |v, x| v.results = x)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlternativeTitle {
    pub iso_3166_1: String,
    pub title: String,
    pub kind: Option<String>,
}

impl Describe for AlternativeTitle {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("AlternativeTitle")
            .scalar("iso_3166_1", |t, v| t.iso_3166_1 = v)
            .scalar("title", |t, v| t.title = v)
            .scalar("type", |t, v| t.kind = v)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlternativeTitles {
    pub id: i64,
    pub titles: Vec<AlternativeTitle>,
}

impl AlternativeTitles {
    /// Titles used in one country (ISO 3166-1)
    pub fn for_country<'a>(&'a self, country: &'a str) -> impl Iterator<Item = &'a AlternativeTitle> {
        self.titles.iter().filter(move |t| t.iso_3166_1 == country)
    }
}

impl Describe for AlternativeTitles {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("AlternativeTitles")
            .scalar("id", |t, v| t.id = v)
            .list("titles", |t, v| t.titles = v)
            .list("results", |t, v| t.titles = v)
            .build()
    }
}

/// Identifiers of the same resource on other sites
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExternalIds {
    pub imdb_id: Option<String>,
    pub tvdb_id: Option<i64>,
    pub wikidata_id: Option<String>,
    pub facebook_id: Option<String>,
    pub instagram_id: Option<String>,
    pub twitter_id: Option<String>,
}

impl ExternalIds {
    /// Check if any ID is set
    #[must_use]
    pub const fn has_any(&self) -> bool {
        self.imdb_id.is_some()
            || self.tvdb_id.is_some()
            || self.wikidata_id.is_some()
            || self.facebook_id.is_some()
            || self.instagram_id.is_some()
            || self.twitter_id.is_some()
    }
}

impl Describe for ExternalIds {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("ExternalIds")
            .ignore("id")
            .scalar("imdb_id", |e, v| e.imdb_id = v)
            .scalar("tvdb_id", |e, v| e.tvdb_id = v)
            .scalar("wikidata_id", |e, v| e.wikidata_id = v)
            .scalar("facebook_id", |e, v| e.facebook_id = v)
            .scalar("instagram_id", |e, v| e.instagram_id = v)
            .scalar("twitter_id", |e, v| e.twitter_id = v)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::from_str;

    #[test]
    fn test_keywords_accept_either_list_key() {
        let movie: Keywords =
            from_str(r#"{"id": 78, "keywords": [{"id": 310, "name": "artificial intelligence"}]}"#)
                .unwrap();
        let series: Keywords =
            from_str(r#"{"id": 1399, "results": [{"id": 6091, "name": "war"}]}"#).unwrap();

        assert_eq!(movie.keywords[0].name, "artificial intelligence");
        assert_eq!(series.keywords[0].id, 6091);
    }

    #[test]
    fn test_video_helpers() {
        let videos: Videos = from_str(
            r#"{"id": 78, "results": [
                {"id": "a", "key": "eogpIG53Cis", "site": "YouTube", "type": "Trailer", "official": true},
                {"id": "b", "key": "123", "site": "Vimeo", "type": "Featurette"}
            ]}"#,
        )
        .unwrap();

        let trailers: Vec<_> = videos.trailers().collect();
        assert_eq!(trailers.len(), 1);
        assert_eq!(
            trailers[0].youtube_url().as_deref(),
            Some("https://www.youtube.com/watch?v=eogpIG53Cis")
        );
        assert!(videos.results[1].youtube_url().is_none());
    }

    #[test]
    fn test_media_type_falls_back_to_unknown() {
        #[derive(Debug, Default)]
        struct Entry {
            media_type: MediaType,
        }

        impl Describe for Entry {
            fn describe() -> TypeDescriptor<Self> {
                TypeDescriptor::<Self>::builder("Entry")
                    .scalar("media_type", |e, v| e.media_type = v)
                    .build()
            }
        }

        let tv: Entry = from_str(r#"{"media_type": "tv"}"#).unwrap();
        let other: Entry = from_str(r#"{"media_type": "collection"}"#).unwrap();

        assert_eq!(tv.media_type, MediaType::Tv);
        assert_eq!(other.media_type, MediaType::Unknown);
    }

    #[test]
    fn test_result_list_paging() {
        let page: ResultList<Genre> = from_str(
            r#"{"page": 1, "total_pages": 3, "total_results": 41, "results": [{"id": 1, "name": "Drama"}]}"#,
        )
        .unwrap();

        assert!(page.has_more());
        assert_eq!(page.iter().count(), 1);
        assert_eq!(page.total_results, 41);
    }

    #[test]
    fn test_result_lists_are_described_per_element_type() {
        let genres = ResultList::<Genre>::descriptor().name();
        let keywords = ResultList::<Keyword>::descriptor().name();

        assert_ne!(genres, keywords);
        assert!(genres.contains("Genre"));
        assert!(keywords.contains("Keyword"));
    }

    #[test]
    fn test_genre_lookup() {
        let list: GenreList =
            from_str(r#"{"genres": [{"id": 18, "name": "Drama"}, {"id": 878, "name": "Science Fiction"}]}"#)
                .unwrap();

        assert_eq!(list.name_of(878), Some("Science Fiction"));
        assert_eq!(list.name_of(1), None);
    }
}
