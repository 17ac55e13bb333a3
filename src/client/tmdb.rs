use super::{
    ApiUrl, AppendToResponse, ClientError, DocumentCache, DocumentSource, HttpClient, Result,
};
use crate::config::Settings;
use crate::mapper::{Describe, Document, Populator};
use crate::model::{
    AlternativeTitles, Collection, Configuration, Credits, Episode, GenreList, Images, Keywords,
    Movie, MovieListKind, MovieSummary, Person, PersonCredits, PersonSummary, ResultList, Season,
    TvSeries, TvSummary, Videos,
};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info};

/// Search options for the search endpoints
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Release year filter (first air year for series)
    pub year: Option<i32>,
    /// Result page, starting at 1
    pub page: Option<u32>,
    /// Preferred language, overriding the client default
    pub language: Option<String>,
    /// Include adult titles
    pub include_adult: Option<bool>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_adult(mut self, include_adult: bool) -> Self {
        self.include_adult = Some(include_adult);
        self
    }
}

/// Typed client for the movie metadata service
pub struct TmdbClient<S = HttpClient> {
    source: S,
    populator: Populator,
    cache: Option<DocumentCache>,
    language: Option<String>,
    region: Option<String>,
    include_adult: bool,
}

impl TmdbClient<HttpClient> {
    /// Client for the public service with default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let mut settings = Settings::default();
        settings.api.api_key = Some(api_key.into());
        Self::from_settings(&settings)
    }

    /// Client configured from `cinemap.toml` and `CINEMAP_*` variables
    pub fn from_env() -> Result<Self> {
        let settings = Settings::load()?;
        Self::from_settings(&settings)
    }

    /// Client built from loaded settings. An API key is required.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        if settings.api.api_key.as_deref().is_none_or(str::is_empty) {
            return Err(ClientError::Config("api.api_key is not set".to_string()));
        }

        let source = HttpClient::from_settings(&settings.api)?;
        let mut client = Self::with_source(source).with_populator(settings.mapper.populator());

        client.language = settings.api.language.clone();
        client.region = settings.api.region.clone();
        client.include_adult = settings.api.include_adult;
        client.cache = settings
            .cache
            .enabled
            .then(|| DocumentCache::with_config(&settings.cache));

        info!(
            language = client.language.as_deref().unwrap_or("default"),
            cache = settings.cache.enabled,
            "metadata client ready"
        );

        Ok(client)
    }
}

impl<S: DocumentSource> TmdbClient<S> {
    /// Client over any document source, uncached
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            populator: Populator::new(),
            cache: None,
            language: None,
            region: None,
            include_adult: false,
        }
    }

    /// Default `language` sent with every request
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Default `region` for listings
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: DocumentCache) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub fn with_populator(mut self, populator: Populator) -> Self {
        self.populator = populator;
        self
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub const fn cache(&self) -> Option<&DocumentCache> {
        self.cache.as_ref()
    }

    /// Image and change-key configuration
    pub async fn configuration(&self) -> Result<Configuration> {
        self.get(ApiUrl::new("configuration")).await
    }

    /// Movie details, optionally with appended sub-resources
    pub async fn movie(&self, id: i64, append: &[AppendToResponse]) -> Result<Movie> {
        self.get(ApiUrl::new("movie").segment(id).append_to_response(append))
            .await
    }

    /// Fetch several movies concurrently; results keep the order of `ids`
    pub async fn movies(&self, ids: &[i64]) -> Vec<Result<Movie>> {
        join_all(ids.iter().map(|&id| self.movie(id, &[]))).await
    }

    pub async fn movie_credits(&self, id: i64) -> Result<Credits> {
        self.get(movie_path(id, "credits")).await
    }

    /// All images of a movie, regardless of language
    pub async fn movie_images(&self, id: i64) -> Result<Images> {
        // the language filter would hide text-free art
        self.get_raw(movie_path(id, "images")).await
    }

    pub async fn movie_keywords(&self, id: i64) -> Result<Keywords> {
        self.get_raw(movie_path(id, "keywords")).await
    }

    pub async fn movie_videos(&self, id: i64) -> Result<Videos> {
        self.get(movie_path(id, "videos")).await
    }

    /// Alternative titles, optionally for one country (ISO 3166-1)
    pub async fn movie_alternative_titles(
        &self,
        id: i64,
        country: Option<&str>,
    ) -> Result<AlternativeTitles> {
        self.get_raw(movie_path(id, "alternative_titles").param_opt("country", country))
            .await
    }

    pub async fn similar_movies(
        &self,
        id: i64,
        page: Option<u32>,
    ) -> Result<ResultList<MovieSummary>> {
        self.get(movie_path(id, "similar").page(page)).await
    }

    /// Popular, top rated, now playing or upcoming movies
    pub async fn movie_list(
        &self,
        kind: MovieListKind,
        page: Option<u32>,
    ) -> Result<ResultList<MovieSummary>> {
        let url = ApiUrl::new("movie")
            .segment(kind.path())
            .page(page)
            .param_opt("region", self.region.as_deref());
        self.get(url).await
    }

    pub async fn search_movie(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<ResultList<MovieSummary>> {
        let url = self
            .search_url("movie", query, options)?
            .param_opt("year", options.year)
            .param_opt("region", self.region.as_deref());
        self.get(url).await
    }

    pub async fn search_tv(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<ResultList<TvSummary>> {
        let url = self
            .search_url("tv", query, options)?
            .param_opt("first_air_date_year", options.year);
        self.get(url).await
    }

    pub async fn search_person(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<ResultList<PersonSummary>> {
        let url = self.search_url("person", query, options)?;
        self.get(url).await
    }

    pub async fn person(&self, id: i64, append: &[AppendToResponse]) -> Result<Person> {
        self.get(ApiUrl::new("person").segment(id).append_to_response(append))
            .await
    }

    /// Movie and series credits of a person
    pub async fn person_credits(&self, id: i64) -> Result<PersonCredits> {
        self.get(ApiUrl::new("person").segment(id).segment("combined_credits"))
            .await
    }

    pub async fn collection(&self, id: i64) -> Result<Collection> {
        self.get(ApiUrl::new("collection").segment(id)).await
    }

    pub async fn tv_series(&self, id: i64, append: &[AppendToResponse]) -> Result<TvSeries> {
        self.get(ApiUrl::new("tv").segment(id).append_to_response(append))
            .await
    }

    /// Season details including its episodes
    pub async fn tv_season(&self, series_id: i64, season: i32) -> Result<Season> {
        self.get(ApiUrl::new("tv").segment(series_id).segment("season").segment(season))
            .await
    }

    pub async fn tv_episode(&self, series_id: i64, season: i32, episode: i32) -> Result<Episode> {
        let url = ApiUrl::new("tv")
            .segment(series_id)
            .segment("season")
            .segment(season)
            .segment("episode")
            .segment(episode);
        self.get(url).await
    }

    pub async fn movie_genres(&self) -> Result<GenreList> {
        self.get(ApiUrl::new("genre").segment("movie").segment("list"))
            .await
    }

    pub async fn tv_genres(&self) -> Result<GenreList> {
        self.get(ApiUrl::new("genre").segment("tv").segment("list"))
            .await
    }

    fn search_url(&self, kind: &str, query: &str, options: &SearchOptions) -> Result<ApiUrl> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ClientError::InvalidRequest(
                "search query must not be empty".to_string(),
            ));
        }

        let include_adult = options.include_adult.unwrap_or(self.include_adult);
        Ok(ApiUrl::new("search")
            .segment(kind)
            .param("query", query)
            .page(options.page)
            .param("include_adult", include_adult)
            .param_opt("language", options.language.as_deref()))
    }

    /// Fetch with the client language applied, then populate
    async fn get<T: Describe>(&self, url: ApiUrl) -> Result<T> {
        let url = match &self.language {
            Some(language) if !url.has_param("language") => url.param("language", language),
            _ => url,
        };
        self.get_raw(url).await
    }

    /// Fetch exactly `url`, then populate
    async fn get_raw<T: Describe>(&self, url: ApiUrl) -> Result<T> {
        let document = self.document(&url).await?;
        Ok(self.populator.populate::<T>(&document)?)
    }

    async fn document(&self, url: &ApiUrl) -> Result<Arc<Document>> {
        if let Some(cache) = &self.cache
            && let Some(cached) = cache.get(url).await
        {
            debug!(url = %url, "Cache hit for document");
            return Ok(cached);
        }

        let document = Arc::new(self.source.fetch(url).await?);
        debug!(
            url = %url,
            source = self.source.name(),
            keys = document.len(),
            "fetched document"
        );

        if let Some(cache) = &self.cache {
            cache.insert(url, Arc::clone(&document)).await;
        }

        Ok(document)
    }
}

impl<S> std::fmt::Debug for TmdbClient<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("populator", &self.populator)
            .field("cached", &self.cache.is_some())
            .field("language", &self.language)
            .field("region", &self.region)
            .field("include_adult", &self.include_adult)
            .finish_non_exhaustive()
    }
}

fn movie_path(id: i64, sub_resource: &str) -> ApiUrl {
    ApiUrl::new("movie").segment(id).segment(sub_resource)
}
