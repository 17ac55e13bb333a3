use std::fmt;
use urlencoding::encode;

/// Sub-resources that can be folded into a detail request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppendToResponse {
    AlternativeTitles,
    CombinedCredits,
    Credits,
    ExternalIds,
    Images,
    Keywords,
    Similar,
    Videos,
}

impl AppendToResponse {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlternativeTitles => "alternative_titles",
            Self::CombinedCredits => "combined_credits",
            Self::Credits => "credits",
            Self::ExternalIds => "external_ids",
            Self::Images => "images",
            Self::Keywords => "keywords",
            Self::Similar => "similar",
            Self::Videos => "videos",
        }
    }
}

impl fmt::Display for AppendToResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative request URL: path segments plus ordered query parameters.
///
/// Credentials are never part of an `ApiUrl`; the transport adds them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiUrl {
    segments: Vec<String>,
    params: Vec<(String, String)>,
}

impl ApiUrl {
    /// Start a URL at a top-level resource, e.g. `movie`
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            segments: vec![resource.into()],
            params: Vec::new(),
        }
    }

    /// Append a path segment
    #[must_use]
    pub fn segment(mut self, segment: impl ToString) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    /// Set a query parameter, replacing an earlier value for the same key
    #[must_use]
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.params.push((key.to_string(), value)),
        }
        self
    }

    /// Set a query parameter when a value is present
    #[must_use]
    pub fn param_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    #[must_use]
    pub fn page(self, page: Option<u32>) -> Self {
        self.param_opt("page", page)
    }

    /// Ask for sub-resources in the same response
    #[must_use]
    pub fn append_to_response(self, items: &[AppendToResponse]) -> Self {
        if items.is_empty() {
            return self;
        }

        let joined = items
            .iter()
            .map(|item| item.as_str())
            .collect::<Vec<_>>()
            .join(",");
        self.param("append_to_response", joined)
    }

    #[must_use]
    pub fn has_param(&self, key: &str) -> bool {
        self.params.iter().any(|(k, _)| k == key)
    }

    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Encoded path, e.g. `/movie/78/credits`
    #[must_use]
    pub fn path(&self) -> String {
        self.segments
            .iter()
            .map(|s| format!("/{}", encode(s)))
            .collect()
    }

    /// Encoded query string without the leading `?`
    #[must_use]
    pub fn query(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Key identifying the response this URL produces
    #[must_use]
    pub fn cache_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())?;
        if !self.params.is_empty() {
            write!(f, "?{}", self.query())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_and_params() {
        let url = ApiUrl::new("movie")
            .segment(78)
            .segment("credits")
            .param("language", "en-US");

        assert_eq!(url.path(), "/movie/78/credits");
        assert_eq!(url.to_string(), "/movie/78/credits?language=en-US");
    }

    #[test]
    fn test_params_are_encoded() {
        let url = ApiUrl::new("search")
            .segment("movie")
            .param("query", "Amélie & Nino");

        assert_eq!(url.query(), "query=Am%C3%A9lie%20%26%20Nino");
    }

    #[test]
    fn test_param_replaces_existing_value() {
        let url = ApiUrl::new("movie")
            .param("language", "en")
            .param("page", 1)
            .param("language", "fr");

        assert_eq!(url.query(), "language=fr&page=1");
    }

    #[test]
    fn test_optional_params() {
        let url = ApiUrl::new("movie")
            .segment("popular")
            .page(None)
            .param_opt::<&str>("region", None);
        assert_eq!(url.to_string(), "/movie/popular");

        let url = url.page(Some(2));
        assert_eq!(url.to_string(), "/movie/popular?page=2");
    }

    #[test]
    fn test_append_to_response() {
        let url = ApiUrl::new("movie").segment(78).append_to_response(&[
            AppendToResponse::Credits,
            AppendToResponse::ExternalIds,
        ]);
        assert_eq!(url.query(), "append_to_response=credits%2Cexternal_ids");

        let bare = ApiUrl::new("movie").segment(78).append_to_response(&[]);
        assert!(!bare.has_param("append_to_response"));
    }
}
