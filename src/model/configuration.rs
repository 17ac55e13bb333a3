use crate::mapper::{Describe, TypeDescriptor};
use serde::Serialize;

/// Service-wide configuration, mainly how to build image URLs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub images: ImageConfiguration,
    pub change_keys: Vec<String>,
}

impl Configuration {
    /// Full URL of an image file at a given size.
    ///
    /// Returns `None` when `size` is not offered for any image kind.
    #[must_use]
    pub fn image_url(&self, file_path: &str, size: &str) -> Option<String> {
        self.images.image_url(file_path, size)
    }
}

impl Describe for Configuration {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("Configuration")
            .object("images", |c, v| c.images = v)
            .scalar("change_keys", |c, v| c.change_keys = v)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageConfiguration {
    pub base_url: String,
    pub secure_base_url: String,
    pub backdrop_sizes: Vec<String>,
    pub logo_sizes: Vec<String>,
    pub poster_sizes: Vec<String>,
    pub profile_sizes: Vec<String>,
    pub still_sizes: Vec<String>,
}

impl ImageConfiguration {
    /// Whether any image kind offers `size`
    #[must_use]
    pub fn has_size(&self, size: &str) -> bool {
        [
            &self.backdrop_sizes,
            &self.logo_sizes,
            &self.poster_sizes,
            &self.profile_sizes,
            &self.still_sizes,
        ]
        .into_iter()
        .flatten()
        .any(|s| s == size)
    }

    #[must_use]
    pub fn image_url(&self, file_path: &str, size: &str) -> Option<String> {
        if !self.has_size(size) {
            return None;
        }

        let base = if self.secure_base_url.is_empty() {
            &self.base_url
        } else {
            &self.secure_base_url
        };

        Some(format!("{base}{size}{file_path}"))
    }
}

impl Describe for ImageConfiguration {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("ImageConfiguration")
            .scalar("base_url", |i, v| i.base_url = v)
            .scalar("secure_base_url", |i, v| i.secure_base_url = v)
            .scalar("backdrop_sizes", |i, v| i.backdrop_sizes = v)
            .scalar("logo_sizes", |i, v| i.logo_sizes = v)
            .scalar("poster_sizes", |i, v| i.poster_sizes = v)
            .scalar("profile_sizes", |i, v| i.profile_sizes = v)
            .scalar("still_sizes", |i, v| i.still_sizes = v)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::from_str;

    fn configuration() -> Configuration {
        from_str(
            r#"{
                "images": {
                    "base_url": "http://image.tmdb.org/t/p/",
                    "secure_base_url": "https://image.tmdb.org/t/p/",
                    "backdrop_sizes": ["w300", "w780", "w1280", "original"],
                    "logo_sizes": ["w45", "w92", "original"],
                    "poster_sizes": ["w92", "w154", "w500", "original"],
                    "profile_sizes": ["w45", "w185", "h632", "original"],
                    "still_sizes": ["w92", "w300", "original"]
                },
                "change_keys": ["adult", "air_date", "also_known_as"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_image_url_uses_secure_base() {
        let config = configuration();

        assert_eq!(
            config.image_url("/63N9uy8nd9j7Eog2axPQ8lbr3Wj.jpg", "w500").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/63N9uy8nd9j7Eog2axPQ8lbr3Wj.jpg")
        );
        assert_eq!(config.change_keys.len(), 3);
    }

    #[test]
    fn test_image_url_rejects_unknown_size() {
        let config = configuration();

        assert!(config.image_url("/a.jpg", "w9999").is_none());
        assert!(config.images.has_size("h632"));
    }

    #[test]
    fn test_image_url_falls_back_to_plain_base() {
        let mut config = configuration();
        config.images.secure_base_url.clear();

        assert_eq!(
            config.image_url("/a.jpg", "original").as_deref(),
            Some("http://image.tmdb.org/t/p/original/a.jpg")
        );
    }
}
