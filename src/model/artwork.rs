use crate::mapper::{Describe, TypeDescriptor};
use serde::Serialize;

/// Which image list an artwork came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtworkKind {
    Backdrop,
    Poster,
    Logo,
    Profile,
    Still,
}

/// Single image file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Artwork {
    pub file_path: String,
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: f64,
    /// Language of any text in the image; `None` for text-free art
    pub iso_639_1: Option<String>,
    pub vote_average: f64,
    pub vote_count: i32,
}

impl Artwork {
    /// Aspect ratio, computed from the dimensions when the service omitted it
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        if self.aspect_ratio > 0.0 || self.height == 0 {
            self.aspect_ratio
        } else {
            f64::from(self.width) / f64::from(self.height)
        }
    }

    #[must_use]
    pub fn is_landscape(&self) -> bool {
        self.aspect_ratio() > 1.0
    }
}

impl Describe for Artwork {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("Artwork")
            .scalar("file_path", |a, v| a.file_path = v)
            .scalar("width", |a, v| a.width = v)
            .scalar("height", |a, v| a.height = v)
            .scalar("aspect_ratio", |a, v| a.aspect_ratio = v)
            .scalar("iso_639_1", |a, v| a.iso_639_1 = v)
            .scalar("vote_average", |a, v| a.vote_average = v)
            .scalar("vote_count", |a, v| a.vote_count = v)
            .build()
    }
}

/// Image lists of a movie, series, season, episode or person
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Images {
    pub id: i64,
    pub backdrops: Vec<Artwork>,
    pub posters: Vec<Artwork>,
    pub logos: Vec<Artwork>,
    pub profiles: Vec<Artwork>,
    pub stills: Vec<Artwork>,
}

impl Images {
    #[must_use]
    pub fn of_kind(&self, kind: ArtworkKind) -> &[Artwork] {
        match kind {
            ArtworkKind::Backdrop => &self.backdrops,
            ArtworkKind::Poster => &self.posters,
            ArtworkKind::Logo => &self.logos,
            ArtworkKind::Profile => &self.profiles,
            ArtworkKind::Still => &self.stills,
        }
    }

    /// Every image tagged with its list
    pub fn all(&self) -> impl Iterator<Item = (ArtworkKind, &Artwork)> {
        [
            ArtworkKind::Backdrop,
            ArtworkKind::Poster,
            ArtworkKind::Logo,
            ArtworkKind::Profile,
            ArtworkKind::Still,
        ]
        .into_iter()
        .flat_map(move |kind| self.of_kind(kind).iter().map(move |art| (kind, art)))
    }

    /// Highest voted image of a kind
    #[must_use]
    pub fn best(&self, kind: ArtworkKind) -> Option<&Artwork> {
        self.of_kind(kind)
            .iter()
            .max_by(|a, b| a.vote_average.total_cmp(&b.vote_average))
    }
}

impl Describe for Images {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("Images")
            .scalar("id", |i, v| i.id = v)
            .list("backdrops", |i, v| i.backdrops = v)
            .list("posters", |i, v| i.posters = v)
            .list("logos", |i, v| i.logos = v)
            .list("profiles", |i, v| i.profiles = v)
            .list("stills", |i, v| i.stills = v)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::from_str;

    #[test]
    fn test_images_by_kind() {
        let images: Images = from_str(
            r#"{"id": 78,
                "backdrops": [{"file_path": "/b.jpg", "width": 1920, "height": 1080, "aspect_ratio": 1.778, "vote_average": 5.3}],
                "posters": [
                    {"file_path": "/p1.jpg", "width": 1000, "height": 1500, "iso_639_1": "en", "vote_average": 5.1},
                    {"file_path": "/p2.jpg", "width": 1000, "height": 1500, "iso_639_1": "de", "vote_average": 5.6}
                ]}"#,
        )
        .unwrap();

        assert_eq!(images.of_kind(ArtworkKind::Poster).len(), 2);
        assert!(images.of_kind(ArtworkKind::Still).is_empty());
        assert_eq!(images.all().count(), 3);
        assert_eq!(
            images.best(ArtworkKind::Poster).map(|a| a.file_path.as_str()),
            Some("/p2.jpg")
        );
        assert!(images.backdrops[0].is_landscape());
    }

    #[test]
    fn test_aspect_ratio_fallback() {
        let poster: Artwork = from_str(r#"{"file_path": "/p.jpg", "width": 500, "height": 750}"#).unwrap();

        assert!((poster.aspect_ratio() - 0.6667).abs() < 0.001);
        assert!(!poster.is_landscape());
    }
}
