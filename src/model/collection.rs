use super::{MovieSummary, movie::parse_date};
use crate::mapper::{Describe, TypeDescriptor};
use serde::Serialize;

/// Collection reference embedded in a movie
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub id: i64,
    pub name: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

impl Describe for CollectionSummary {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("CollectionSummary")
            .scalar("id", |c, v| c.id = v)
            .scalar("name", |c, v| c.name = v)
            .scalar("poster_path", |c, v| c.poster_path = v)
            .scalar("backdrop_path", |c, v| c.backdrop_path = v)
            .build()
    }
}

/// A franchise and the movies in it
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Collection {
    pub id: i64,
    pub name: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub parts: Vec<MovieSummary>,
}

impl Collection {
    /// Parts ordered by release date; undated parts go last
    #[must_use]
    pub fn parts_in_release_order(&self) -> Vec<&MovieSummary> {
        let mut parts: Vec<_> = self.parts.iter().collect();
        parts.sort_by_key(|p| {
            let date = parse_date(p.release_date.as_deref());
            (date.is_none(), date)
        });
        parts
    }
}

impl Describe for Collection {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("Collection")
            .scalar("id", |c, v| c.id = v)
            .scalar("name", |c, v| c.name = v)
            .scalar("overview", |c, v| c.overview = v)
            .scalar("poster_path", |c, v| c.poster_path = v)
            .scalar("backdrop_path", |c, v| c.backdrop_path = v)
            .list("parts", |c, v| c.parts = v)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::from_str;

    #[test]
    fn test_parts_in_release_order() {
        let collection: Collection = from_str(
            r#"{"id": 422837, "name": "Blade Runner Collection", "parts": [
                {"id": 335984, "title": "Blade Runner 2049", "release_date": "2017-10-04"},
                {"id": 1, "title": "Untitled", "release_date": ""},
                {"id": 78, "title": "Blade Runner", "release_date": "1982-06-25"}
            ]}"#,
        )
        .unwrap();

        let ids: Vec<_> = collection.parts_in_release_order().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![78, 335_984, 1]);
    }
}
