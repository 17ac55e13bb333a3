use super::{ExternalIds, Images, MediaType};
use crate::mapper::{Describe, TypeDescriptor};
use chrono::NaiveDate;
use serde::Serialize;

/// Gender as coded by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum Gender {
    #[default]
    NotSpecified,
    Female,
    Male,
    NonBinary,
}

impl From<i32> for Gender {
    fn from(code: i32) -> Self {
        match code {
            1 => Self::Female,
            2 => Self::Male,
            3 => Self::NonBinary,
            _ => Self::NotSpecified,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Person {
    pub id: i64,
    pub imdb_id: Option<String>,
    pub name: String,
    pub also_known_as: Vec<String>,
    pub biography: Option<String>,
    pub birthday: Option<String>,
    pub deathday: Option<String>,
    pub place_of_birth: Option<String>,
    pub gender: i32,
    pub homepage: Option<String>,
    pub known_for_department: Option<String>,
    pub adult: bool,
    pub popularity: f64,
    pub profile_path: Option<String>,

    // Appended sub-resources
    pub images: Option<Images>,
    pub external_ids: Option<ExternalIds>,
    pub combined_credits: Option<PersonCredits>,
}

impl Person {
    #[must_use]
    pub fn gender(&self) -> Gender {
        Gender::from(self.gender)
    }

    #[must_use]
    pub fn born_on(&self) -> Option<NaiveDate> {
        super::movie::parse_date(self.birthday.as_deref())
    }

    #[must_use]
    pub fn died_on(&self) -> Option<NaiveDate> {
        super::movie::parse_date(self.deathday.as_deref())
    }
}

impl Describe for Person {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("Person")
            .scalar("id", |p, v| p.id = v)
            .scalar("imdb_id", |p, v| p.imdb_id = v)
            .scalar("name", |p, v| p.name = v)
            .scalar("also_known_as", |p, v| p.also_known_as = v)
            .scalar("biography", |p, v| p.biography = v)
            .scalar("birthday", |p, v| p.birthday = v)
            .scalar("deathday", |p, v| p.deathday = v)
            .scalar("place_of_birth", |p, v| p.place_of_birth = v)
            .scalar("gender", |p, v| p.gender = v)
            .scalar("homepage", |p, v| p.homepage = v)
            .scalar("known_for_department", |p, v| p.known_for_department = v)
            .scalar("adult", |p, v| p.adult = v)
            .scalar("popularity", |p, v| p.popularity = v)
            .scalar("profile_path", |p, v| p.profile_path = v)
            .object("images", |p, v| p.images = Some(v))
            .object("external_ids", |p, v| p.external_ids = Some(v))
            .object("combined_credits", |p, v| p.combined_credits = Some(v))
            .build()
    }
}

/// Person entry as it appears in searches
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonSummary {
    pub id: i64,
    pub name: String,
    pub gender: i32,
    pub adult: bool,
    pub known_for_department: Option<String>,
    pub popularity: f64,
    pub profile_path: Option<String>,
    pub known_for: Vec<CreditedWork>,
}

impl Describe for PersonSummary {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("PersonSummary")
            .scalar("id", |p, v| p.id = v)
            .scalar("name", |p, v| p.name = v)
            .scalar("gender", |p, v| p.gender = v)
            .scalar("adult", |p, v| p.adult = v)
            .scalar("known_for_department", |p, v| p.known_for_department = v)
            .scalar("popularity", |p, v| p.popularity = v)
            .scalar("profile_path", |p, v| p.profile_path = v)
            .list("known_for", |p, v| p.known_for = v)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CastMember {
    pub id: i64,
    pub cast_id: Option<i64>,
    pub credit_id: Option<String>,
    pub name: String,
    pub original_name: Option<String>,
    pub character: Option<String>,
    pub order: Option<i32>,
    pub gender: i32,
    pub known_for_department: Option<String>,
    pub popularity: f64,
    pub profile_path: Option<String>,
}

impl Describe for CastMember {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("CastMember")
            .scalar("id", |c, v| c.id = v)
            .scalar("cast_id", |c, v| c.cast_id = v)
            .scalar("credit_id", |c, v| c.credit_id = v)
            .scalar("name", |c, v| c.name = v)
            .scalar("original_name", |c, v| c.original_name = v)
            .scalar("character", |c, v| c.character = v)
            .scalar("order", |c, v| c.order = v)
            .scalar("gender", |c, v| c.gender = v)
            .scalar("known_for_department", |c, v| c.known_for_department = v)
            .scalar("popularity", |c, v| c.popularity = v)
            .scalar("profile_path", |c, v| c.profile_path = v)
            .ignore("adult")
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrewMember {
    pub id: i64,
    pub credit_id: Option<String>,
    pub name: String,
    pub original_name: Option<String>,
    pub department: Option<String>,
    pub job: Option<String>,
    pub gender: i32,
    pub popularity: f64,
    pub profile_path: Option<String>,
}

impl Describe for CrewMember {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("CrewMember")
            .scalar("id", |c, v| c.id = v)
            .scalar("credit_id", |c, v| c.credit_id = v)
            .scalar("name", |c, v| c.name = v)
            .scalar("original_name", |c, v| c.original_name = v)
            .scalar("department", |c, v| c.department = v)
            .scalar("job", |c, v| c.job = v)
            .scalar("gender", |c, v| c.gender = v)
            .scalar("popularity", |c, v| c.popularity = v)
            .scalar("profile_path", |c, v| c.profile_path = v)
            .ignore("adult")
            .ignore("known_for_department")
            .build()
    }
}

/// Cast and crew of a movie, series or episode
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Credits {
    pub id: i64,
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}

impl Credits {
    pub fn directors(&self) -> impl Iterator<Item = &CrewMember> {
        self.crew_with_job("Director")
    }

    pub fn crew_with_job<'a>(&'a self, job: &'a str) -> impl Iterator<Item = &'a CrewMember> {
        self.crew
            .iter()
            .filter(move |c| c.job.as_deref() == Some(job))
    }

    /// Cast sorted by billing order; unordered entries go last
    #[must_use]
    pub fn billed_cast(&self) -> Vec<&CastMember> {
        let mut cast: Vec<_> = self.cast.iter().collect();
        cast.sort_by_key(|c| c.order.unwrap_or(i32::MAX));
        cast
    }
}

impl Describe for Credits {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("Credits")
            .scalar("id", |c, v| c.id = v)
            .list("cast", |c, v| c.cast = v)
            .list("crew", |c, v| c.crew = v)
            .build()
    }
}

/// A movie or series a person is credited on
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreditedWork {
    pub id: i64,
    pub credit_id: Option<String>,
    pub media_type: MediaType,
    pub title: Option<String>,
    pub name: Option<String>,
    pub character: Option<String>,
    pub department: Option<String>,
    pub job: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: f64,
}

impl CreditedWork {
    /// Movies carry a title, series a name
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }
}

impl Describe for CreditedWork {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("CreditedWork")
            .scalar("id", |w, v| w.id = v)
            .scalar("credit_id", |w, v| w.credit_id = v)
            .scalar("media_type", |w, v| w.media_type = v)
            .scalar("title", |w, v| w.title = v)
            .scalar("name", |w, v| w.name = v)
            .scalar("character", |w, v| w.character = v)
            .scalar("department", |w, v| w.department = v)
            .scalar("job", |w, v| w.job = v)
            .scalar("release_date", |w, v| w.release_date = v)
            .scalar("first_air_date", |w, v| w.first_air_date = v)
            .scalar("poster_path", |w, v| w.poster_path = v)
            .scalar("vote_average", |w, v| w.vote_average = v)
            .build()
    }
}

/// Everything a person appeared in or worked on
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonCredits {
    pub id: i64,
    pub cast: Vec<CreditedWork>,
    pub crew: Vec<CreditedWork>,
}

impl Describe for PersonCredits {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::<Self>::builder("PersonCredits")
            .scalar("id", |c, v| c.id = v)
            .list("cast", |c, v| c.cast = v)
            .list("crew", |c, v| c.crew = v)
            .build()
    }
}
