//! Resource types returned by the metadata service.
//!
//! Every type implements [`Describe`](crate::mapper::Describe), which is the
//! only place its document keys are spelled out.

mod artwork;
mod collection;
mod common;
mod configuration;
mod movie;
mod people;
mod tv;

pub use artwork::{Artwork, ArtworkKind, Images};
pub use collection::{Collection, CollectionSummary};
pub use common::{
    AlternativeTitle, AlternativeTitles, ExternalIds, Genre, GenreList, Keyword, Keywords,
    MediaType, ResultList, Video, Videos,
};
pub use configuration::{Configuration, ImageConfiguration};
pub use movie::{
    Movie, MovieListKind, MovieSummary, ProductionCompany, ProductionCountry, SpokenLanguage,
};
pub use people::{CastMember, CreditedWork, Credits, CrewMember, Gender, Person, PersonCredits, PersonSummary};
pub use tv::{Creator, Episode, Season, TvSeries, TvSummary};
