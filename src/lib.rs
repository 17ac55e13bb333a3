//! Typed client for a movie metadata web service.
//!
//! Responses are parsed into a [`mapper::Document`] and turned into model types
//! by the descriptor-driven [`mapper::Populator`]. Each model type declares the
//! keys it understands once, in its [`mapper::Describe`] implementation.
//!
//! ```no_run
//! use cinemap::{AppendToResponse, TmdbClient};
//!
//! # async fn run() -> cinemap::client::Result<()> {
//! let client = TmdbClient::new("api-key")?.with_language("en-US");
//! let movie = client.movie(78, &[AppendToResponse::Credits]).await?;
//! println!("{} ({:?})", movie.title, movie.release_year());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod mapper;
pub mod model;
pub mod telemetry;

pub use client::{AppendToResponse, ClientError, SearchOptions, TmdbClient};
pub use config::Settings;
pub use mapper::{Describe, Document, PopulateError, Populator};
