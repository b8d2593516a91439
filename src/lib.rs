//! Browse popular movies from a remote catalog and keep a local list of
//! favorites.
//!
//! The library holds everything below the terminal UI: the catalog client,
//! the movie codec, the key-value stores and the favorites repository.
//!
//! # Quick Start
//!
//! ```no_run
//! use movie_shelf::{fetch_popular, CatalogSettings, FavoritesRepository, JsonFileStore};
//!
//! let movies = fetch_popular(&CatalogSettings::default()).unwrap();
//!
//! let store = JsonFileStore::open("favorites.json").unwrap();
//! let mut favorites = FavoritesRepository::new(store);
//! if let Some(first) = movies.first() {
//!     favorites.favorite(first);
//! }
//! for movie in favorites.list() {
//!     println!("{}: {}", movie.id, movie.title);
//! }
//! ```

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod favorites;
pub mod feed;
pub mod models;
pub mod store;
pub mod tui;

// Re-export the main public types at the crate root for convenience.
pub use client::{fetch_popular, CatalogClient};
pub use config::CatalogSettings;
pub use error::{CatalogError, DecodeError, StoreError};
pub use favorites::{FavoritesRepository, Toggle};
pub use feed::{FeedUpdate, PopularFeed};
pub use models::{MovieId, MovieRecord, PopularPage};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
