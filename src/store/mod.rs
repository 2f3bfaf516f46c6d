//! Persistence abstraction for the movie collection.
//!
//! Exactly one implementation backs a running service: [`db::DbStore`] in
//! production, [`memory::MemoryStore`] in tests. Handlers only ever see the
//! trait.

pub mod db;
pub mod memory;

use async_trait::async_trait;

use crate::{entities::movie, error::AppResult, models::CreateMovie};

pub type Movie = movie::Model;

#[async_trait]
pub trait MovieStore: Send + Sync {
    /// All movies, ascending by id. Stable across calls absent mutation.
    async fn list_all(&self) -> AppResult<Vec<Movie>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>>;

    /// Exact-title lookup. When several movies share the title, the one
    /// with the lowest id wins.
    async fn find_by_title(&self, title: &str) -> AppResult<Option<Movie>>;

    /// Exact-country matches, descending by id.
    async fn find_by_country(&self, country: &str) -> AppResult<Vec<Movie>>;

    async fn count(&self) -> AppResult<u64>;

    /// Inserts a new movie and returns it with its assigned id. Ids are
    /// never reused within a store instance.
    async fn insert(&self, movie: CreateMovie) -> AppResult<Movie>;

    /// Replaces the title of the movie with the given id. Returns `None`
    /// (store unchanged) if no such movie exists; no other field changes.
    async fn update_title(&self, id: i64, title: &str) -> AppResult<Option<Movie>>;

    /// Returns true iff a movie with the given id existed and was removed.
    async fn delete_by_id(&self, id: i64) -> AppResult<bool>;
}
