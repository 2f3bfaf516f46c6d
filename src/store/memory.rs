use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    error::AppResult,
    models::CreateMovie,
    store::{Movie, MovieStore},
};

/// In-memory store keyed by id, used by tests. One mutex critical section
/// per operation; the id counter is monotonic so ids are never reused even
/// after deletes.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    movies: BTreeMap<i64, Movie>,
    last_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieStore for MemoryStore {
    async fn list_all(&self) -> AppResult<Vec<Movie>> {
        let inner = self.inner.lock().await;
        Ok(inner.movies.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>> {
        let inner = self.inner.lock().await;
        Ok(inner.movies.get(&id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Movie>> {
        let inner = self.inner.lock().await;
        // BTreeMap iterates in ascending id order, so the first match is
        // the lowest id.
        Ok(inner.movies.values().find(|m| m.title == title).cloned())
    }

    async fn find_by_country(&self, country: &str) -> AppResult<Vec<Movie>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .movies
            .values()
            .rev()
            .filter(|m| m.country.as_deref() == Some(country))
            .cloned()
            .collect())
    }

    async fn count(&self) -> AppResult<u64> {
        let inner = self.inner.lock().await;
        Ok(inner.movies.len() as u64)
    }

    async fn insert(&self, new: CreateMovie) -> AppResult<Movie> {
        let mut inner = self.inner.lock().await;
        inner.last_id += 1;
        let movie = Movie {
            id: inner.last_id,
            title: new.title,
            description: new.description,
            director: new.director,
            country: new.country,
        };
        inner.movies.insert(movie.id, movie.clone());
        Ok(movie)
    }

    async fn update_title(&self, id: i64, title: &str) -> AppResult<Option<Movie>> {
        let mut inner = self.inner.lock().await;
        match inner.movies.get_mut(&id) {
            Some(movie) => {
                movie.title = title.to_string();
                Ok(Some(movie.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        let mut inner = self.inner.lock().await;
        Ok(inner.movies.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(title: &str, country: Option<&str>) -> CreateMovie {
        CreateMovie {
            title: title.to_string(),
            description: None,
            director: None,
            country: country.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_find_by_id_returns_it() {
        let store = MemoryStore::new();
        let created = store
            .insert(CreateMovie {
                title: "Shrek".to_string(),
                description: Some("ShrekDesc".to_string()),
                director: Some("Gato de botas".to_string()),
                country: Some("Pantano".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        let found = store.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.title, "Shrek");
        assert_eq!(found.description.as_deref(), Some("ShrekDesc"));
    }

    #[tokio::test]
    async fn count_matches_list_all_length() {
        let store = MemoryStore::new();
        assert_eq!(store.count().await.unwrap(), 0);

        for i in 0..3 {
            store.insert(payload(&format!("m{i}"), None)).await.unwrap();
        }
        assert_eq!(store.count().await.unwrap(), 3);
        assert_eq!(store.list_all().await.unwrap().len(), 3);

        store.delete_by_id(2).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_missing_id_fails_and_existing_id_removes() {
        let store = MemoryStore::new();
        assert!(!store.delete_by_id(99).await.unwrap());

        let created = store.insert(payload("gone", None)).await.unwrap();
        assert!(store.delete_by_id(created.id).await.unwrap());
        assert!(store.find_by_id(created.id).await.unwrap().is_none());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_missing_id_leaves_store_unchanged() {
        let store = MemoryStore::new();
        store.insert(payload("keep", None)).await.unwrap();

        assert!(store.update_title(42, "nope").await.unwrap().is_none());
        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "keep");
    }

    #[tokio::test]
    async fn update_changes_only_title() {
        let store = MemoryStore::new();
        let created = store
            .insert(CreateMovie {
                title: "before".to_string(),
                description: Some("desc".to_string()),
                director: Some("dir".to_string()),
                country: Some("BR".to_string()),
            })
            .await
            .unwrap();

        let updated = store.update_title(created.id, "after").await.unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "after");
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.director, created.director);
        assert_eq!(updated.country, created.country);
    }

    #[tokio::test]
    async fn find_by_country_exact_match_descending_id() {
        let store = MemoryStore::new();
        store.insert(payload("a", Some("BR"))).await.unwrap();
        store.insert(payload("b", Some("PT"))).await.unwrap();
        store.insert(payload("c", Some("BR"))).await.unwrap();
        store.insert(payload("d", None)).await.unwrap();

        let brs = store.find_by_country("BR").await.unwrap();
        assert_eq!(brs.iter().map(|m| m.id).collect::<Vec<_>>(), vec![3, 1]);

        assert!(store.find_by_country("XX").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_by_title_picks_lowest_id_among_duplicates() {
        let store = MemoryStore::new();
        let first = store.insert(payload("dup", Some("BR"))).await.unwrap();
        store.insert(payload("dup", Some("PT"))).await.unwrap();

        let found = store.find_by_title("dup").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);

        assert!(store.find_by_title("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let a = store.insert(payload("a", None)).await.unwrap();
        store.delete_by_id(a.id).await.unwrap();
        let b = store.insert(payload("b", None)).await.unwrap();
        assert!(b.id > a.id);
    }
}
