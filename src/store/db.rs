use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::{
    entities::movie,
    error::AppResult,
    models::CreateMovie,
    store::{Movie, MovieStore},
};

/// Sea-orm backed store. The underlying table uses an auto-increment
/// primary key, so id assignment and uniqueness live in the database.
#[derive(Clone)]
pub struct DbStore {
    db: DatabaseConnection,
}

impl DbStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MovieStore for DbStore {
    async fn list_all(&self) -> AppResult<Vec<Movie>> {
        let movies =
            movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?;
        Ok(movies)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>> {
        let found = movie::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found)
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Movie>> {
        // Lowest id wins when the title is shared.
        let found = movie::Entity::find()
            .filter(movie::Column::Title.eq(title))
            .order_by_asc(movie::Column::Id)
            .one(&self.db)
            .await?;
        Ok(found)
    }

    async fn find_by_country(&self, country: &str) -> AppResult<Vec<Movie>> {
        let movies = movie::Entity::find()
            .filter(movie::Column::Country.eq(country))
            .order_by_desc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(movies)
    }

    async fn count(&self) -> AppResult<u64> {
        let n = movie::Entity::find().count(&self.db).await?;
        Ok(n)
    }

    async fn insert(&self, new: CreateMovie) -> AppResult<Movie> {
        let model = movie::ActiveModel {
            id: NotSet,
            title: Set(new.title),
            description: Set(new.description),
            director: Set(new.director),
            country: Set(new.country),
        };
        let created = model.insert(&self.db).await?;
        Ok(created)
    }

    async fn update_title(&self, id: i64, title: &str) -> AppResult<Option<Movie>> {
        let Some(existing) = movie::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut model: movie::ActiveModel = existing.into();
        model.title = Set(title.to_string());
        let updated = model.update(&self.db).await?;
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
