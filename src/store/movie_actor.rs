use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::Gateway;
use crate::{
    entities::movie_actor,
    error::{AppError, AppResult},
    models::{MovieActor, Stored},
};

pub struct MovieActorStore;

#[async_trait]
impl Gateway for MovieActorStore {
    const RESOURCE: &'static str = "FilmeAtor";

    type Data = MovieActor;

    async fn list(db: &DatabaseConnection) -> AppResult<Vec<Stored<MovieActor>>> {
        let rows =
            movie_actor::Entity::find().order_by_asc(movie_actor::Column::Id).all(db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(db: &DatabaseConnection, id: i32) -> AppResult<Option<Stored<MovieActor>>> {
        Ok(movie_actor::Entity::find_by_id(id).one(db).await?.map(Into::into))
    }

    async fn create(db: &DatabaseConnection, data: MovieActor) -> AppResult<Stored<MovieActor>> {
        Ok(active(data).insert(db).await?.into())
    }

    async fn update(db: &DatabaseConnection, id: i32, data: MovieActor) -> AppResult<u64> {
        let res = movie_actor::Entity::update_many()
            .set(active(data))
            .filter(movie_actor::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<u64> {
        Ok(movie_actor::Entity::delete_by_id(id).exec(db).await?.rows_affected)
    }

    async fn create_many(
        db: &DatabaseConnection,
        batch: Vec<MovieActor>,
    ) -> AppResult<Vec<Stored<MovieActor>>> {
        if batch.is_empty() {
            return Err(AppError::BadRequest);
        }

        let txn = db.begin().await?;
        let mut stored = Vec::with_capacity(batch.len());
        for data in batch {
            stored.push(active(data).insert(&txn).await?.into());
        }
        txn.commit().await?;

        Ok(stored)
    }
}

fn active(data: MovieActor) -> movie_actor::ActiveModel {
    movie_actor::ActiveModel {
        id: NotSet,
        movie_id: Set(data.movie_id),
        actor_id: Set(data.actor_id),
    }
}

impl From<movie_actor::Model> for Stored<MovieActor> {
    fn from(row: movie_actor::Model) -> Self {
        Stored { id: row.id, data: MovieActor { movie_id: row.movie_id, actor_id: row.actor_id } }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[tokio::test]
    async fn accepts_dangling_references() {
        let db = db::memory().await;
        let link = MovieActorStore::create(&db, MovieActor { movie_id: 404, actor_id: 405 })
            .await
            .unwrap();
        assert_eq!(link.data, MovieActor { movie_id: 404, actor_id: 405 });
        assert_eq!(MovieActorStore::get(&db, link.id).await.unwrap(), Some(link));
    }

    #[tokio::test]
    async fn crud_cycle() {
        let db = db::memory().await;
        let links = MovieActorStore::create_many(
            &db,
            vec![MovieActor { movie_id: 1, actor_id: 1 }, MovieActor { movie_id: 1, actor_id: 2 }],
        )
        .await
        .unwrap();
        assert_eq!(links.len(), 2);

        let changed =
            MovieActorStore::update(&db, links[1].id, MovieActor { movie_id: 2, actor_id: 2 })
                .await
                .unwrap();
        assert_eq!(changed, 1);

        assert_eq!(MovieActorStore::delete(&db, links[0].id).await.unwrap(), 1);
        let remaining = MovieActorStore::list(&db).await.unwrap();
        assert_eq!(
            remaining,
            vec![Stored { id: links[1].id, data: MovieActor { movie_id: 2, actor_id: 2 } }]
        );
    }
}
