use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::Gateway;
use crate::{
    entities::rating,
    error::{AppError, AppResult},
    models::{Rating, RatingExtreme, Stored},
};

pub struct RatingStore;

impl RatingStore {
    /// The single row at one end of a column's range; ties go to the lowest id.
    pub async fn extreme(
        db: &DatabaseConnection,
        which: RatingExtreme,
    ) -> AppResult<Option<Stored<Rating>>> {
        let (column, order) = match which {
            RatingExtreme::HighestScore => (rating::Column::Score, Order::Desc),
            RatingExtreme::LowestScore => (rating::Column::Score, Order::Asc),
            RatingExtreme::MostPopular => (rating::Column::Popularity, Order::Desc),
            RatingExtreme::LeastPopular => (rating::Column::Popularity, Order::Asc),
            RatingExtreme::MostVoted => (rating::Column::VoteCount, Order::Desc),
            RatingExtreme::LeastVoted => (rating::Column::VoteCount, Order::Asc),
        };

        let row = rating::Entity::find()
            .order_by(column, order)
            .order_by_asc(rating::Column::Id)
            .one(db)
            .await?;
        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl Gateway for RatingStore {
    const RESOURCE: &'static str = "Avaliacao";

    type Data = Rating;

    async fn list(db: &DatabaseConnection) -> AppResult<Vec<Stored<Rating>>> {
        let rows = rating::Entity::find().order_by_asc(rating::Column::Id).all(db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(db: &DatabaseConnection, id: i32) -> AppResult<Option<Stored<Rating>>> {
        Ok(rating::Entity::find_by_id(id).one(db).await?.map(Into::into))
    }

    async fn create(db: &DatabaseConnection, data: Rating) -> AppResult<Stored<Rating>> {
        Ok(active(data).insert(db).await?.into())
    }

    async fn update(db: &DatabaseConnection, id: i32, data: Rating) -> AppResult<u64> {
        let res = rating::Entity::update_many()
            .set(active(data))
            .filter(rating::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<u64> {
        Ok(rating::Entity::delete_by_id(id).exec(db).await?.rows_affected)
    }

    async fn create_many(
        db: &DatabaseConnection,
        batch: Vec<Rating>,
    ) -> AppResult<Vec<Stored<Rating>>> {
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

fn active(data: Rating) -> rating::ActiveModel {
    rating::ActiveModel {
        id: NotSet,
        score: Set(data.score),
        popularity: Set(data.popularity),
        vote_count: Set(data.vote_count),
        movie_id: Set(data.movie_id),
    }
}

impl From<rating::Model> for Stored<Rating> {
    fn from(row: rating::Model) -> Self {
        Stored {
            id: row.id,
            data: Rating {
                score: row.score,
                popularity: row.popularity,
                vote_count: row.vote_count,
                movie_id: row.movie_id,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn rating(score: f64, popularity: i32, vote_count: i32) -> Rating {
        Rating { score, popularity, vote_count, movie_id: 1 }
    }

    async fn top(db: &DatabaseConnection, which: RatingExtreme) -> i32 {
        RatingStore::extreme(db, which).await.unwrap().unwrap().id
    }

    #[tokio::test]
    async fn extremes() {
        let db = db::memory().await;
        let stored = RatingStore::create_many(
            &db,
            vec![rating(9.0, 10, 500), rating(3.0, 80, 20), rating(6.5, 40, 9000)],
        )
        .await
        .unwrap();
        let (a, b, c) = (stored[0].id, stored[1].id, stored[2].id);

        assert_eq!(top(&db, RatingExtreme::HighestScore).await, a);
        assert_eq!(top(&db, RatingExtreme::LowestScore).await, b);
        assert_eq!(top(&db, RatingExtreme::MostPopular).await, b);
        assert_eq!(top(&db, RatingExtreme::LeastPopular).await, a);
        assert_eq!(top(&db, RatingExtreme::MostVoted).await, c);
        assert_eq!(top(&db, RatingExtreme::LeastVoted).await, b);
    }

    #[tokio::test]
    async fn ties_go_to_lowest_id() {
        let db = db::memory().await;
        let stored = RatingStore::create_many(&db, vec![rating(7.0, 5, 5), rating(7.0, 5, 5)])
            .await
            .unwrap();

        let ties =
            [RatingExtreme::HighestScore, RatingExtreme::LowestScore, RatingExtreme::MostVoted];
        for which in ties {
            assert_eq!(top(&db, which).await, stored[0].id);
        }
    }

    #[tokio::test]
    async fn no_ratings_no_extreme() {
        let db = db::memory().await;
        assert_eq!(RatingStore::extreme(&db, RatingExtreme::MostPopular).await.unwrap(), None);
    }
}
