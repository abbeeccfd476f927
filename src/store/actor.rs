use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::{Gateway, contains};
use crate::{
    entities::actor,
    error::{AppError, AppResult},
    models::{Actor, Stored},
};

pub struct ActorStore;

impl ActorStore {
    /// Actors whose name contains `needle`, ASCII case-insensitively.
    pub async fn by_name(db: &DatabaseConnection, needle: &str) -> AppResult<Vec<Stored<Actor>>> {
        let rows = actor::Entity::find()
            .filter(contains(actor::Column::Name, needle))
            .order_by_asc(actor::Column::Id)
            .all(db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn by_nationality(
        db: &DatabaseConnection,
        nationality: &str,
    ) -> AppResult<Vec<Stored<Actor>>> {
        let rows = actor::Entity::find()
            .filter(actor::Column::Nationality.eq(nationality))
            .order_by_asc(actor::Column::Id)
            .all(db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl Gateway for ActorStore {
    const RESOURCE: &'static str = "Ator";

    type Data = Actor;

    async fn list(db: &DatabaseConnection) -> AppResult<Vec<Stored<Actor>>> {
        let rows = actor::Entity::find().order_by_asc(actor::Column::Id).all(db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(db: &DatabaseConnection, id: i32) -> AppResult<Option<Stored<Actor>>> {
        Ok(actor::Entity::find_by_id(id).one(db).await?.map(Into::into))
    }

    async fn create(db: &DatabaseConnection, data: Actor) -> AppResult<Stored<Actor>> {
        Ok(active(data).insert(db).await?.into())
    }

    async fn update(db: &DatabaseConnection, id: i32, data: Actor) -> AppResult<u64> {
        let res = actor::Entity::update_many()
            .set(active(data))
            .filter(actor::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<u64> {
        Ok(actor::Entity::delete_by_id(id).exec(db).await?.rows_affected)
    }

    async fn create_many(
        db: &DatabaseConnection,
        batch: Vec<Actor>,
    ) -> AppResult<Vec<Stored<Actor>>> {
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

fn active(data: Actor) -> actor::ActiveModel {
    actor::ActiveModel {
        id: NotSet,
        name: Set(data.name),
        birth_date: Set(data.birth_date.map(|d| d.to_string())),
        nationality: Set(data.nationality),
    }
}

impl From<actor::Model> for Stored<Actor> {
    fn from(row: actor::Model) -> Self {
        Stored {
            id: row.id,
            data: Actor {
                name: row.name,
                birth_date: row.birth_date.and_then(|d| d.parse().ok()),
                nationality: row.nationality,
            },
        }
    }
}
