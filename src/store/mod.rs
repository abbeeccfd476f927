//! Typed create/read/update/delete per entity, one [`Gateway`] implementation
//! per table. The connection is always passed in by the caller.

mod actor;
mod movie;
mod movie_actor;
mod rating;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection,
    sea_query::{Expr, LikeExpr, SimpleExpr},
};
use serde::{Serialize, de::DeserializeOwned};

pub use self::{
    actor::ActorStore, movie::MovieStore, movie_actor::MovieActorStore, rating::RatingStore,
};
use crate::{
    error::AppResult,
    models::{Stored, Validate},
};

#[async_trait]
pub trait Gateway: Send + Sync + 'static {
    /// Path segment under `/api/`.
    const RESOURCE: &'static str;

    type Data: Serialize + DeserializeOwned + Validate + Send + Sync + 'static;

    /// All rows, ascending id.
    async fn list(db: &DatabaseConnection) -> AppResult<Vec<Stored<Self::Data>>>;

    async fn get(db: &DatabaseConnection, id: i32) -> AppResult<Option<Stored<Self::Data>>>;

    async fn create(db: &DatabaseConnection, data: Self::Data) -> AppResult<Stored<Self::Data>>;

    /// Overwrites every mutable field of row `id`. Returns rows affected; the
    /// id itself is never rewritten.
    async fn update(db: &DatabaseConnection, id: i32, data: Self::Data) -> AppResult<u64>;

    /// Returns rows affected.
    async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<u64>;

    /// Inserts all rows in one transaction. An empty batch is rejected with
    /// [`AppError::BadRequest`](crate::error::AppError::BadRequest) before
    /// storage is touched.
    async fn create_many(
        db: &DatabaseConnection,
        batch: Vec<Self::Data>,
    ) -> AppResult<Vec<Stored<Self::Data>>>;
}

const LIKE_ESCAPE: char = '!';

/// `column LIKE '%needle%'` with `%`, `_` and the escape character matched
/// literally.
pub(crate) fn contains<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(needle));
    Expr::col(column).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escapes_like_metacharacters() {
        assert_eq!(escape_like("Tom"), "Tom");
        assert_eq!(escape_like("100%_off!"), "100!%!_off!!");
    }
}
