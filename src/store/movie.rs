use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::{Gateway, contains};
use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::{Movie, MovieSearch, Stored},
};

pub struct MovieStore;

impl MovieStore {
    /// Movies whose title contains `needle`, ASCII case-insensitively.
    pub async fn by_title(db: &DatabaseConnection, needle: &str) -> AppResult<Vec<Stored<Movie>>> {
        Self::search(db, &MovieSearch { title: Some(needle.to_string()), ..Default::default() })
            .await
    }

    pub async fn by_genre(db: &DatabaseConnection, genre: &str) -> AppResult<Vec<Stored<Movie>>> {
        Self::search(db, &MovieSearch { genre: Some(genre.to_string()), ..Default::default() })
            .await
    }

    /// Exact release year, with no sanity floor.
    pub async fn by_year(db: &DatabaseConnection, year: i32) -> AppResult<Vec<Stored<Movie>>> {
        let rows = movie::Entity::find()
            .filter(movie::Column::ReleaseYear.eq(year))
            .order_by_asc(movie::Column::Id)
            .all(db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Applies every filter present in `search`; with none present this is a
    /// plain listing.
    pub async fn search(
        db: &DatabaseConnection,
        search: &MovieSearch,
    ) -> AppResult<Vec<Stored<Movie>>> {
        let mut query = movie::Entity::find();
        if let Some(title) = search.title() {
            query = query.filter(contains(movie::Column::Title, title));
        }
        if let Some(genre) = search.genre() {
            query = query.filter(movie::Column::Genre.eq(genre));
        }
        if let Some(year) = search.year() {
            query = query.filter(movie::Column::ReleaseYear.eq(year));
        }

        let rows = query.order_by_asc(movie::Column::Id).all(db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Longest running time; ties go to the lowest id.
    pub async fn longest(db: &DatabaseConnection) -> AppResult<Option<Stored<Movie>>> {
        let row = movie::Entity::find()
            .order_by_desc(movie::Column::DurationMinutes)
            .order_by_asc(movie::Column::Id)
            .one(db)
            .await?;
        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl Gateway for MovieStore {
    const RESOURCE: &'static str = "Filme";

    type Data = Movie;

    async fn list(db: &DatabaseConnection) -> AppResult<Vec<Stored<Movie>>> {
        let rows = movie::Entity::find().order_by_asc(movie::Column::Id).all(db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(db: &DatabaseConnection, id: i32) -> AppResult<Option<Stored<Movie>>> {
        Ok(movie::Entity::find_by_id(id).one(db).await?.map(Into::into))
    }

    async fn create(db: &DatabaseConnection, data: Movie) -> AppResult<Stored<Movie>> {
        Ok(active(data).insert(db).await?.into())
    }

    async fn update(db: &DatabaseConnection, id: i32, data: Movie) -> AppResult<u64> {
        let res = movie::Entity::update_many()
            .set(active(data))
            .filter(movie::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<u64> {
        Ok(movie::Entity::delete_by_id(id).exec(db).await?.rows_affected)
    }

    async fn create_many(
        db: &DatabaseConnection,
        batch: Vec<Movie>,
    ) -> AppResult<Vec<Stored<Movie>>> {
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

fn active(data: Movie) -> movie::ActiveModel {
    movie::ActiveModel {
        id: NotSet,
        title: Set(data.title),
        release_year: Set(data.release_year),
        genre: Set(data.genre),
        duration_minutes: Set(data.duration_minutes),
        synopsis: Set(data.synopsis),
        poster_url: Set(data.poster_url),
    }
}

impl From<movie::Model> for Stored<Movie> {
    fn from(row: movie::Model) -> Self {
        Stored {
            id: row.id,
            data: Movie {
                title: row.title,
                release_year: row.release_year,
                genre: row.genre,
                duration_minutes: row.duration_minutes,
                synopsis: row.synopsis,
                poster_url: row.poster_url,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn movie(title: &str, year: i32, genre: &str, minutes: i32) -> Movie {
        Movie {
            title: title.into(),
            release_year: year,
            genre: genre.into(),
            duration_minutes: minutes,
            synopsis: String::new(),
            poster_url: format!("https://img.example/{}.jpg", title.to_lowercase()),
        }
    }

    async fn seeded() -> DatabaseConnection {
        let db = db::memory().await;
        MovieStore::create_many(
            &db,
            vec![
                movie("Inception", 2010, "Sci-Fi", 148),
                movie("Interstellar", 2014, "Sci-Fi", 169),
                movie("Cidade de Deus", 2002, "Drama", 130),
                movie("Tenet", 2020, "Sci-Fi", 150),
            ],
        )
        .await
        .unwrap();
        db
    }

    fn titles(movies: &[Stored<Movie>]) -> Vec<&str> {
        movies.iter().map(|m| m.data.title.as_str()).collect()
    }

    #[tokio::test]
    async fn by_year_matches_exactly() {
        let db = seeded().await;
        assert_eq!(titles(&MovieStore::by_year(&db, 2010).await.unwrap()), ["Inception"]);
        assert!(MovieStore::by_year(&db, 1800).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn title_and_genre_filters() {
        let db = seeded().await;
        assert_eq!(titles(&MovieStore::by_title(&db, "inter").await.unwrap()), ["Interstellar"]);
        assert_eq!(
            titles(&MovieStore::by_genre(&db, "Sci-Fi").await.unwrap()),
            ["Inception", "Interstellar", "Tenet"]
        );
        assert!(MovieStore::by_genre(&db, "sci-fi").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn title_wildcards_match_literally() {
        let db = seeded().await;
        assert!(MovieStore::by_title(&db, "_").await.unwrap().is_empty());
        assert!(MovieStore::by_title(&db, "%").await.unwrap().is_empty());
        assert!(MovieStore::by_title(&db, "Inc_ption").await.unwrap().is_empty());

        MovieStore::create(&db, movie("100% Wolf", 2020, "Animation", 96)).await.unwrap();
        assert_eq!(titles(&MovieStore::by_title(&db, "%").await.unwrap()), ["100% Wolf"]);
    }

    #[tokio::test]
    async fn combined_search() {
        let db = seeded().await;

        let search = MovieSearch {
            title: Some("In".into()),
            genre: Some("Sci-Fi".into()),
            year: Some(2014),
        };
        assert_eq!(titles(&MovieStore::search(&db, &search).await.unwrap()), ["Interstellar"]);

        // Years at or below the floor are not applied.
        let search =
            MovieSearch { genre: Some("Drama".into()), year: Some(1500), ..Default::default() };
        assert_eq!(titles(&MovieStore::search(&db, &search).await.unwrap()), ["Cidade de Deus"]);

        let everything = MovieStore::search(&db, &MovieSearch::default()).await.unwrap();
        assert_eq!(everything.len(), 4);
    }

    #[tokio::test]
    async fn longest_breaks_ties_by_id() {
        let db = seeded().await;
        assert_eq!(MovieStore::longest(&db).await.unwrap().unwrap().data.title, "Interstellar");

        MovieStore::create(&db, movie("Also Long", 2000, "Drama", 169)).await.unwrap();
        assert_eq!(MovieStore::longest(&db).await.unwrap().unwrap().data.title, "Interstellar");
    }

    #[tokio::test]
    async fn longest_of_nothing_is_absent() {
        let db = db::memory().await;
        assert_eq!(MovieStore::longest(&db).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_keeps_path_id() {
        let db = seeded().await;
        let changed =
            MovieStore::update(&db, 1, movie("Inception (Director's Cut)", 2010, "Sci-Fi", 150))
                .await
                .unwrap();
        assert_eq!(changed, 1);

        let row = MovieStore::get(&db, 1).await.unwrap().unwrap();
        assert_eq!(row.id, 1);
        assert_eq!(row.data.duration_minutes, 150);
        assert_eq!(MovieStore::list(&db).await.unwrap().len(), 4);
    }
}
