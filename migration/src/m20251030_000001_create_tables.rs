use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Actor::Table)
                    .if_not_exists()
                    .col(pk_auto(Actor::Id))
                    .col(string_len(Actor::Name, 100))
                    .col(string_null(Actor::BirthDate))
                    .col(string_len(Actor::Nationality, 50))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    .col(pk_auto(Movie::Id))
                    .col(string_len(Movie::Title, 200))
                    .col(integer(Movie::ReleaseYear))
                    .col(string_len(Movie::Genre, 50))
                    .col(integer(Movie::DurationMinutes))
                    .col(string_len(Movie::Synopsis, 500))
                    .col(string_len(Movie::PosterUrl, 150))
                    .to_owned(),
            )
            .await?;

        // movie_id / actor_id are logical references only, no FK constraints.
        manager
            .create_table(
                Table::create()
                    .table(MovieActor::Table)
                    .if_not_exists()
                    .col(pk_auto(MovieActor::Id))
                    .col(integer(MovieActor::MovieId))
                    .col(integer(MovieActor::ActorId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Rating::Table)
                    .if_not_exists()
                    .col(pk_auto(Rating::Id))
                    .col(double(Rating::Score))
                    .col(integer(Rating::Popularity))
                    .col(integer(Rating::VoteCount))
                    .col(integer(Rating::MovieId))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Rating::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(MovieActor::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Movie::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Actor::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Actor {
    Table,
    Id,
    Name,
    BirthDate,
    Nationality,
}

#[derive(DeriveIden)]
enum Movie {
    Table,
    Id,
    Title,
    ReleaseYear,
    Genre,
    DurationMinutes,
    Synopsis,
    PosterUrl,
}

#[derive(DeriveIden)]
enum MovieActor {
    Table,
    Id,
    MovieId,
    ActorId,
}

#[derive(DeriveIden)]
enum Rating {
    Table,
    Id,
    Score,
    Popularity,
    VoteCount,
    MovieId,
}
