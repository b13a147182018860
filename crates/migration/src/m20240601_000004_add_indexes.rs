use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Recipe: title lookups from search
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_recipe_title")
                    .table(Recipe::Table)
                    .col(Recipe::Title)
                    .to_owned(),
            )
            .await?;

        // Rating: per-recipe average recompute
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_rating_recipe_id")
                    .table(Rating::Table)
                    .col(Rating::RecipeId)
                    .to_owned(),
            )
            .await?;

        // Comment: per-recipe listing
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_comment_recipe_id")
                    .table(Comment::Table)
                    .col(Comment::RecipeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_comment_recipe_id").table(Comment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_rating_recipe_id").table(Rating::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_recipe_title").table(Recipe::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Recipe { Table, Title }

#[derive(DeriveIden)]
enum Rating { Table, RecipeId }

#[derive(DeriveIden)]
enum Comment { Table, RecipeId }
