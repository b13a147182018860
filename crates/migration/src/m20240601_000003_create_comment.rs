//! Create `comment` table with FK to `recipe`.
//!
//! Comments are append-only; `created_at` is set by the application at insert.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(pk_auto(Comment::Id))
                    .col(string_len(Comment::Content, 500).not_null())
                    .col(timestamp_with_time_zone(Comment::CreatedAt).not_null())
                    .col(integer(Comment::RecipeId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_recipe")
                            .from(Comment::Table, Comment::RecipeId)
                            .to(Recipe::Table, Recipe::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Comment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Comment { Table, Id, Content, CreatedAt, RecipeId }

#[derive(DeriveIden)]
enum Recipe { Table, Id }
