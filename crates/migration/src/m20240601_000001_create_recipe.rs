//! Create `recipe` table.
//!
//! `average_rating` is derived from the `rating` rows and starts at 0.0.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Recipe::Table)
                    .if_not_exists()
                    .col(pk_auto(Recipe::Id))
                    .col(string_len(Recipe::Title, 100).not_null())
                    .col(text(Recipe::Ingredients).not_null())
                    .col(text(Recipe::Instructions).not_null())
                    .col(string_len(Recipe::Cuisine, 50).not_null())
                    .col(string_len(Recipe::DietaryPreferences, 100).not_null())
                    .col(double(Recipe::AverageRating).not_null().default(0.0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Recipe::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Recipe {
    Table,
    Id,
    Title,
    Ingredients,
    Instructions,
    Cuisine,
    DietaryPreferences,
    AverageRating,
}
