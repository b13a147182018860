
/// Integration tests combining recipes with their ratings and comments
pub mod integration_tests {
    use crate::{comment, rating, recipe};
    use sea_orm::{EntityTrait, ModelTrait, PaginatorTrait, TransactionTrait};
    use anyhow::Result;

    use super::crud_tests::{sample_input, setup_test_db};

    /// Recipe -> ratings/comments navigation through the declared relations
    #[tokio::test]
    async fn test_related_rows() -> Result<()> {
        let db = setup_test_db().await?;

        let r = recipe::create(&db, &sample_input("Pad thai")).await?;
        rating::create(&db, r.id, 4.0).await?;
        comment::create(&db, r.id, "Loved it").await?;

        let ratings = r.find_related(rating::Entity).all(&db).await?;
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings[0].recipe_id, r.id);

        let comments = r.find_related(comment::Entity).all(&db).await?;
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].content, "Loved it");

        let parent = ratings[0].find_related(recipe::Entity).one(&db).await?;
        assert_eq!(parent.map(|p| p.id), Some(r.id));
        Ok(())
    }

    /// Deleting a recipe removes every dependent row
    #[tokio::test]
    async fn test_cascade_delete() -> Result<()> {
        let db = setup_test_db().await?;

        let keep = recipe::create(&db, &sample_input("Keep me")).await?;
        let gone = recipe::create(&db, &sample_input("Delete me")).await?;
        for v in [2.0, 5.0] {
            rating::create(&db, gone.id, v).await?;
        }
        for c in ["a", "b", "c"] {
            comment::create(&db, gone.id, c).await?;
        }
        rating::create(&db, keep.id, 3.0).await?;
        comment::create(&db, keep.id, "stays").await?;

        let txn = db.begin().await?;
        assert!(recipe::delete_with_dependents(&txn, gone.id).await?);
        txn.commit().await?;

        assert!(recipe::find(&db, gone.id).await?.is_none());
        assert!(rating::list_for_recipe(&db, gone.id).await?.is_empty());
        assert!(comment::list_for_recipe(&db, gone.id).await?.is_empty());

        assert_eq!(rating::Entity::find().count(&db).await?, 1);
        assert_eq!(comment::Entity::find().count(&db).await?, 1);

        assert!(!recipe::delete_with_dependents(&db, gone.id).await?);
        Ok(())
    }

    /// A rolled back transaction leaves the recipe and its rows intact
    #[tokio::test]
    async fn test_delete_rollback() -> Result<()> {
        let db = setup_test_db().await?;
        let r = recipe::create(&db, &sample_input("Rollback")).await?;
        rating::create(&db, r.id, 1.0).await?;

        let txn = db.begin().await?;
        recipe::delete_with_dependents(&txn, r.id).await?;
        txn.rollback().await?;

        assert!(recipe::find(&db, r.id).await?.is_some());
        assert_eq!(rating::list_for_recipe(&db, r.id).await?.len(), 1);
        Ok(())
    }
}
