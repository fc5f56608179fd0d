//! Service-boundary behaviour: existence, duplicates, guards and cascades.

use catalog_core::{Category, Country, Owner, Pokemon, Review, Reviewer};
use catalog_db::{Database, DbConfig};
use catalog_service::{Catalog, ErrorCode, ServiceError};
use chrono::NaiveDate;

async fn catalog() -> Catalog {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    Catalog::new(db)
}

fn born() -> NaiveDate {
    NaiveDate::from_ymd_opt(1903, 1, 1).unwrap()
}

struct World {
    country: Country,
    owner: Owner,
    category: Category,
    reviewer: Reviewer,
    pokemon: Pokemon,
}

async fn world(catalog: &Catalog) -> World {
    let country = catalog.countries().create(Country::new("Kanto")).await.unwrap();
    let owner = catalog
        .owners()
        .create(country.id, Owner::new("Ash", "Ketchum", 0))
        .await
        .unwrap();
    let category = catalog
        .categories()
        .create(Category::new("Electric"))
        .await
        .unwrap();
    let reviewer = catalog
        .reviewers()
        .create(Reviewer::new("Teddy", "Smith"))
        .await
        .unwrap();
    let pokemon = catalog
        .pokemon()
        .create(owner.id, category.id, Pokemon::new("Pikachu", born()))
        .await
        .unwrap();

    World {
        country,
        owner,
        category,
        reviewer,
        pokemon,
    }
}

async fn review(catalog: &Catalog, w: &World, title: &str, rating: i32) -> Review {
    catalog
        .reviews()
        .create(
            w.reviewer.id,
            w.pokemon.id,
            Review::new(title, "text", rating, 0, 0),
        )
        .await
        .unwrap()
}

// =============================================================================
// Creation
// =============================================================================

#[tokio::test]
async fn duplicate_names_conflict_after_trim_and_case_fold() {
    let catalog = catalog().await;
    catalog.categories().create(Category::new("Fire")).await.unwrap();

    let err = catalog
        .categories()
        .create(Category::new("fire "))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict { .. }));
    assert_eq!(err.status_code(), 422);
    assert_eq!(catalog.categories().list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn owner_duplicate_needs_both_names() {
    let catalog = catalog().await;
    let w = world(&catalog).await;

    let misty = catalog
        .owners()
        .create(w.country.id, Owner::new("Misty", "Ketchum", 0))
        .await;
    assert!(misty.is_ok());

    let err = catalog
        .owners()
        .create(w.country.id, Owner::new(" ash", "KETCHUM", 0))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn reviewer_duplicate_is_by_last_name() {
    let catalog = catalog().await;
    catalog
        .reviewers()
        .create(Reviewer::new("Teddy", "Smith"))
        .await
        .unwrap();

    let err = catalog
        .reviewers()
        .create(Reviewer::new("Anna", "smith"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn created_entities_carry_their_ids() {
    let catalog = catalog().await;
    let w = world(&catalog).await;

    assert_ne!(w.pokemon.id, 0);
    assert_eq!(catalog.pokemon().get(w.pokemon.id).await.unwrap(), w.pokemon);
    assert_eq!(catalog.owners().get(w.owner.id).await.unwrap().country_id, w.country.id);
    assert_eq!(
        catalog.pokemon().get_by_name("Pikachu").await.unwrap().id,
        w.pokemon.id
    );
}

#[tokio::test]
async fn blank_name_is_a_validation_error() {
    let catalog = catalog().await;

    let err = catalog
        .countries()
        .create(Country::new("   "))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn owner_with_unknown_country_is_not_found() {
    let catalog = catalog().await;

    let err = catalog
        .owners()
        .create(99, Owner::new("Brock", "Harrison", 0))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert!(catalog.owners().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn pokemon_with_unknown_category_writes_nothing() {
    let catalog = catalog().await;
    let w = world(&catalog).await;

    let err = catalog
        .pokemon()
        .create(w.owner.id, 99, Pokemon::new("Squirtle", born()))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);

    assert_eq!(catalog.pokemon().list().await.unwrap().len(), 1);
    assert_eq!(catalog.owners().pokemon(w.owner.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn review_rating_out_of_range_is_rejected() {
    let catalog = catalog().await;
    let w = world(&catalog).await;

    for rating in [0, 6] {
        let err = catalog
            .reviews()
            .create(
                w.reviewer.id,
                w.pokemon.id,
                Review::new("Too much", "", rating, 0, 0),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }
}

#[tokio::test]
async fn review_for_unknown_pokemon_is_not_found() {
    let catalog = catalog().await;
    let w = world(&catalog).await;

    let err = catalog
        .reviews()
        .create(w.reviewer.id, 99, Review::new("Ghost", "", 3, 0, 0))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
}

// =============================================================================
// Lookup
// =============================================================================

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let catalog = catalog().await;

    assert_eq!(catalog.categories().get(1).await.unwrap_err().status_code(), 404);
    assert_eq!(catalog.categories().pokemon(1).await.unwrap_err().status_code(), 404);
    assert_eq!(catalog.countries().owners(1).await.unwrap_err().status_code(), 404);
    assert_eq!(catalog.countries().of_owner(1).await.unwrap_err().status_code(), 404);
    assert_eq!(catalog.owners().pokemon(1).await.unwrap_err().status_code(), 404);
    assert_eq!(catalog.pokemon().rating(1).await.unwrap_err().status_code(), 404);
    assert_eq!(catalog.pokemon().get_by_name("Mew").await.unwrap_err().status_code(), 404);
    assert_eq!(catalog.reviewers().reviews(1).await.unwrap_err().status_code(), 404);
    assert_eq!(catalog.reviews().get(1).await.unwrap_err().status_code(), 404);
}

#[tokio::test]
async fn traversals_through_services() {
    let catalog = catalog().await;
    let w = world(&catalog).await;

    assert_eq!(
        catalog.categories().pokemon(w.category.id).await.unwrap(),
        vec![w.pokemon.clone()]
    );
    assert_eq!(
        catalog.pokemon().owners(w.pokemon.id).await.unwrap(),
        vec![w.owner.clone()]
    );
    assert_eq!(
        catalog.pokemon().categories(w.pokemon.id).await.unwrap(),
        vec![w.category.clone()]
    );
    assert_eq!(
        catalog.countries().of_owner(w.owner.id).await.unwrap(),
        w.country
    );
}

#[tokio::test]
async fn rating_is_zero_then_mean() {
    let catalog = catalog().await;
    let w = world(&catalog).await;

    let empty = catalog.pokemon().rating(w.pokemon.id).await.unwrap();
    assert_eq!(empty.mean(), 0.0);

    review(&catalog, &w, "Great", 5).await;
    review(&catalog, &w, "Good", 4).await;
    review(&catalog, &w, "Also good", 4).await;

    let rating = catalog.pokemon().rating(w.pokemon.id).await.unwrap();
    assert_eq!(rating.count(), 3);
    assert_eq!(rating.hundredths(), 433);
    assert_eq!(catalog.pokemon().reviews(w.pokemon.id).await.unwrap().len(), 3);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn update_checks_id_then_existence() {
    let catalog = catalog().await;
    let w = world(&catalog).await;

    let mut renamed = w.category.clone();
    renamed.name = "Thunder".to_string();

    let mismatch = catalog
        .categories()
        .update(renamed.id + 1, renamed.clone())
        .await
        .unwrap_err();
    assert_eq!(mismatch.status_code(), 400);

    let mut ghost = renamed.clone();
    ghost.id = 99;
    let missing = catalog.categories().update(99, ghost).await.unwrap_err();
    assert_eq!(missing.status_code(), 404);

    catalog
        .categories()
        .update(renamed.id, renamed.clone())
        .await
        .unwrap();
    assert_eq!(
        catalog.categories().get(renamed.id).await.unwrap().name,
        "Thunder"
    );
}

// =============================================================================
// Deletion
// =============================================================================

#[tokio::test]
async fn category_in_use_cannot_be_deleted() {
    let catalog = catalog().await;
    let w = world(&catalog).await;

    let err = catalog.categories().delete(w.category.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::ReferentialIntegrity { .. }));
    assert_eq!(err.status_code(), 409);
    assert!(catalog.categories().get(w.category.id).await.is_ok());

    let unused = catalog
        .categories()
        .create(Category::new("Dragon"))
        .await
        .unwrap();
    catalog.categories().delete(unused.id).await.unwrap();
    assert_eq!(
        catalog.categories().get(unused.id).await.unwrap_err().code(),
        ErrorCode::NotFound
    );
}

#[tokio::test]
async fn country_with_owners_cannot_be_deleted() {
    let catalog = catalog().await;
    let w = world(&catalog).await;

    let err = catalog.countries().delete(w.country.id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::ReferentialIntegrity);
}

#[tokio::test]
async fn reviewer_delete_cascades_to_reviews() {
    let catalog = catalog().await;
    let w = world(&catalog).await;

    review(&catalog, &w, "First", 5).await;
    review(&catalog, &w, "Second", 2).await;

    catalog.reviewers().delete(w.reviewer.id).await.unwrap();

    assert!(catalog.reviews().list().await.unwrap().is_empty());
    assert_eq!(
        catalog.reviewers().get(w.reviewer.id).await.unwrap_err().code(),
        ErrorCode::NotFound
    );
}

#[tokio::test]
async fn reviewer_stays_when_review_batch_fails() {
    let catalog = catalog().await;
    let w = world(&catalog).await;
    review(&catalog, &w, "First", 5).await;
    review(&catalog, &w, "Second", 2).await;

    sqlx::query(
        "CREATE TRIGGER reviews_locked BEFORE DELETE ON reviews \
         BEGIN SELECT RAISE(ABORT, 'reviews are locked'); END",
    )
    .execute(catalog.database().pool())
    .await
    .unwrap();

    let err = catalog.reviewers().delete(w.reviewer.id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::StorageFailure);
    assert_eq!(err.status_code(), 500);

    assert_eq!(catalog.reviewers().get(w.reviewer.id).await.unwrap().id, w.reviewer.id);
    assert_eq!(catalog.reviewers().reviews(w.reviewer.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn reviewer_without_reviews_is_deleted() {
    let catalog = catalog().await;
    let lonely = catalog
        .reviewers()
        .create(Reviewer::new("Jessica", "McGregor"))
        .await
        .unwrap();

    catalog.reviewers().delete(lonely.id).await.unwrap();
    assert!(catalog.reviewers().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn pokemon_delete_removes_reviews_and_links() {
    let catalog = catalog().await;
    let w = world(&catalog).await;
    review(&catalog, &w, "Great", 5).await;

    catalog.pokemon().delete(w.pokemon.id).await.unwrap();

    assert!(catalog.pokemon().list().await.unwrap().is_empty());
    assert!(catalog.reviews().list().await.unwrap().is_empty());
    assert!(catalog.owners().pokemon(w.owner.id).await.unwrap().is_empty());

    // the category is free again
    catalog.categories().delete(w.category.id).await.unwrap();
}

#[tokio::test]
async fn owner_delete_keeps_pokemon() {
    let catalog = catalog().await;
    let w = world(&catalog).await;

    catalog.owners().delete(w.owner.id).await.unwrap();

    assert!(catalog.pokemon().owners(w.pokemon.id).await.unwrap().is_empty());
    assert!(catalog.pokemon().get(w.pokemon.id).await.is_ok());

    // with the owner gone the country can go too
    catalog.countries().delete(w.country.id).await.unwrap();
}

#[tokio::test]
async fn deleting_unknown_ids_is_not_found() {
    let catalog = catalog().await;

    assert_eq!(catalog.categories().delete(5).await.unwrap_err().status_code(), 404);
    assert_eq!(catalog.countries().delete(5).await.unwrap_err().status_code(), 404);
    assert_eq!(catalog.owners().delete(5).await.unwrap_err().status_code(), 404);
    assert_eq!(catalog.pokemon().delete(5).await.unwrap_err().status_code(), 404);
    assert_eq!(catalog.reviews().delete(5).await.unwrap_err().status_code(), 404);
    assert_eq!(catalog.reviewers().delete(5).await.unwrap_err().status_code(), 404);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_on_a_file_database_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(DbConfig::new(dir.path().join("catalog.db")).max_connections(5))
        .await
        .unwrap();
    let catalog = Catalog::new(db);

    let mut handles = Vec::new();
    for i in 0..16 {
        let catalog = catalog.clone();
        handles.push(tokio::spawn(async move {
            catalog.categories().create(Category::new(format!("Cat{}", i))).await
        }));
    }

    for handle in handles {
        let created = handle.await.unwrap().unwrap();
        assert!(created.id > 0);
    }

    assert_eq!(catalog.categories().list().await.unwrap().len(), 16);
    catalog.database().close().await;
}
