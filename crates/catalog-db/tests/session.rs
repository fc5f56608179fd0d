//! Unit-of-work behaviour of `Session` against an in-memory database.

use catalog_core::{Category, Country, Owner};
use catalog_db::{Database, DbConfig, DbError};

async fn setup() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

async fn count(db: &Database, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(db.pool())
        .await
        .unwrap()
}

#[tokio::test]
async fn commit_reports_staged_row_count() {
    let db = setup().await;
    let mut session = db.session();

    session.add(&Category::new("Fire")).await.unwrap();
    session.add(&Category::new("Water")).await.unwrap();
    assert_eq!(session.staged_changes(), 2);
    assert!(session.in_transaction());

    assert_eq!(session.commit().await.unwrap(), 2);
    assert_eq!(session.staged_changes(), 0);
    assert!(!session.in_transaction());

    drop(session);
    assert_eq!(count(&db, "categories").await, 2);
}

#[tokio::test]
async fn commit_with_nothing_staged_is_zero() {
    let db = setup().await;
    let mut session = db.session();

    assert_eq!(session.commit().await.unwrap(), 0);
}

#[tokio::test]
async fn failed_statement_discards_everything_staged() {
    let db = setup().await;
    let mut session = db.session();

    session.add(&Category::new("Fire")).await.unwrap();

    // country 999 does not exist
    let err = session
        .add(&Owner::new("Ash", "Ketchum", 999))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

    assert_eq!(session.staged_changes(), 0);
    assert!(!session.in_transaction());
    assert_eq!(session.commit().await.unwrap(), 0);

    drop(session);
    assert_eq!(count(&db, "categories").await, 0);
    assert_eq!(count(&db, "owners").await, 0);
}

#[tokio::test]
async fn dropped_session_rolls_back() {
    let db = setup().await;

    {
        let mut session = db.session();
        session.add(&Category::new("Ghost")).await.unwrap();
        assert_eq!(session.staged_changes(), 1);
    }

    let mut session = db.session();
    assert!(session.categories().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn explicit_rollback_discards_and_session_stays_usable() {
    let db = setup().await;
    let mut session = db.session();

    session.add(&Country::new("Kanto")).await.unwrap();
    session.rollback().await.unwrap();
    assert_eq!(session.staged_changes(), 0);

    session.add(&Country::new("Johto")).await.unwrap();
    assert_eq!(session.commit().await.unwrap(), 1);

    let names: Vec<String> = session
        .countries()
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Johto".to_string()]);
}

#[tokio::test]
async fn session_is_reusable_after_commit() {
    let db = setup().await;
    let mut session = db.session();

    let mut fire = Category::new("Fire");
    assert!(session.categories().create(&mut fire).await.unwrap());

    let mut water = Category::new("Water");
    assert!(session.categories().create(&mut water).await.unwrap());

    assert_ne!(fire.id, water.id);
    assert_eq!(session.categories().list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_and_remove_report_matched_rows() {
    let db = setup().await;
    let mut session = db.session();

    let id = session.add(&Category::new("Fire")).await.unwrap();
    session.commit().await.unwrap();

    let mut renamed = Category::new("Flame");
    renamed.id = id;
    assert_eq!(session.update(&renamed).await.unwrap(), 1);

    let mut missing = Category::new("Nothing");
    missing.id = id + 100;
    assert_eq!(session.update(&missing).await.unwrap(), 0);
    assert_eq!(session.remove(&missing).await.unwrap(), 0);

    assert_eq!(session.commit().await.unwrap(), 1);
    let stored = session.categories().get_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Flame");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_sessions_queue_for_the_write_lock() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(DbConfig::new(dir.path().join("catalog.db")).max_connections(4))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..8 {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            let mut session = db.session();
            // Read first, then write, as the services do.
            let before = session.countries().list().await?;
            tokio::task::yield_now().await;
            session.add(&Country::new(format!("Region {}", i))).await?;
            let committed = session.commit().await?;
            Ok::<_, DbError>((before.len(), committed))
        }));
    }

    for handle in handles {
        let (_, committed) = handle.await.unwrap().unwrap();
        assert_eq!(committed, 1);
    }

    let mut session = db.session();
    assert_eq!(session.countries().list().await.unwrap().len(), 8);
    drop(session);
    db.close().await;
}
