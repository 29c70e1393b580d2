mod common;

use sqlx::PgPool;
use storage::Database;
use storage::error::StorageError;
use storage::models::BoutState;
use storage::services::bouts;

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_challenge_starts_pending(pool: PgPool) {
    let db = Database::from_pool(pool);
    let a = common::athlete(&db, "ana").await;
    let b = common::athlete(&db, "bea").await;
    let judo = common::style(db.pool(), "judo").await;

    let bout = bouts::create(&db, a.athlete_id, b.athlete_id, judo.style_id)
        .await
        .unwrap();

    assert_eq!(bout.state, BoutState::Pending);
    assert_eq!(bout.referee_id, None);

    let pending = bouts::get_pending(&db, b.athlete_id).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].challenger.username, "ana");
    assert_eq!(pending[0].style_name, "judo");
    assert!(!pending[0].accepted);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_self_challenge_is_rejected(pool: PgPool) {
    let db = Database::from_pool(pool);
    let a = common::athlete(&db, "ana").await;
    let judo = common::style(db.pool(), "judo").await;

    let err = bouts::create(&db, a.athlete_id, a.athlete_id, judo.style_id)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_challenge_against_missing_athlete_is_not_found(pool: PgPool) {
    let db = Database::from_pool(pool);
    let a = common::athlete(&db, "ana").await;
    let judo = common::style(db.pool(), "judo").await;

    let err = bouts::create(&db, a.athlete_id, 9_999, judo.style_id)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_accept_then_decline_fails(pool: PgPool) {
    let db = Database::from_pool(pool);
    let a = common::athlete(&db, "ana").await;
    let b = common::athlete(&db, "bea").await;
    let judo = common::style(db.pool(), "judo").await;
    let bout = bouts::create(&db, a.athlete_id, b.athlete_id, judo.style_id)
        .await
        .unwrap();

    let accepted = bouts::accept(&db, bout.bout_id).await.unwrap();
    assert_eq!(accepted.state, BoutState::Accepted);

    let err = bouts::decline(&db, bout.bout_id).await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidTransition(_)));

    let err = bouts::accept(&db, bout.bout_id).await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidTransition(_)));

    let incomplete = bouts::get_incomplete(&db, a.athlete_id).await.unwrap();
    assert_eq!(incomplete.len(), 1);
    assert!(incomplete[0].accepted);
    assert!(!incomplete[0].completed);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_decline_keeps_the_bout(pool: PgPool) {
    let db = Database::from_pool(pool);
    let a = common::athlete(&db, "ana").await;
    let b = common::athlete(&db, "bea").await;
    let judo = common::style(db.pool(), "judo").await;
    let bout = bouts::create(&db, a.athlete_id, b.athlete_id, judo.style_id)
        .await
        .unwrap();

    let declined = bouts::decline(&db, bout.bout_id).await.unwrap();
    assert_eq!(declined.state, BoutState::Declined);

    let view = bouts::get(&db, bout.bout_id).await.unwrap();
    assert!(view.declined);
    assert!(bouts::get_pending(&db, b.athlete_id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_accept_missing_bout_is_invalid_transition(pool: PgPool) {
    let db = Database::from_pool(pool);

    let err = bouts::accept(&db, 4_242).await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidTransition(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_cancel_rules(pool: PgPool) {
    let db = Database::from_pool(pool);
    let m = common::accepted_bout(&db, "judo").await;

    let err = bouts::cancel(&db, m.bout.bout_id, m.acceptor.athlete_id)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Forbidden(_)));

    let cancelled = bouts::cancel(&db, m.bout.bout_id, m.challenger.athlete_id)
        .await
        .unwrap();
    assert_eq!(cancelled.state, BoutState::Cancelled);

    let err = bouts::cancel(&db, m.bout.bout_id, m.challenger.athlete_id)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::InvalidTransition(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_complete_requires_an_outcome(pool: PgPool) {
    let db = Database::from_pool(pool);
    let m = common::accepted_bout(&db, "judo").await;

    let err = bouts::complete(&db, m.bout.bout_id, m.referee.athlete_id)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::InvalidTransition(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_update_only_while_pending(pool: PgPool) {
    let db = Database::from_pool(pool);
    let a = common::athlete(&db, "ana").await;
    let b = common::athlete(&db, "bea").await;
    let c = common::athlete(&db, "cam").await;
    let judo = common::style(db.pool(), "judo").await;
    let bout = bouts::create(&db, a.athlete_id, b.athlete_id, judo.style_id)
        .await
        .unwrap();

    let updated = bouts::update(&db, bout.bout_id, a.athlete_id, c.athlete_id, judo.style_id)
        .await
        .unwrap();
    assert_eq!(updated.acceptor_id, c.athlete_id);

    bouts::accept(&db, bout.bout_id).await.unwrap();
    let err = bouts::update(&db, bout.bout_id, a.athlete_id, b.athlete_id, judo.style_id)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::InvalidTransition(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_delete_pending_bout(pool: PgPool) {
    let db = Database::from_pool(pool);
    let a = common::athlete(&db, "ana").await;
    let b = common::athlete(&db, "bea").await;
    let judo = common::style(db.pool(), "judo").await;
    let bout = bouts::create(&db, a.athlete_id, b.athlete_id, judo.style_id)
        .await
        .unwrap();

    bouts::delete(&db, bout.bout_id).await.unwrap();
    assert!(matches!(
        bouts::get(&db, bout.bout_id).await,
        Err(StorageError::NotFound)
    ));
}
