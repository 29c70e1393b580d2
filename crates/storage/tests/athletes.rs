use sqlx::PgPool;
use storage::Database;
use storage::dto::athlete::CreateAthleteRequest;
use storage::error::StorageError;
use storage::repository::athlete::AthleteRepository;
use storage::repository::record::RecordRepository;

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_create_athlete_starts_empty_record_in_bounded_transaction(pool: PgPool) {
    let db = Database::from_pool(pool);
    let req = CreateAthleteRequest {
        username: "ana".to_string(),
        first_name: "Ana".to_string(),
        last_name: "Silva".to_string(),
        email: "ana@example.com".to_string(),
        birth_date: None,
        password: "correct-horse".to_string(),
        gym_id: None,
    };

    let mut tx = db.begin().await.unwrap();
    let lock_timeout: String = sqlx::query_scalar("SHOW lock_timeout")
        .fetch_one(&mut *tx)
        .await
        .unwrap();
    assert_eq!(lock_timeout, "5s");
    let athlete = AthleteRepository::create(&mut tx, &req, "hash").await.unwrap();
    tx.commit().await.unwrap();

    let record = RecordRepository::new(db.pool())
        .find_by_athlete(athlete.athlete_id)
        .await
        .unwrap();
    assert_eq!((record.wins, record.losses, record.draws), (0, 0, 0));

    let mut tx = db.begin().await.unwrap();
    let err = AthleteRepository::create(&mut tx, &req, "hash").await.unwrap_err();
    assert!(matches!(err, StorageError::Conflict(_)));
    tx.rollback().await.unwrap();

    assert_eq!(
        AthleteRepository::new(db.pool()).list_usernames().await.unwrap(),
        vec!["ana".to_string()]
    );
}
