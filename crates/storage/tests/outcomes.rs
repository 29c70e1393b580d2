mod common;

use std::time::Duration;

use sqlx::PgPool;
use storage::Database;
use storage::dto::outcome::{CreateOutcomeRequest, RecordBoutOutcomeRequest};
use storage::error::StorageError;
use storage::models::BoutState;
use storage::repository::record::RecordRepository;
use storage::repository::score::ScoreRepository;
use storage::services::{bouts, outcomes, registration};

fn standalone(winner_id: i32, loser_id: i32, style_id: i32) -> CreateOutcomeRequest {
    CreateOutcomeRequest {
        bout_id: None,
        winner_id,
        loser_id,
        style_id,
        is_draw: false,
    }
}

fn win(winner_id: i32, loser_id: i32, style_id: i32, referee_id: Option<i32>) -> RecordBoutOutcomeRequest {
    RecordBoutOutcomeRequest {
        winner_id,
        loser_id,
        style_id,
        is_draw: false,
        referee_id,
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_registration_seeds_one_row(pool: PgPool) {
    let db = Database::from_pool(pool);
    let c = common::athlete(&db, "cam").await;
    let judo = common::style(db.pool(), "judo").await;

    let first = registration::register_athlete_to_style(&db, c.athlete_id, judo.style_id)
        .await
        .unwrap();
    assert!(first.registered);
    let again = registration::register_athlete_to_style(&db, c.athlete_id, judo.style_id)
        .await
        .unwrap();
    assert!(!again.registered);

    let rows = common::ledger(db.pool(), c.athlete_id).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].score, 400);
    assert_eq!(rows[0].previous_score, None);
    assert_eq!(rows[0].previous_score_id, None);
    assert_eq!(rows[0].outcome_id, None);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_outcome_for_bout_updates_everything(pool: PgPool) {
    let db = Database::from_pool(pool);
    let m = common::accepted_bout(&db, "judo").await;
    let (a, b) = (m.challenger.athlete_id, m.acceptor.athlete_id);
    let scores = ScoreRepository::new(db.pool());
    let seed_a = common::ledger(db.pool(), a).await.remove(0);

    let outcome = outcomes::create_for_bout(
        &db,
        m.bout.bout_id,
        &win(a, b, m.style.style_id, Some(m.referee.athlete_id)),
    )
    .await
    .unwrap();
    assert_eq!(outcome.bout_id, Some(m.bout.bout_id));

    let a_rows = common::ledger(db.pool(), a).await;
    let b_rows = common::ledger(db.pool(), b).await;
    assert_eq!(a_rows.len(), 2);
    assert_eq!(b_rows.len(), 2);

    let a_new = &a_rows[1];
    assert_eq!(a_new.score, 416);
    assert_eq!(a_new.previous_score, Some(400));
    assert_eq!(a_new.previous_score_id, Some(seed_a.score_id));
    assert_eq!(a_new.outcome_id, Some(outcome.outcome_id));
    assert_eq!(b_rows[1].score, 384);
    assert_eq!(b_rows[1].outcome_id, Some(outcome.outcome_id));

    let bout = common::bout(db.pool(), m.bout.bout_id).await;
    assert_eq!(bout.state, BoutState::Completed);
    assert_eq!(bout.referee_id, Some(m.referee.athlete_id));

    let records = RecordRepository::new(db.pool());
    let ra = records.find_by_athlete(a).await.unwrap();
    let rb = records.find_by_athlete(b).await.unwrap();
    assert_eq!((ra.wins, ra.losses, ra.draws), (1, 0, 0));
    assert_eq!((rb.wins, rb.losses, rb.draws), (0, 1, 0));

    let current = scores.current(a, m.style.style_id).await.unwrap();
    assert_eq!(current.score, 416);
    let history = scores.history(a, m.style.style_id).await.unwrap();
    let values: Vec<i32> = history.history.iter().map(|h| h.score).collect();
    assert_eq!(values, vec![400, 416]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_second_outcome_is_rejected_without_new_ledger_rows(pool: PgPool) {
    let db = Database::from_pool(pool);
    let m = common::accepted_bout(&db, "judo").await;
    let (a, b) = (m.challenger.athlete_id, m.acceptor.athlete_id);
    let req = win(a, b, m.style.style_id, None);

    outcomes::create_for_bout(&db, m.bout.bout_id, &req).await.unwrap();
    let err = outcomes::create_for_bout(&db, m.bout.bout_id, &req)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::InvalidTransition(_)));

    let err = bouts::complete(&db, m.bout.bout_id, m.referee.athlete_id)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::InvalidTransition(_)));

    let rows = common::ledger(db.pool(), a).await;
    assert_eq!(rows.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_concurrent_submissions_apply_once(pool: PgPool) {
    let db = Database::from_pool(pool);
    let m = common::accepted_bout(&db, "judo").await;
    let (a, b) = (m.challenger.athlete_id, m.acceptor.athlete_id);
    let first = win(a, b, m.style.style_id, None);
    let second = win(b, a, m.style.style_id, None);

    let (r1, r2) = tokio::join!(
        outcomes::create_for_bout(&db, m.bout.bout_id, &first),
        outcomes::create_for_bout(&db, m.bout.bout_id, &second),
    );

    let successes = [r1.is_ok(), r2.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1);
    let err = r1.err().or(r2.err()).unwrap();
    assert!(matches!(
        err,
        StorageError::InvalidTransition(_) | StorageError::Conflict(_)
    ));

    assert_eq!(common::ledger(db.pool(), a).await.len(), 2);
    assert_eq!(common::ledger(db.pool(), b).await.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_outcome_on_pending_bout_is_invalid_transition(pool: PgPool) {
    let db = Database::from_pool(pool);
    let a = common::athlete(&db, "ana").await;
    let b = common::athlete(&db, "bea").await;
    let judo = common::style(db.pool(), "judo").await;
    let bout = bouts::create(&db, a.athlete_id, b.athlete_id, judo.style_id)
        .await
        .unwrap();

    let err = outcomes::create_for_bout(
        &db,
        bout.bout_id,
        &win(a.athlete_id, b.athlete_id, judo.style_id, None),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, StorageError::InvalidTransition(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_outcome_for_missing_bout_is_not_found(pool: PgPool) {
    let db = Database::from_pool(pool);

    let err = outcomes::create_for_bout(&db, 777, &win(1, 2, 1, None))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_unregistered_style_rolls_back(pool: PgPool) {
    let db = Database::from_pool(pool);
    let a = common::athlete(&db, "ana").await;
    let b = common::athlete(&db, "bea").await;
    let judo = common::style(db.pool(), "judo").await;
    registration::register_athlete_to_style(&db, a.athlete_id, judo.style_id)
        .await
        .unwrap();

    let err = outcomes::create(
        &db,
        &CreateOutcomeRequest {
            bout_id: None,
            winner_id: a.athlete_id,
            loser_id: b.athlete_id,
            style_id: judo.style_id,
            is_draw: false,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));

    assert!(outcomes::get_all(&db).await.unwrap().is_empty());
    let rows = common::ledger(db.pool(), a.athlete_id).await;
    assert_eq!(rows.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_standalone_outcome_then_referee_completes(pool: PgPool) {
    let db = Database::from_pool(pool);
    let m = common::accepted_bout(&db, "bjj").await;
    let (a, b) = (m.challenger.athlete_id, m.acceptor.athlete_id);

    let outcome = outcomes::create(
        &db,
        &CreateOutcomeRequest {
            bout_id: Some(m.bout.bout_id),
            winner_id: b,
            loser_id: a,
            style_id: m.style.style_id,
            is_draw: true,
        },
    )
    .await
    .unwrap();

    let err = bouts::cancel(&db, m.bout.bout_id, a).await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidTransition(_)));

    let completed = bouts::complete(&db, m.bout.bout_id, m.referee.athlete_id)
        .await
        .unwrap();
    assert_eq!(completed.state, BoutState::Completed);

    let by_bout = outcomes::get_by_bout_id(&db, m.bout.bout_id).await.unwrap();
    assert_eq!(by_bout.outcome_id, outcome.outcome_id);

    let records = RecordRepository::new(db.pool());
    assert_eq!(records.find_by_athlete(a).await.unwrap().draws, 1);
    assert_eq!(records.find_by_athlete(b).await.unwrap().draws, 1);

    let scores = ScoreRepository::new(db.pool());
    assert_eq!(scores.current(a, m.style.style_id).await.unwrap().score, 400);
    assert_eq!(scores.current(b, m.style.style_id).await.unwrap().score, 400);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_delayed_outcome_builds_on_newer_rating(pool: PgPool) {
    let db = Database::from_pool(pool);
    // Created first so its pair is locked before the others'.
    let cam = common::athlete(&db, "cam").await;
    let ana = common::athlete(&db, "ana").await;
    let bea = common::athlete(&db, "bea").await;
    let judo = common::style(db.pool(), "judo").await;
    for athlete in [&cam, &ana, &bea] {
        registration::register_athlete_to_style(&db, athlete.athlete_id, judo.style_id)
            .await
            .unwrap();
    }
    let (a, b, c, style) = (ana.athlete_id, bea.athlete_id, cam.athlete_id, judo.style_id);

    // Hold cam's pair so the next outcome opens its transaction and then waits.
    let mut holder = db.begin().await.unwrap();
    ScoreRepository::lock_pair(&mut holder, c, style).await.unwrap();

    let delayed = tokio::spawn({
        let db = db.clone();
        async move { outcomes::create(&db, &standalone(a, c, style)).await }
    });
    tokio::time::sleep(Duration::from_millis(300)).await;

    outcomes::create(&db, &standalone(a, b, style)).await.unwrap();
    holder.rollback().await.unwrap();
    delayed.await.unwrap().unwrap();

    let rows = common::ledger_in(db.pool(), a, style).await;
    let values: Vec<i32> = rows.iter().map(|r| r.score).collect();
    assert_eq!(values, vec![400, 416, 431]);
    common::assert_unbroken(&rows);

    let scores = ScoreRepository::new(db.pool());
    assert_eq!(scores.current(a, style).await.unwrap().score, 431);
    let current = scores.current_for_athlete(a).await.unwrap();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].score, 431);
    let history = scores.history(a, style).await.unwrap();
    let history: Vec<i32> = history.history.iter().map(|h| h.score).collect();
    assert_eq!(history, vec![400, 416, 431]);

    outcomes::create(&db, &standalone(a, b, style)).await.unwrap();
    let rows = common::ledger_in(db.pool(), a, style).await;
    assert_eq!(rows.len(), 4);
    common::assert_unbroken(&rows);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_concurrent_bouts_sharing_an_athlete_both_apply(pool: PgPool) {
    let db = Database::from_pool(pool);
    let ana = common::athlete(&db, "ana").await;
    let bea = common::athlete(&db, "bea").await;
    let cam = common::athlete(&db, "cam").await;
    let judo = common::style(db.pool(), "judo").await;
    for athlete in [&ana, &bea, &cam] {
        registration::register_athlete_to_style(&db, athlete.athlete_id, judo.style_id)
            .await
            .unwrap();
    }
    let (a, b, c, style) = (ana.athlete_id, bea.athlete_id, cam.athlete_id, judo.style_id);

    let mut bout_ids = Vec::new();
    for opponent in [b, c] {
        let bout = bouts::create(&db, a, opponent, style).await.unwrap();
        bouts::accept(&db, bout.bout_id).await.unwrap();
        bout_ids.push(bout.bout_id);
    }

    let (w1, w2) = (win(a, b, style, None), win(a, c, style, None));
    let (r1, r2) = tokio::join!(
        outcomes::create_for_bout(&db, bout_ids[0], &w1),
        outcomes::create_for_bout(&db, bout_ids[1], &w2),
    );
    r1.unwrap();
    r2.unwrap();

    let rows = common::ledger_in(db.pool(), a, style).await;
    let values: Vec<i32> = rows.iter().map(|r| r.score).collect();
    assert_eq!(values, vec![400, 416, 431]);
    common::assert_unbroken(&rows);

    let record = RecordRepository::new(db.pool()).find_by_athlete(a).await.unwrap();
    assert_eq!((record.wins, record.losses, record.draws), (2, 0, 0));
    for bout_id in bout_ids {
        assert_eq!(common::bout(db.pool(), bout_id).await.state, BoutState::Completed);
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_opposite_results_in_two_styles_do_not_deadlock(pool: PgPool) {
    let db = Database::from_pool(pool);
    let ana = common::athlete(&db, "ana").await;
    let bea = common::athlete(&db, "bea").await;
    let judo = common::style(db.pool(), "judo").await;
    let bjj = common::style(db.pool(), "bjj").await;
    for athlete in [&ana, &bea] {
        registration::register_styles(&db, athlete.athlete_id, &[judo.style_id, bjj.style_id])
            .await
            .unwrap();
    }
    let (a, b) = (ana.athlete_id, bea.athlete_id);

    const ROUNDS: i32 = 30;
    for _ in 0..ROUNDS {
        let (o1, o2) = (standalone(a, b, judo.style_id), standalone(b, a, bjj.style_id));
        let (r1, r2) = tokio::join!(
            outcomes::create(&db, &o1),
            outcomes::create(&db, &o2),
        );
        r1.unwrap();
        r2.unwrap();
    }

    let records = RecordRepository::new(db.pool());
    let ra = records.find_by_athlete(a).await.unwrap();
    let rb = records.find_by_athlete(b).await.unwrap();
    assert_eq!((ra.wins, ra.losses), (ROUNDS, ROUNDS));
    assert_eq!((rb.wins, rb.losses), (ROUNDS, ROUNDS));

    for style in [judo.style_id, bjj.style_id] {
        let rows = common::ledger_in(db.pool(), a, style).await;
        assert_eq!(rows.len() as i32, ROUNDS + 1);
        common::assert_unbroken(&rows);
    }
}
