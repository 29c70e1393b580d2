#![allow(dead_code)]

use sqlx::PgPool;
use storage::Database;
use storage::dto::athlete::CreateAthleteRequest;
use storage::dto::style::CreateStyleRequest;
use storage::models::{Athlete, AthleteScore, Bout, Style};
use storage::repository::athlete::AthleteRepository;
use storage::repository::style::StyleRepository;
use storage::services::{bouts, credentials, registration};

pub async fn athlete(db: &Database, username: &str) -> Athlete {
    let req = CreateAthleteRequest {
        username: username.to_string(),
        first_name: username.to_string(),
        last_name: "Test".to_string(),
        email: format!("{username}@example.com"),
        birth_date: None,
        password: "correct-horse".to_string(),
        gym_id: None,
    };
    let hash = credentials::hash_password_with(&req.password, 1_000);
    let mut tx = db.begin().await.unwrap();
    let athlete = AthleteRepository::create(&mut tx, &req, &hash).await.unwrap();
    tx.commit().await.unwrap();
    athlete
}

pub async fn style(pool: &PgPool, name: &str) -> Style {
    StyleRepository::new(pool)
        .create(&CreateStyleRequest {
            style_name: name.to_string(),
        })
        .await
        .unwrap()
}

/// Two athletes registered to a fresh style, with a bout between them
/// already accepted.
pub struct Matchup {
    pub challenger: Athlete,
    pub acceptor: Athlete,
    pub referee: Athlete,
    pub style: Style,
    pub bout: Bout,
}

pub async fn accepted_bout(db: &Database, style_name: &str) -> Matchup {
    let pool = db.pool();
    let challenger = athlete(db, "challenger").await;
    let acceptor = athlete(db, "acceptor").await;
    let referee = athlete(db, "referee").await;
    let style = style(pool, style_name).await;

    for a in [&challenger, &acceptor] {
        registration::register_athlete_to_style(db, a.athlete_id, style.style_id)
            .await
            .unwrap();
    }

    let bout = bouts::create(db, challenger.athlete_id, acceptor.athlete_id, style.style_id)
        .await
        .unwrap();
    let bout = bouts::accept(db, bout.bout_id).await.unwrap();

    Matchup {
        challenger,
        acceptor,
        referee,
        style,
        bout,
    }
}

pub async fn bout(pool: &PgPool, bout_id: i32) -> Bout {
    sqlx::query_as::<_, Bout>("SELECT * FROM bout WHERE bout_id = $1")
        .bind(bout_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Every ledger row of an athlete, by style then in append order
pub async fn ledger(pool: &PgPool, athlete_id: i32) -> Vec<AthleteScore> {
    sqlx::query_as::<_, AthleteScore>(
        "SELECT * FROM athlete_score WHERE athlete_id = $1 ORDER BY style_id, score_id",
    )
    .bind(athlete_id)
    .fetch_all(pool)
    .await
    .unwrap()
}

pub async fn ledger_in(pool: &PgPool, athlete_id: i32, style_id: i32) -> Vec<AthleteScore> {
    ledger(pool, athlete_id)
        .await
        .into_iter()
        .filter(|row| row.style_id == style_id)
        .collect()
}

/// Each row after the seed must supersede exactly the row before it.
pub fn assert_unbroken(rows: &[AthleteScore]) {
    assert_eq!(rows[0].previous_score_id, None);
    for pair in rows.windows(2) {
        assert_eq!(pair[1].previous_score_id, Some(pair[0].score_id));
        assert_eq!(pair[1].previous_score, Some(pair[0].score));
    }
}
