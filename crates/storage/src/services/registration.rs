//! Registering athletes to styles. A new registration seeds the rating ledger.

use tracing::info;

use crate::Database;
use crate::dto::style::StyleRegistration;
use crate::error::{Result, StorageError};
use crate::repository::style::StyleRepository;
use crate::services::rating;

/// Register one athlete to one style, seeding a 400 rating on first
/// registration. Registering again leaves the ledger untouched.
pub async fn register_athlete_to_style(
    db: &Database,
    athlete_id: i32,
    style_id: i32,
) -> Result<StyleRegistration> {
    let mut registrations = register_styles(db, athlete_id, &[style_id]).await?;
    registrations
        .pop()
        .ok_or_else(|| StorageError::Validation("style_id is required".to_string()))
}

/// Register one athlete to several styles in a single transaction.
pub async fn register_styles(
    db: &Database,
    athlete_id: i32,
    style_ids: &[i32],
) -> Result<Vec<StyleRegistration>> {
    if athlete_id <= 0 {
        return Err(StorageError::Validation("athlete_id is required".to_string()));
    }
    if let Some(bad) = style_ids.iter().find(|id| **id <= 0) {
        return Err(StorageError::Validation(format!("invalid style_id {bad}")));
    }

    let mut unique: Vec<i32> = style_ids.to_vec();
    unique.sort_unstable();
    unique.dedup();

    let mut tx = db.begin().await?;
    let mut registrations = Vec::with_capacity(unique.len());

    for style_id in unique {
        let registered = StyleRepository::register(&mut tx, athlete_id, style_id).await?;
        if registered {
            rating::seed_rating(&mut tx, athlete_id, style_id).await?;
        }
        registrations.push(StyleRegistration {
            athlete_id,
            style_id,
            registered,
        });
    }

    tx.commit().await?;

    let seeded = registrations.iter().filter(|r| r.registered).count();
    info!(athlete_id, seeded, "Registered athlete to {} style(s)", registrations.len());
    Ok(registrations)
}
