//! Daily goal business logic - Handles goal lookup, carry-forward, and upsert.
//!
//! Goals persist until explicitly changed. When a day has no goal of its own, the most
//! recent earlier goal applies. [`resolve_goal`] copies that goal onto the requested day
//! the first time it is read, so later reads are a single exact-date lookup.
//! [`find_effective_goal`] answers the same question without writing anything.

use crate::{
    core::nutrition::Macros,
    entities::{DailyGoal, daily_goal},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::OnConflict};
use tracing::debug;

/// Finds the goal stored for exactly `date`.
pub async fn get_goal_for_date<C>(
    db: &C,
    user_id: i64,
    date: NaiveDate,
) -> Result<Option<daily_goal::Model>>
where
    C: ConnectionTrait,
{
    DailyGoal::find()
        .filter(daily_goal::Column::UserId.eq(user_id))
        .filter(daily_goal::Column::Date.eq(date))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the most recent goal strictly before `date`.
pub async fn get_latest_goal_before<C>(
    db: &C,
    user_id: i64,
    date: NaiveDate,
) -> Result<Option<daily_goal::Model>>
where
    C: ConnectionTrait,
{
    DailyGoal::find()
        .filter(daily_goal::Column::UserId.eq(user_id))
        .filter(daily_goal::Column::Date.lt(date))
        .order_by_desc(daily_goal::Column::Date)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the goal in effect on `date` without persisting anything.
///
/// This is the exact-date goal if one exists, otherwise the most recent earlier goal.
/// The returned row may therefore carry an earlier `date` than requested.
pub async fn find_effective_goal(
    db: &DatabaseConnection,
    user_id: i64,
    date: NaiveDate,
) -> Result<Option<daily_goal::Model>> {
    if let Some(goal) = get_goal_for_date(db, user_id, date).await? {
        return Ok(Some(goal));
    }
    get_latest_goal_before(db, user_id, date).await
}

/// Returns the goal in effect on `date`, materialising a carried-forward goal as a row
/// for `date`.
///
/// Returns `None` only when the user has never set a goal on or before `date`.
pub async fn resolve_goal(
    db: &DatabaseConnection,
    user_id: i64,
    date: NaiveDate,
) -> Result<Option<daily_goal::Model>> {
    if let Some(goal) = get_goal_for_date(db, user_id, date).await? {
        return Ok(Some(goal));
    }

    let Some(previous) = get_latest_goal_before(db, user_id, date).await? else {
        return Ok(None);
    };

    debug!(
        user_id,
        from = %previous.date,
        to = %date,
        "Carrying daily goal forward"
    );

    insert_carried_goal(db, user_id, date, Macros::from(&previous)).await?;

    let goal = get_goal_for_date(db, user_id, date)
        .await?
        .ok_or_else(|| missing_goal(user_id, date))?;
    Ok(Some(goal))
}

/// Stores `targets` as the goal for `date` unless a row for that day already exists.
async fn insert_carried_goal(
    db: &DatabaseConnection,
    user_id: i64,
    date: NaiveDate,
    targets: Macros,
) -> Result<()> {
    let now = chrono::Utc::now();
    let carried = daily_goal::ActiveModel {
        user_id: Set(user_id),
        date: Set(date),
        calories: Set(targets.calories),
        protein: Set(targets.protein),
        carbs: Set(targets.carbs),
        fat: Set(targets.fat),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    // A concurrent reader may have materialised the same day already; keep its row.
    DailyGoal::insert(carried)
        .on_conflict(
            OnConflict::columns([daily_goal::Column::UserId, daily_goal::Column::Date])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}

/// Sets `user_id`'s goal for `date`, overwriting any goal already stored for that day.
///
/// # Errors
/// Returns a validation error if any target is negative or not finite, or a database
/// error if the write fails.
pub async fn upsert_goal(
    db: &DatabaseConnection,
    user_id: i64,
    date: NaiveDate,
    targets: Macros,
) -> Result<daily_goal::Model> {
    let targets = targets.validate()?;
    let now = chrono::Utc::now();

    let goal = daily_goal::ActiveModel {
        user_id: Set(user_id),
        date: Set(date),
        calories: Set(targets.calories),
        protein: Set(targets.protein),
        carbs: Set(targets.carbs),
        fat: Set(targets.fat),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    DailyGoal::insert(goal)
        .on_conflict(
            OnConflict::columns([daily_goal::Column::UserId, daily_goal::Column::Date])
                .update_columns([
                    daily_goal::Column::Calories,
                    daily_goal::Column::Protein,
                    daily_goal::Column::Carbs,
                    daily_goal::Column::Fat,
                    daily_goal::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    get_goal_for_date(db, user_id, date)
        .await?
        .ok_or_else(|| missing_goal(user_id, date))
}

fn missing_goal(user_id: i64, date: NaiveDate) -> Error {
    Error::Database(DbErr::RecordNotFound(format!(
        "daily goal for user {user_id} on {date}"
    )))
}
