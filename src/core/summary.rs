//! Daily progress for one user: what was eaten, the goal in effect, and what is left.
//!
//! This is the data behind the home screen. Unlike the leaderboard, it resolves the goal
//! through [`goal::resolve_goal`], so viewing a new day materialises the carried goal.

use crate::{
    core::{
        food_entry, goal,
        leaderboard::MacroCompletion,
        nutrition::{Macros, aggregate},
    },
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::Serialize;

/// One user's progress on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    /// Day being summarised
    pub date: NaiveDate,
    /// Macros eaten
    pub totals: Macros,
    /// Goal in effect, if any
    pub goal: Option<Macros>,
    /// Per-macro completion against the goal
    pub completion: Option<MacroCompletion>,
    /// Average of `completion`, 0 without a goal
    pub average_completion: f64,
    /// Goal minus totals; negative values mean the goal was exceeded
    pub remaining: Option<Macros>,
    /// Number of entries logged
    pub entries_count: usize,
}

/// Summarises `user_id`'s intake on `date` against their effective goal.
pub async fn daily_summary(
    db: &DatabaseConnection,
    user_id: i64,
    date: NaiveDate,
) -> Result<DailySummary> {
    let entries = food_entry::list_entries_for_date(db, user_id, date).await?;
    let totals = aggregate(&entries);
    let goal = goal::resolve_goal(db, user_id, date)
        .await?
        .as_ref()
        .map(Macros::from);
    let completion = goal.map(|targets| MacroCompletion::between(totals, targets));

    Ok(DailySummary {
        date,
        totals,
        goal,
        completion,
        average_completion: completion.as_ref().map_or(0.0, MacroCompletion::average),
        remaining: goal.map(|targets| targets - totals),
        entries_count: entries.len(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_summary_with_carried_goal() -> Result<()> {
        let (db, user) = setup_with_user().await?;
        goal::upsert_goal(&db, user.id, day(1), Macros::new(2000.0, 150.0, 250.0, 60.0)).await?;
        log_manual_entry(&db, user.id, day(4), "Lunch", Macros::new(500.0, 30.0, 50.0, 20.0))
            .await?;
        log_manual_entry(&db, user.id, day(4), "Dinner", Macros::new(700.0, 45.0, 75.0, 25.0))
            .await?;

        let summary = daily_summary(&db, user.id, day(4)).await?;
        assert_eq!(summary.totals, Macros::new(1200.0, 75.0, 125.0, 45.0));
        assert_eq!(summary.goal, Some(Macros::new(2000.0, 150.0, 250.0, 60.0)));
        assert_eq!(summary.remaining, Some(Macros::new(800.0, 75.0, 125.0, 15.0)));
        assert_eq!(summary.completion.map(|c| c.calories), Some(60.0));
        assert_eq!(summary.average_completion, (60.0 + 50.0 + 50.0 + 75.0) / 4.0);
        assert_eq!(summary.entries_count, 2);

        // Viewing the day materialised the carried goal
        assert!(goal::get_goal_for_date(&db, user.id, day(4)).await?.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_summary_without_goal() -> Result<()> {
        let (db, user) = setup_with_user().await?;

        let summary = daily_summary(&db, user.id, day(1)).await?;
        assert_eq!(summary.totals, Macros::default());
        assert_eq!(summary.goal, None);
        assert_eq!(summary.completion, None);
        assert_eq!(summary.remaining, None);
        assert_eq!(summary.average_completion, 0.0);

        Ok(())
    }
}
