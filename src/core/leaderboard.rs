//! Leaderboard business logic.
//!
//! Each user's intake for a day is compared against their goal macro by macro. The four
//! completion percentages are averaged into one score and users are ranked by it.
//! Goals are looked up with the same carry-forward rule as the rest of the app, but
//! read-only: building the leaderboard never writes goal rows for other users.

use crate::{
    core::{
        food_entry, goal,
        nutrition::{Macros, aggregate},
    },
    entities::{User, food_entry as food_entry_entity, user},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, prelude::*};
use serde::Serialize;

/// Completion percentage for each macro.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MacroCompletion {
    /// Calories eaten as a percentage of the calorie goal
    pub calories: f64,
    /// Protein eaten as a percentage of the protein goal
    pub protein: f64,
    /// Carbs eaten as a percentage of the carb goal
    pub carbs: f64,
    /// Fat eaten as a percentage of the fat goal
    pub fat: f64,
}

impl MacroCompletion {
    /// Compares `totals` against `targets`.
    #[must_use]
    pub fn between(totals: Macros, targets: Macros) -> Self {
        Self {
            calories: completion_percentage(totals.calories, targets.calories),
            protein: completion_percentage(totals.protein, targets.protein),
            carbs: completion_percentage(totals.carbs, targets.carbs),
            fat: completion_percentage(totals.fat, targets.fat),
        }
    }

    /// Mean of the four percentages.
    #[must_use]
    pub fn average(&self) -> f64 {
        (self.calories + self.protein + self.carbs + self.fat) / 4.0
    }
}

/// `consumed / target * 100`, or 0 when the target is 0.
#[must_use]
pub fn completion_percentage(consumed: f64, target: f64) -> f64 {
    if target > 0.0 {
        (consumed / target) * 100.0
    } else {
        0.0
    }
}

/// One user's row on the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// User being scored
    pub user_id: i64,
    /// Display name of the user
    pub user_name: String,
    /// Macros eaten on the day
    pub totals: Macros,
    /// Goal in effect on the day, if the user has one
    pub goal: Option<Macros>,
    /// Per-macro completion, None when there is no goal
    pub completion: Option<MacroCompletion>,
    /// Ranking score: average of `completion`, 0 without a goal
    pub average_completion: f64,
    /// Number of entries logged on the day
    pub entries_count: usize,
}

/// Scores one user from their entries and goal for the day.
#[must_use]
pub fn score_user(
    user: &user::Model,
    entries: &[food_entry_entity::Model],
    goal: Option<Macros>,
) -> LeaderboardEntry {
    let totals = aggregate(entries);
    let completion = goal.map(|targets| MacroCompletion::between(totals, targets));

    LeaderboardEntry {
        user_id: user.id,
        user_name: user.name.clone(),
        totals,
        goal,
        completion,
        average_completion: completion.as_ref().map_or(0.0, MacroCompletion::average),
        entries_count: entries.len(),
    }
}

/// Sorts by `average_completion`, highest first. Equal scores keep their input order.
pub fn rank(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| b.average_completion.total_cmp(&a.average_completion));
}

/// Builds the ranked leaderboard for `date`.
///
/// With `house_id`, only members of that house are included.
pub async fn build_leaderboard(
    db: &DatabaseConnection,
    date: NaiveDate,
    house_id: Option<i64>,
) -> Result<Vec<LeaderboardEntry>> {
    let mut query = User::find();
    if let Some(house_id) = house_id {
        query = query.filter(user::Column::HouseId.eq(house_id));
    }
    let users = query.order_by_asc(user::Column::Name).all(db).await?;

    let mut leaderboard = Vec::with_capacity(users.len());
    for user in &users {
        let entries = food_entry::list_entries_for_date(db, user.id, date).await?;
        let goal = goal::find_effective_goal(db, user.id, date)
            .await?
            .as_ref()
            .map(Macros::from);
        leaderboard.push(score_user(user, &entries, goal));
    }

    rank(&mut leaderboard);
    Ok(leaderboard)
}
