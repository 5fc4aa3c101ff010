//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod consumable;
pub mod daily_goal;
pub mod food_entry;
pub mod house;
pub mod user;

// Re-export specific types to avoid conflicts
pub use consumable::{Column as ConsumableColumn, Entity as Consumable, Model as ConsumableModel};
pub use daily_goal::{Column as DailyGoalColumn, Entity as DailyGoal, Model as DailyGoalModel};
pub use food_entry::{Column as FoodEntryColumn, Entity as FoodEntry, Model as FoodEntryModel};
pub use house::{Column as HouseColumn, Entity as House, Model as HouseModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
