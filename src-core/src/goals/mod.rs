pub mod goal_progress_model;
pub mod goals_model;
pub mod goals_repository;
pub mod goals_service;
pub mod goals_traits;
pub mod progress;

pub use goal_progress_model::{GoalCard, GoalSummary, ProgressIndicator};
pub use goals_model::{Goal, IntervalWindow, IsoDuration, NewGoal};
pub use goals_repository::InMemoryGoalRepository;
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
pub use progress::{goal_fraction, interval_progress, progress_fraction, Rgb};
