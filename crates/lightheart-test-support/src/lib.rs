//! Shared test fakes and fixtures for the Light Heart Tales reader.

mod fixtures;
mod navigator;
mod scheduler;
mod store;

pub use fixtures::{BIRD_FEEDBACK, forest_story};
pub use navigator::RecordingNavigator;
pub use scheduler::ManualScheduler;
pub use store::FailingStore;
