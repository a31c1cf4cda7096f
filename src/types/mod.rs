//! Core domain types shared across the hook's decision subsystems.

mod change;
mod ids;

pub use change::{Change, LabelInfo, Vote};
pub use ids::{ChangeId, CommitId, Project};
