pub mod history;
pub mod profile;

pub use history::{HistoryEntry, NewHistoryEntry};
pub use profile::{ReferenceSnapshot, Sex, UserMetrics, UserProfile};
