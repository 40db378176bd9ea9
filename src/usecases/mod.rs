//! Application use cases. Orchestrate domain logic via ports.

pub mod debouncer;
pub mod session;
pub mod startup;

pub use debouncer::Debouncer;
pub use session::{DEFAULT_DEBOUNCE, DiscussionSession, FetchOutcome, StalenessPolicy};
pub use startup::check_backend;
