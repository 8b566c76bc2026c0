pub mod competition;
pub mod group;
pub mod performance;
pub mod project;
pub mod session;
pub mod transaction;
pub mod user;

pub use competition::Competition;
pub use group::Group;
pub use performance::{WeeklyPerformance, YearlyPerformance};
pub use project::Project;
pub use session::Session;
pub use transaction::{Transaction, TransactionType};
pub use user::{Role, User};
