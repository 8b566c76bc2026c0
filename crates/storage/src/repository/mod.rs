pub mod competition;
pub mod group;
pub mod ledger;
pub mod performance;
pub mod project;
pub mod session;
pub mod user;
