pub mod auth;
pub mod award;
pub mod common;
pub mod ledger;
pub mod performance;
pub mod ranking;
pub mod user;
