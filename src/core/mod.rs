pub mod balance;
pub mod ledger;
pub mod log;
pub mod remind;
pub mod reports;
pub mod tracker;
pub mod users;
pub mod workflow;
