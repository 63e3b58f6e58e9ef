pub mod audit;
pub mod balance;
pub mod entry_type;
pub mod location;
pub mod report;
pub mod request;
pub mod session;
pub mod time_entry;
pub mod user;
