pub mod balance;
pub mod db_utils;
pub mod entries;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod requests;
pub mod sessions;
pub mod stats;
pub mod users;
