pub mod config;
pub mod debug;
pub mod direction;
pub mod elevator_status;
pub mod error;
pub mod origin;
pub mod request;
pub mod requests;
