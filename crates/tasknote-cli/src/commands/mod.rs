pub mod add;
pub mod background;
pub mod clock;
pub mod common;
pub mod complete;
pub mod config;
pub mod delete;
pub mod export;
pub mod list;
