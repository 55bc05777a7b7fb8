pub mod app;
pub mod config;
pub mod shared;
pub mod system;
pub mod tools;
