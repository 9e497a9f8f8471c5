pub mod calculations;
pub mod config;
pub mod db;
pub mod error;
pub mod network;
pub mod service;
pub mod types;
