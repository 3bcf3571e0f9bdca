pub mod agent;
pub mod audit;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod session;
pub mod toolkit;
pub mod transcript;
pub mod turn;
pub mod ui;
