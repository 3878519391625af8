pub mod catalog;
pub mod error;
pub mod ids;
pub mod models;
pub mod repos;
pub mod service;
