pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod pagination;
pub mod quiz;
pub mod routes;

mod deserializers;
