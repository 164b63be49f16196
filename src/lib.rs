//! Cafe Lavender: a small recipe-sharing board.
//!
//! The `facts` table lives behind the [`domain::FactRepository`] trait with
//! three backends: DynamoDB ([`repositories::DynamoDbFactRepository`]), plain
//! process memory ([`repositories::InMemoryFactRepository`]), and HTTP
//! ([`remote::HttpFactRepository`]) for clients of the served API. On top of
//! the trait sit two consumers: the axum surface ([`routes`]/[`handlers`])
//! and the headless client core ([`app`], [`form`], [`list`]) that a UI
//! driver embeds.

pub mod app;
pub mod categories;
pub mod config;
pub mod domain;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod list;
pub mod models;
pub mod remote;
pub mod repositories;
pub mod routes;
pub mod startup;

use domain::FactRepository;
use std::sync::Arc;

/// Shared resources for the web server.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn FactRepository>,
}
