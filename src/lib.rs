//! Backend for a single-page movie browser
//!
//! - **`view`**: the debounced search input and the controller that turns
//!   settled search terms into fetch cycles and a renderable snapshot.
//! - **`services`**: the TMDB movie provider and the search analytics recorder.
//! - **`db`**: document stores holding search analytics (memory, Redis, Appwrite).
//! - **`routes`**: the HTTP surface a page talks to.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod view;
