//! # OMS server
//! This module hosts the HTTP server for the order management system. It is a thin layer over `oms_engine`:
//! requests are deserialized, handed to the engine APIs, and the results (or errors) are rendered as JSON.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/products`, `/products/{id}`: Catalog management and search.
//! * `/customers`, `/customers/{id}`, `/customers/{id}/orders`: Customer registration and order history.
//! * `/orders`, `/orders/{id}` and the `/orders/{id}/...` actions: The order lifecycle.
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
