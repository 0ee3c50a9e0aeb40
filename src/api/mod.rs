/*
 * Responsibility
 * - HTTP surface of the gateway (route table + handlers)
 */
pub mod handlers;
mod routes;

pub use routes::routes;
