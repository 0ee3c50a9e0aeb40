/*
 * Responsibility
 * - middleware public interface
 * - auth::access::apply (route guard), http::apply (all routes)
 * - http::request_id, security_headers::apply (gateway-owned routes only)
 */
pub mod auth;
pub mod http;
pub mod security_headers;
