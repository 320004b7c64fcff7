/*
 * Responsibility
 * - Public interface of the middleware layer
 * - bearer auth (route level), http / cors / security headers (router level)
 */
pub mod bearer_auth;
pub mod cors;
pub mod http;
pub mod security_headers;
