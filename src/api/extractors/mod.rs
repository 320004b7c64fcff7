/*!
 * Request extractors
 *
 * - AuthClaims: claims placed in request extensions by the bearer middleware
 */

mod claims;

pub use claims::AuthClaims;
