/*
 * Responsibility
 * - Process-level services injected into AppState
 *   - auth: bearer-token verification (and signing for tooling)
 *   - storage: artifact persistence keyed by job id
 *   - provider: outbound image-to-3D generation client
 */
pub mod auth;
pub mod factory;
pub mod provider;
pub mod storage;
