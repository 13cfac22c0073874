// ==========================================
// BQC Generator - application layer
// ==========================================
// Responsibility: HTTP integration, wires the api layer to axum
// ==========================================

pub mod http_routes;
pub mod state;

pub use http_routes::build_router;
pub use state::AppState;
