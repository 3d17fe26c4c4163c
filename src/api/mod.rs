pub mod handlers;
pub mod routes;
pub mod state;
pub mod types;
pub mod views;

pub use routes::create_router;
pub use state::AppState;
