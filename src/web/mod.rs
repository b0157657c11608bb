//! Web server module
//!
//! Serves the search page and routes page events into per-session
//! controllers.

mod handlers;
mod routes;
mod sessions;
mod state;

pub use routes::create_router;
pub use sessions::{SessionController, SessionHandle, SessionStore};
pub use state::AppState;
