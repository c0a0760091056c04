//! HTTP surface for the content store.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /file/{name}/{user_id}` - Document with `USER_ID_PLACEHOLDER`
//!   replaced by `user_id`, or `404 File not found`
//! - `GET /uploads/{path}` - Raw file from the content store directory
//! - `GET /{path}` - Raw file from the public directory
//!
//! ## Example
//!
//! ```no_run
//! use relay_bot::api::{serve, AppState, ServerConfig};
//! use relay_bot::ContentStore;
//!
//! #[tokio::main]
//! async fn main() -> relay_bot::Result<()> {
//!     let content = ContentStore::open("uploads").await?;
//!     serve(ServerConfig::new("127.0.0.1", 3000), AppState::new(content)).await
//! }
//! ```

pub mod handlers;
pub mod router;

pub use handlers::AppState;
pub use router::{create_router, serve, ServerConfig};
