//! # Restyle API
//!
//! HTTP surface of the proxy.
//!
//! ```text
//! GET     /api/proxy?url=<absolute url>  - Fetch and normalize a page
//! OPTIONS /api/proxy                     - Cross-origin pre-flight
//! GET     /health                        - Version and uptime
//! GET     /livez                         - Liveness probe
//! ```

pub mod error;
pub mod http;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use http::routes::create_router;
pub use server::ApiServer;
pub use state::AppState;
