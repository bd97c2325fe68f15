#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! HTTP surface for Leadbox.
//!
//! One form-submission endpoint plus liveness. The JSON response body has
//! the same `{ success, message, errors? }` shape for every outcome; only
//! the status code varies.

mod routes;
mod server;

pub use routes::{AppState, ContactResponse, router};
pub use server::Server;
