//! HTTP JSON API.
//!
//! Every endpoint answers `200 OK` with an [`Envelope`]; domain failures are
//! reported through `code: -1` and a message.

mod envelope;
mod handlers;
mod payload;
mod router;
mod server;
mod state;

pub use envelope::Envelope;
pub use payload::Payload;
pub use router::create_router;
pub use server::{build_app, serve};
pub use state::AppState;
