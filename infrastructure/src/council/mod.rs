//! Council server adapters
//!
//! [`HttpStageClient`] implements the stage port over the server's
//! `/api/council/stage{N}` endpoints; [`HttpStatusClient`] reads
//! `/api/health` for the model status dashboard.

pub mod envelope;
pub mod error;
pub mod http_client;
pub mod status_client;

#[cfg(test)]
mod test_server;

pub use envelope::decode_stage_response;
pub use error::{CouncilHttpError, normalize_base_url};
pub use http_client::HttpStageClient;
pub use status_client::{HttpStatusClient, decode_status_board};
