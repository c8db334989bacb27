pub mod dto;
pub mod response;
mod router;
mod setup;
mod tenant;

pub use router::{AppState, create_router};
