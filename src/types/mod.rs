mod drafts;
mod models;
mod status;

pub use drafts::*;
pub use models::*;
pub use status::OrderStatus;
