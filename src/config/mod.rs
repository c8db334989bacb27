mod server;

pub use server::{DEFAULT_SMS_ENDPOINT, ServerConfig};
