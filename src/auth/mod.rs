mod helpers;
mod middleware;
mod token;

pub use helpers::{AdminCredential, issue_admin_token, verify_admin_token};
pub use middleware::{AuthError, RequireTenant};
pub use token::AdminToken;
