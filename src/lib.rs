//! # Menulinx
//!
//! A multi-tenant restaurant ordering backend, usable both as a standalone
//! binary and as a library.
//!
//! Each restaurant has a menu, takes customer orders and moves them through
//! `new → accepted → ready → delivered` (or `rejected`), while daily intake
//! stats are kept and customers are notified by SMS.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use menulinx::notify::SmsNotifier;
//! use menulinx::server::{AppState, create_router};
//! use menulinx::store::SqliteStore;
//!
//! let store = SqliteStore::open("./data/menulinx.db").unwrap();
//! let notifier = SmsNotifier::new(menulinx::config::DEFAULT_SMS_ENDPOINT);
//! let state = Arc::new(AppState::new(Arc::new(store), Arc::new(notifier)));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `menulinx` binary. Disable with `default-features = false`.

pub mod auth;
pub mod config;
pub mod error;
pub mod notify;
pub mod server;
pub mod service;
pub mod store;
pub mod types;
pub mod util;
