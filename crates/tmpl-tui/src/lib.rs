//! Template Manager: a terminal client for the invoice template API.
//!
//! Lists templates, shows a single template, and creates new ones against
//! an external HTTP API using a bearer token obtained out-of-band.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod report;
pub mod token;
pub mod ui;

pub use api::{ApiClient, NewTemplate, Template, TemplateId};
pub use app::{AppState, Command, Draft, Outcome, TemplateManager};
pub use error::{ApiError, AppError, ConfigError};
pub use token::{BearerToken, TokenStore};
