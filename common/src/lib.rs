//! Florescer shared library – data model, hash navigation, catalog and form
//! state, and the hosted-backend boundary used by the web server.

pub mod backend;
pub mod carousel;
pub mod config;
pub mod error;
pub mod form;
pub mod growth;
pub mod model;
pub mod route;
pub mod services;
pub mod upload;

pub use error::{BackendError, ConfigError, ServiceError};
