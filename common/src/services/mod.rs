//! Operations behind each page, written against [`crate::backend::HostedBackend`].

pub mod adoption;
pub mod auth;
pub mod content;
pub mod plants;
pub mod profile;
