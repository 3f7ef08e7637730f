//! Client side of the annotation backend.

mod backend;
mod client;
pub mod types;

pub use backend::{execute, AnnotationBackend, ApiRequest, ApiResponse};
pub use client::{status_title, HttpBackend};
