pub mod annotation;
pub mod api;
pub mod catalog;
pub mod config;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod input;
pub mod render;
pub mod session;
pub mod viewport;
