mod api;
mod dispatch;
mod files;

pub use dispatch::spawn_worker;
pub(crate) use dispatch::{send, send_error, send_log};
