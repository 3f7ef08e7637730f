use geodot_core::api::types::CameraPosition;
use geodot_core::session::{Notice, NoticeLevel};

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    /// Backend requests sent but not yet answered.
    pub pending_requests: usize,
    /// Description of the request most recently sent.
    pub last_request: Option<&'static str>,

    /// Log messages.
    pub log_messages: Vec<String>,

    /// Server URL being edited; applied when the field loses focus.
    pub server_url: String,

    pub catalog_filter: String,
    pub selected_catalog_key: Option<String>,

    pub confirm_clear: bool,
    pub camera_result: Option<CameraPosition>,
}

impl UIState {
    pub fn is_busy(&self) -> bool {
        self.pending_requests > 0
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn add_notice(&mut self, notice: Notice) {
        let prefix = match notice.level {
            NoticeLevel::Info => "",
            NoticeLevel::Success => "OK: ",
            NoticeLevel::Warning => "WARNING: ",
            NoticeLevel::Error => "ERROR: ",
        };
        self.add_log(format!("{prefix}{}", notice.message));
    }
}
