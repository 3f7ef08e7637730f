pub mod controls;
pub(crate) mod helpers;
pub mod menu_bar;
pub mod status;
pub mod viewport;
