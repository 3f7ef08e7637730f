use geodot_core::input::WheelAccumulator;

/// Viewport display state.
#[derive(Default)]
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    /// Session image generation the texture was uploaded for.
    pub generation: u64,
    /// Pointer position (canvas space) seen on the previous frame.
    pub last_pointer: Option<egui::Pos2>,
    pub wheel: WheelAccumulator,
}
