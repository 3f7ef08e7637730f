//! Pointer/wheel state machine.
//!
//! `dispatch` is a pure transition function: it takes the current
//! interaction state and one event, mutates only the transform and store it
//! is handed, and returns the next state plus the effects the front-end must
//! carry out (redraw, show a warning, change the cursor).

use tracing::debug;

use crate::annotation::{AnnotationForm, AnnotationStore};
use crate::config::{AnnotationConfig, ViewportConfig};
use crate::consts::WHEEL_NOTCH;
use crate::error::ValidationError;
use crate::geometry::Vec2;
use crate::viewport::{ViewportTransform, ZoomDirection};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Raw device input in canvas-space coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { button: PointerButton, pos: Vec2 },
    PointerUp { button: PointerButton, pos: Vec2 },
    PointerMove { pos: Vec2 },
    PointerLeave,
    Wheel { pos: Vec2, delta_y: f64 },
    ContextMenu,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    Panning {
        last: Vec2,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorHint {
    Crosshair,
    Grabbing,
}

/// Side effects requested by a transition.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEffect {
    Render,
    PointAdded { index: usize },
    Warning(ValidationError),
    SuppressContextMenu,
    Cursor(CursorHint),
    /// Image-space position under the pointer, for the coordinate read-out.
    PointerAt(Vec2),
}

/// Everything a transition may read or mutate.
pub struct InputContext<'a> {
    pub transform: &'a mut ViewportTransform,
    pub store: &'a mut AnnotationStore,
    pub form: &'a AnnotationForm,
    pub image_loaded: bool,
    pub viewport: &'a ViewportConfig,
    pub annotation: &'a AnnotationConfig,
}

pub fn dispatch(
    state: InteractionState,
    event: &InputEvent,
    ctx: &mut InputContext<'_>,
) -> (InteractionState, Vec<InputEffect>) {
    match (state, *event) {
        (_, InputEvent::ContextMenu) => (state, vec![InputEffect::SuppressContextMenu]),

        (_, InputEvent::Wheel { pos, delta_y }) => {
            let Some(direction) = ZoomDirection::from_wheel_delta(delta_y) else {
                return (state, Vec::new());
            };
            if !ctx.image_loaded {
                return (state, Vec::new());
            }
            ctx.transform.zoom_with(pos, direction, ctx.viewport);
            (state, vec![InputEffect::Render])
        }

        (InteractionState::Idle, InputEvent::PointerDown { button: PointerButton::Primary, pos }) => {
            if !ctx.image_loaded {
                return (state, Vec::new());
            }
            let image_pos = ctx.transform.to_image_space(pos);
            let added = ctx
                .form
                .to_point(image_pos, ctx.annotation.require_symbol)
                .and_then(|point| ctx.store.add(point));
            match added {
                Ok(index) => {
                    debug!(index, x = image_pos.x, y = image_pos.y, "Placed point");
                    (state, vec![InputEffect::PointAdded { index }, InputEffect::Render])
                }
                Err(e) => (state, vec![InputEffect::Warning(e), InputEffect::Render]),
            }
        }

        (InteractionState::Idle, InputEvent::PointerDown { button: PointerButton::Secondary, pos }) => (
            InteractionState::Panning { last: pos },
            vec![InputEffect::Cursor(CursorHint::Grabbing), InputEffect::Render],
        ),

        (InteractionState::Idle, InputEvent::PointerMove { pos }) => {
            (state, vec![InputEffect::PointerAt(ctx.transform.to_image_space(pos))])
        }

        (InteractionState::Panning { last }, InputEvent::PointerMove { pos }) => {
            let delta = pos - last;
            ctx.transform.pan(delta.x, delta.y);
            (
                InteractionState::Panning { last: pos },
                vec![
                    InputEffect::PointerAt(ctx.transform.to_image_space(pos)),
                    InputEffect::Render,
                ],
            )
        }

        (
            InteractionState::Panning { .. },
            InputEvent::PointerUp { button: PointerButton::Secondary, .. } | InputEvent::PointerLeave,
        ) => (
            InteractionState::Idle,
            vec![InputEffect::Cursor(CursorHint::Crosshair), InputEffect::Render],
        ),

        _ => (state, Vec::new()),
    }
}

/// Holds the interaction state between events.
#[derive(Clone, Debug, Default)]
pub struct InputController {
    state: InteractionState,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, InteractionState::Panning { .. })
    }

    pub fn handle(&mut self, event: &InputEvent, ctx: &mut InputContext<'_>) -> Vec<InputEffect> {
        let (next, effects) = dispatch(self.state, event, ctx);
        self.state = next;
        effects
    }

    /// Drop any in-progress pan, e.g. when a new image replaces the view.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
    }
}

/// Turns smooth scroll deltas (trackpads, high-resolution wheels) into whole
/// zoom notches. Deltas use the browser sign: negative scrolls up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelAccumulator {
    pending: f64,
    notch: f64,
}

impl Default for WheelAccumulator {
    fn default() -> Self {
        Self::new(WHEEL_NOTCH)
    }
}

impl WheelAccumulator {
    pub fn new(notch: f64) -> Self {
        Self {
            pending: 0.0,
            notch: notch.abs().max(f64::EPSILON),
        }
    }

    /// Add a delta and return the signed number of notches it completes.
    /// The remainder carries over to the next call.
    pub fn feed(&mut self, delta_y: f64) -> i32 {
        if !delta_y.is_finite() {
            return 0;
        }
        // A reversal drops whatever was pending in the old direction.
        if self.pending * delta_y < 0.0 {
            self.pending = 0.0;
        }
        self.pending += delta_y;
        let notches = (self.pending / self.notch).trunc();
        self.pending -= notches * self.notch;
        notches as i32
    }

    pub fn reset(&mut self) {
        self.pending = 0.0;
    }
}
