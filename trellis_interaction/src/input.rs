// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame pointer input snapshots.

use kurbo::Point;

/// Phase of the primary touch within a frame.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TouchPhase {
    /// The finger touched down this frame.
    Began,
    /// The finger moved since last frame.
    Moved,
    /// The finger is down but did not move.
    Stationary,
    /// The finger lifted this frame.
    Ended,
    /// The system cancelled the touch (for example an incoming call).
    Cancelled,
}

impl TouchPhase {
    /// Phases in which the touch position is where the user is pointing.
    fn provides_position(self) -> bool {
        matches!(self, Self::Began | Self::Moved | Self::Stationary)
    }
}

/// The primary touch, when one exists this frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Touch {
    /// Touch position in the host's pointer space.
    pub position: Point,
    /// Phase this frame.
    pub phase: TouchPhase,
}

/// Snapshot of pointer state the host hands the state machine each frame.
///
/// Positions are in whatever space the host's raycaster expects (typically
/// screen or viewport coordinates); the machine passes them through to
/// [`SceneRaycaster::cast`](crate::SceneRaycaster::cast) unchanged.
///
/// When a touch is present and active it takes precedence over the mouse
/// fields, so touch-first platforms can fill in both without the mouse
/// resting position fighting the finger.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerFrame {
    /// Mouse position in the host's pointer space.
    pub position: Point,
    /// Whether the primary button is held this frame (including the frame
    /// it went down).
    pub pressed: bool,
    /// The primary touch, if any.
    pub touch: Option<Touch>,
}

impl PointerFrame {
    /// A mouse-only frame.
    pub fn mouse(position: Point, pressed: bool) -> Self {
        Self {
            position,
            pressed,
            touch: None,
        }
    }

    /// A touch-only frame.
    pub fn touch(position: Point, phase: TouchPhase) -> Self {
        Self {
            position: Point::ORIGIN,
            pressed: false,
            touch: Some(Touch { position, phase }),
        }
    }

    /// The position driving this frame: the touch position while the touch
    /// is began/moved/stationary, otherwise the mouse position.
    pub fn pointer_position(&self) -> Point {
        match self.touch {
            Some(touch) if touch.phase.provides_position() => touch.position,
            _ => self.position,
        }
    }

    /// Whether the pointer counts as down: button held, or a touch began.
    pub fn pointer_down(&self) -> bool {
        self.pressed
            || matches!(
                self.touch,
                Some(Touch {
                    phase: TouchPhase::Began,
                    ..
                })
            )
    }

    /// Whether the pointer is in a state that can arm a drag: button held,
    /// or a touch that is moving or resting on the surface.
    pub fn pointer_held(&self) -> bool {
        self.pressed
            || matches!(
                self.touch,
                Some(Touch {
                    phase: TouchPhase::Moved | TouchPhase::Stationary,
                    ..
                })
            )
    }

    /// Whether a touch lifted this frame.
    pub fn touch_ended(&self) -> bool {
        matches!(
            self.touch,
            Some(Touch {
                phase: TouchPhase::Ended,
                ..
            })
        )
    }
}
