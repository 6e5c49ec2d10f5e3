// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events the state machine reports back to the host.

use kurbo::Point;
use trellis_element_tree::ElementId;
use trellis_panel::PanelId;

/// A specific element on a specific panel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementRef {
    /// The panel whose tree holds the element.
    pub panel: PanelId,
    /// The element within that tree.
    pub element: ElementId,
}

impl ElementRef {
    /// Convenience constructor.
    pub fn new(panel: PanelId, element: ElementId) -> Self {
        Self { panel, element }
    }
}

/// What the pointer did to panel UI this frame.
///
/// Events are appended in the order the underlying tree mutations happen,
/// so replaying them against a mirror of the trees stays consistent. All
/// positions are in the pixel space of the panel the event's target lives
/// on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InteractionEvent {
    /// The element became the selection.
    Selected(ElementRef),
    /// The element stopped being the selection.
    Deselected(ElementRef),
    /// The selected element was clicked (press edge).
    Clicked(ElementRef),
    /// A drag began on the element.
    DragStarted {
        /// The dragged element.
        target: ElementRef,
        /// Pointer position when the threshold was crossed.
        position: Point,
    },
    /// A drag in progress moved the element.
    DragMoved {
        /// The dragged element.
        target: ElementRef,
        /// Pointer position this frame.
        position: Point,
    },
    /// A drag finished.
    DragEnded {
        /// The previously dragged element.
        target: ElementRef,
        /// Where the element was released: `Some` when it snapped back to
        /// the drag anchor, `None` when it was dropped in place.
        position: Option<Point>,
    },
}

impl InteractionEvent {
    /// The element the event is about.
    pub fn target(&self) -> ElementRef {
        match *self {
            Self::Selected(target)
            | Self::Deselected(target)
            | Self::Clicked(target)
            | Self::DragStarted { target, .. }
            | Self::DragMoved { target, .. }
            | Self::DragEnded { target, .. } => target,
        }
    }
}
