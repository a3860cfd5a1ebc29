//! Pointer handling: divider drag and wheel scrolling.

use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::core::app::{AppAction, FrameRegions};

const WHEEL_LINES: i32 = 3;

/// Translate a mouse event into actions using the regions recorded by the
/// last frame.
pub fn mouse_actions(event: &MouseEvent, regions: &FrameRegions, resizing: bool) -> Vec<AppAction> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) if on_divider(event, regions) => {
            vec![AppAction::BeginResize]
        }
        MouseEventKind::Drag(MouseButton::Left) if resizing => vec![AppAction::UpdateResize {
            column: event.column,
        }],
        MouseEventKind::Up(_) if resizing => vec![AppAction::EndResize],
        MouseEventKind::ScrollUp => vec![AppAction::ScrollAt {
            column: event.column,
            row: event.row,
            lines: -WHEEL_LINES,
        }],
        MouseEventKind::ScrollDown => vec![AppAction::ScrollAt {
            column: event.column,
            row: event.row,
            lines: WHEEL_LINES,
        }],
        _ => Vec::new(),
    }
}

fn on_divider(event: &MouseEvent, regions: &FrameRegions) -> bool {
    let Some(divider_x) = regions.divider_x else {
        return false;
    };
    let body = regions.body;
    event.column == divider_x && event.row >= body.y && event.row < body.y + body.height
}
