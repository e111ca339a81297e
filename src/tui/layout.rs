//! Screen geometry: breakpoints and the device rectangle
//!
//! Single source of truth for sizes - no magic numbers scattered in render or
//! hit-test code.

use crate::cards::Point;
use ratatui::layout::{Position, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 60 cols: device only, no header decoration
    Compact,
    /// 60-99 cols: header title
    Normal,
    /// 100+ cols: header title and handle
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        self.ordinal() >= min.ordinal()
    }

    fn ordinal(&self) -> u8 {
        match self {
            Breakpoint::Compact => 0,
            Breakpoint::Normal => 1,
            Breakpoint::Wide => 2,
        }
    }
}

const DEVICE_MAX_WIDTH: u16 = 48;
const DEVICE_HEIGHT: u16 = 13;
const BUTTON_ROW_HEIGHT: u16 = 3;

/// Where the device and its controls sit on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceLayout {
    /// Whole casing
    pub outer: Rect,
    /// Text field (the green display)
    pub screen: Rect,
    pub generate: Rect,
    pub clear: Rect,
    pub print: Rect,
}

/// Which device control a pointer landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceHit {
    Screen,
    Generate,
    Clear,
    Print,
    /// Casing only
    Body,
}

impl DeviceLayout {
    /// Lay out the device inside `canvas`
    ///
    /// Centred horizontally and sitting a little below the middle, leaving
    /// the space above it for freshly printed cards.
    pub fn new(canvas: Rect) -> Self {
        let width = DEVICE_MAX_WIDTH.min(canvas.width.saturating_sub(2)).max(1);
        let height = DEVICE_HEIGHT.min(canvas.height);
        let x = canvas.x + canvas.width.saturating_sub(width) / 2;
        let spare = canvas.height.saturating_sub(height);
        let y = canvas.y + (spare / 2 + spare / 4).min(spare);
        let outer = Rect::new(x, y, width, height);

        // Casing border plus one row of padding above the display
        let inner = Rect::new(
            outer.x + 2,
            outer.y + 2,
            outer.width.saturating_sub(4),
            outer.height.saturating_sub(3),
        );
        let screen_height = inner.height.saturating_sub(BUTTON_ROW_HEIGHT + 1);
        let screen = Rect::new(inner.x, inner.y, inner.width, screen_height);

        let buttons_y = inner.y + screen_height + 1;
        let gap = 1;
        let small = inner.width.saturating_sub(2 * gap) / 4;
        let generate = Rect::new(inner.x, buttons_y, small, BUTTON_ROW_HEIGHT);
        let clear = Rect::new(generate.right() + gap, buttons_y, small, BUTTON_ROW_HEIGHT);
        let print_x = clear.right() + gap;
        let print = Rect::new(
            print_x,
            buttons_y,
            inner.right().saturating_sub(print_x),
            BUTTON_ROW_HEIGHT,
        );

        // Tiny terminals squeeze the parts to nothing rather than past the casing
        Self {
            outer,
            screen: screen.intersection(outer),
            generate: generate.intersection(outer),
            clear: clear.intersection(outer),
            print: print.intersection(outer),
        }
    }

    /// Centre of the device, where new cards are seeded
    pub fn anchor(&self) -> Point {
        Point::new(
            self.outer.x as i32 + self.outer.width as i32 / 2,
            self.outer.y as i32 + self.outer.height as i32 / 2,
        )
    }

    /// Hit test a pointer against the device, controls first
    pub fn hit(&self, column: u16, row: u16) -> Option<DeviceHit> {
        let pos = Position::new(column, row);
        if !self.outer.contains(pos) {
            return None;
        }
        let hit = if self.generate.contains(pos) {
            DeviceHit::Generate
        } else if self.clear.contains(pos) {
            DeviceHit::Clear
        } else if self.print.contains(pos) {
            DeviceHit::Print
        } else if self.screen.contains(pos) {
            DeviceHit::Screen
        } else {
            DeviceHit::Body
        };
        Some(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(59), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(60), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(99), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(100), Breakpoint::Wide);
        assert_eq!(Breakpoint::from_width(240), Breakpoint::Wide);
    }

    #[test]
    fn at_least_comparisons() {
        let normal = Breakpoint::Normal;
        assert!(normal.at_least(Breakpoint::Compact));
        assert!(normal.at_least(Breakpoint::Normal));
        assert!(!normal.at_least(Breakpoint::Wide));
    }

    #[test]
    fn device_is_centred_and_inside_canvas() {
        let canvas = Rect::new(0, 0, 120, 40);
        let layout = DeviceLayout::new(canvas);

        assert_eq!(layout.outer.width, DEVICE_MAX_WIDTH);
        assert_eq!(layout.outer.x, (120 - DEVICE_MAX_WIDTH) / 2);
        assert!(layout.outer.y > (40 - DEVICE_HEIGHT) / 2);
        assert!(layout.outer.bottom() <= canvas.bottom());

        for part in [layout.screen, layout.generate, layout.clear, layout.print] {
            assert_eq!(part.intersection(layout.outer), part);
        }
    }

    #[test]
    fn narrow_canvas_shrinks_device() {
        let layout = DeviceLayout::new(Rect::new(0, 0, 30, 20));
        assert_eq!(layout.outer.width, 28);
        assert_eq!(layout.outer.x, 1);
    }

    #[test]
    fn tiny_canvas_keeps_parts_inside() {
        let canvas = Rect::new(0, 0, 10, 4);
        let layout = DeviceLayout::new(canvas);
        assert_eq!(layout.outer.intersection(canvas), layout.outer);
        for part in [layout.screen, layout.generate, layout.clear, layout.print] {
            assert_eq!(part.intersection(layout.outer), part);
        }
    }

    #[test]
    fn anchor_follows_resize() {
        let small = DeviceLayout::new(Rect::new(0, 0, 80, 24)).anchor();
        let large = DeviceLayout::new(Rect::new(0, 0, 160, 50)).anchor();
        assert_eq!(small.x, 40);
        assert_eq!(large.x, 80);
        assert!(large.y > small.y);
    }

    #[test]
    fn hit_test_finds_controls() {
        let layout = DeviceLayout::new(Rect::new(0, 0, 100, 40));
        let at = |r: Rect| layout.hit(r.x, r.y);

        assert_eq!(at(layout.generate), Some(DeviceHit::Generate));
        assert_eq!(at(layout.clear), Some(DeviceHit::Clear));
        assert_eq!(at(layout.print), Some(DeviceHit::Print));
        assert_eq!(at(layout.screen), Some(DeviceHit::Screen));
        assert_eq!(layout.hit(layout.outer.x, layout.outer.y), Some(DeviceHit::Body));
        assert_eq!(layout.hit(0, 0), None);
    }
}
