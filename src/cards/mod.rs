//! Card data model
//!
//! A card is one printed pager message lying on the canvas. Everything here is
//! plain data; the [`store::CardStore`] owns the live collection and the
//! session-wide stacking counter.

pub mod store;

pub use store::CardStore;

use std::fmt;
use std::ops::{Add, Sub};

/// Opaque card identifier (6 uppercase base-36 characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A point on the canvas in terminal cells
///
/// Signed so cards can be dragged partly off-screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Card footprint on the canvas
pub const CARD_WIDTH: u16 = 32;
pub const CARD_HEIGHT: u16 = 11;

/// A printed message card
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: CardId,
    /// Message body, fixed at creation
    pub text: String,
    /// Local creation time, formatted once (`HH:MM`)
    pub timestamp: String,
    /// Top-left corner
    pub position: Point,
    /// Tilt in degrees, fixed at creation
    pub rotation: f32,
    /// Draw order; higher draws on top
    pub stack_order: u64,
}

impl Card {
    /// Whether a canvas point falls inside the card's drawn footprint
    ///
    /// Each row is tested where it is drawn, after the tilt shear.
    pub fn contains(&self, point: Point) -> bool {
        let row = point.y - self.position.y;
        if !(0..CARD_HEIGHT as i32).contains(&row) {
            return false;
        }
        let left = self.position.x + self.row_shift(row as u16);
        point.x >= left && point.x < left + CARD_WIDTH as i32
    }

    /// Horizontal offset of a card row, drawing the tilt as a shear
    ///
    /// Clockwise tilt pushes rows above the middle right and rows below it
    /// left. Cells are roughly twice as tall as wide, hence the factor 2.
    pub fn row_shift(&self, row: u16) -> i32 {
        let middle = (CARD_HEIGHT as f32 - 1.0) / 2.0;
        let slope = self.rotation.to_radians().tan() * 2.0;
        ((middle - row as f32) * slope).round() as i32
    }

    /// Canvas location of the tear-off (delete) control in the header row
    pub fn delete_control(&self) -> Point {
        Point::new(
            self.position.x + CARD_WIDTH as i32 - 4 + self.row_shift(1),
            self.position.y + 1,
        )
    }

    /// Whether a point hits the delete control (`[x]`, three cells wide)
    pub fn hits_delete_control(&self, point: Point) -> bool {
        let control = self.delete_control();
        point.y == control.y && point.x >= control.x && point.x < control.x + 3
    }
}

/// Partial update merged into a card by [`CardStore::update`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CardPatch {
    pub position: Option<Point>,
    pub stack_order: Option<u64>,
}

impl CardPatch {
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn stack_order(stack_order: u64) -> Self {
        Self {
            stack_order: Some(stack_order),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_at(x: i32, y: i32) -> Card {
        Card {
            id: CardId::new("ABC123"),
            text: "hello".to_string(),
            timestamp: "12:00".to_string(),
            position: Point::new(x, y),
            rotation: 0.0,
            stack_order: 1,
        }
    }

    #[test]
    fn contains_covers_footprint_only() {
        let card = card_at(10, 5);
        assert!(card.contains(Point::new(10, 5)));
        assert!(card.contains(Point::new(10 + CARD_WIDTH as i32 - 1, 5 + CARD_HEIGHT as i32 - 1)));
        assert!(!card.contains(Point::new(9, 5)));
        assert!(!card.contains(Point::new(10 + CARD_WIDTH as i32, 5)));
        assert!(!card.contains(Point::new(10, 5 + CARD_HEIGHT as i32)));
    }

    #[test]
    fn delete_control_sits_in_header() {
        let card = card_at(-3, 2);
        let control = card.delete_control();
        assert!(card.hits_delete_control(control));
        assert!(card.hits_delete_control(Point::new(control.x + 2, control.y)));
        assert!(!card.hits_delete_control(Point::new(control.x + 3, control.y)));
        assert!(!card.hits_delete_control(Point::new(control.x, control.y + 1)));
        assert!(card.contains(control));
    }

    #[test]
    fn row_shift_follows_tilt() {
        let mut card = card_at(0, 0);
        assert!((0..CARD_HEIGHT).all(|row| card.row_shift(row) == 0));

        card.rotation = 4.0;
        assert_eq!(card.row_shift(0), 1);
        assert_eq!(card.row_shift(5), 0);
        assert_eq!(card.row_shift(CARD_HEIGHT - 1), -1);

        card.rotation = -4.0;
        assert_eq!(card.row_shift(0), -1);
        assert!(card.hits_delete_control(card.delete_control()));
    }

    #[test]
    fn contains_follows_sheared_rows() {
        let mut card = card_at(10, 5);
        card.rotation = 4.0;
        let right = 10 + CARD_WIDTH as i32;
        let bottom = 5 + CARD_HEIGHT as i32 - 1;

        // Top row is drawn one cell to the right
        assert!(card.contains(Point::new(right, 5)));
        assert!(!card.contains(Point::new(10, 5)));

        // Bottom row one cell to the left
        assert!(card.contains(Point::new(9, bottom)));
        assert!(!card.contains(Point::new(right - 1, bottom)));

        // Middle row is unshifted
        assert!(card.contains(Point::new(10, 10)));
        assert!(!card.contains(Point::new(9, 10)));
    }

    #[test]
    fn point_arithmetic() {
        let a = Point::new(7, -2);
        let b = Point::new(3, 4);
        assert_eq!(a - b, Point::new(4, -6));
        assert_eq!((a - b) + b, a);
    }
}
