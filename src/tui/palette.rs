//! Fixed colours of the desk, the paper and the device
//!
//! The toy has one look; these are plain constants rather than a theme.

use ratatui::style::Color;

pub const DESK: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
pub const DESK_GRID: Color = Color::Rgb(0xd4, 0xd4, 0xd4);
pub const INK_MUTED: Color = Color::Rgb(0x9c, 0xa3, 0xaf);

pub const PAPER: Color = Color::Rgb(0xfd, 0xfd, 0xfd);
pub const PAPER_EDGE: Color = Color::Rgb(0xe5, 0xe7, 0xeb);
pub const PAPER_INK: Color = Color::Rgb(0x1f, 0x29, 0x37);
pub const PAPER_FAINT: Color = Color::Rgb(0x6b, 0x72, 0x80);
pub const SHADOW: Color = Color::Rgb(0xa3, 0xa3, 0xa3);
pub const TEAR: Color = Color::Rgb(0xef, 0x44, 0x44);

pub const CASING: Color = Color::Rgb(0x8c, 0xc6, 0x3f);
pub const CASING_DARK: Color = Color::Rgb(0x7a, 0xb5, 0x2f);
pub const SCREEN: Color = Color::Rgb(0x11, 0x11, 0x11);
pub const PHOSPHOR: Color = Color::Rgb(0x4a, 0xde, 0x80);
pub const PHOSPHOR_DIM: Color = Color::Rgb(0x16, 0x65, 0x34);

pub const BUTTON: Color = Color::Rgb(0x37, 0x41, 0x51);
pub const BUTTON_DISABLED: Color = Color::Rgb(0x6b, 0x72, 0x80);
pub const PRINT: Color = Color::Rgb(0xff, 0x57, 0x22);
pub const LABEL: Color = Color::Rgb(0xf9, 0xfa, 0xfb);

pub const WARN: Color = Color::Rgb(0xb4, 0x53, 0x09);
pub const ERROR: Color = Color::Rgb(0xb9, 0x1c, 0x1c);
