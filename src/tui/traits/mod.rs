//! Input contracts shared by UI components
//!
//! Components report whether they consumed an input so the caller knows to
//! stop routing it (the terminal equivalent of stopping event propagation).

mod interactive;

pub use interactive::{Handled, Interactive};
