// Components module - UI building blocks
//
// - Backdrop: desk, grid and branding
// - Paper card: one printed card (a Widget, drawn with clipping and tilt)
// - Device panel: the beeper and its buttons
// - Status bar: counts, device state, latest warning
// - Toast: short-lived feedback overlay

pub mod backdrop;
pub mod device_panel;
pub mod paper_card;
pub mod status_bar;
pub mod toast;

pub use paper_card::PaperCard;
pub use toast::Toast;
