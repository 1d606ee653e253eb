pub mod panel;
pub mod popup;
pub mod radial;
pub mod search;
