pub mod header;
pub mod message;
pub mod next_prayer;
pub mod picker;
pub mod prayers;
pub mod statusbar;
