pub mod card;
pub mod digest;
pub mod format;
pub mod ranking;
pub mod status;
pub mod views;
