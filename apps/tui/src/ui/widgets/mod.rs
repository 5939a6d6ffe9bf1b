pub mod charts;
pub mod popup;
pub mod sidebar;
