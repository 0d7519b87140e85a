pub mod editor;
pub mod header;
pub mod input;
pub mod menu;
pub mod preview;
pub mod sidebar;
pub mod status;
