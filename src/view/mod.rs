pub mod index;
pub mod sidebar;
