//! Shell component modules
//!
//! Contains all individual rendering components

pub mod dashboard_page;
pub mod footer;
pub mod header;
pub mod logs;
pub mod placeholder_page;
pub mod sidebar;
pub mod students_page;
