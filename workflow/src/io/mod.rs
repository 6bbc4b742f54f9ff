//! I/O helpers for workflow commands.

pub mod config;
pub mod confirm;
pub mod fs_ops;
pub mod opener;
pub mod templates;
