//! Route modules for the extraction UI

pub mod index;
pub mod process;
