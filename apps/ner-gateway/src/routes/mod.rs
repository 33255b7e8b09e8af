//! Route modules for the entity extraction gateway

pub mod extract;
pub mod ping;
