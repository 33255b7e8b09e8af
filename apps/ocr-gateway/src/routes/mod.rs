//! Route modules for the OCR gateway

pub mod extract;
