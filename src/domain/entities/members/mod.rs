//! Members Entity Module

pub mod member;

pub use member::*;
