// Core types for the Higgsfield generative-media platform

pub mod types;

pub use types::*;
