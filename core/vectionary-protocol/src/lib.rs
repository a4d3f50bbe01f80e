#![no_std] // Shared with the wasm bridge

extern crate alloc;

pub mod ids;
pub mod category;
pub mod text;
pub mod token;

pub use ids::{LexiconVersion, SubmissionId};
pub use category::*;
pub use text::{lemma_of, starts_uppercase, strip_punctuation};
pub use token::*;

pub mod model;
pub use model::*;
