pub mod classify;

pub use classify::{classify, is_literal};
