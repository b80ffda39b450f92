//! Import session state and logic (UI-agnostic).

mod ops;
mod state;

pub use state::{ImportSession, Stage};
