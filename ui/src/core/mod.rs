//! Cross-cutting building blocks shared by components and launchers.

pub mod fetch;
pub mod highlight;
pub mod language;
pub mod sections;
pub mod state;
