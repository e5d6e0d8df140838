//! DOM-free UI state shared by every view.

pub mod store;
