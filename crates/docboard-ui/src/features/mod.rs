//! Feature slices: home notices, the searchbar, and the settings form.

pub mod files;
pub mod home;
pub mod settings;
