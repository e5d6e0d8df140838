//! Shared UI atoms used across the shell and views.

pub(crate) mod button;
pub(crate) mod form_input;

pub(crate) use button::Button;
pub(crate) use form_input::FormInput;
