//! Board access: the token endpoint and the application store that decides
//! where the user lands.

pub mod api;
pub mod store;

pub use api::AuthorizationApi;
pub use store::{AccessLevel, ApplicationState, ApplicationStore, NavigationTarget};
