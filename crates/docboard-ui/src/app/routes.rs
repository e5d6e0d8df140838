//! Routing definitions for the docboard UI.
use docboard_core::authorization::NavigationTarget;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/settings")]
    Settings,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl From<NavigationTarget> for Route {
    fn from(target: NavigationTarget) -> Self {
        match target {
            NavigationTarget::Home => Self::Home,
            NavigationTarget::Settings => Self::Settings,
        }
    }
}
