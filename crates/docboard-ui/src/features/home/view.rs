//! Home page view.

use crate::app::ServicesCtx;
use crate::components::atoms::Button;
use crate::components::atoms::button::ButtonVariant;
use crate::core::store::AppStore;
use crate::features::files::view::Searchbar;
use crate::features::home::logic::{HomeNotice, select_home_notice};
use docboard_core::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(HomePage)]
pub(crate) fn home_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let services = use_context::<ServicesCtx>();
    let notice = use_selector(|store: &AppStore| {
        select_home_notice(&store.application, &store.settings)
    });

    let onreload = Callback::from(move |_: MouseEvent| {
        if let Some(services) = services.clone() {
            yew::platform::spawn_local(async move {
                services.application.refresh_authorization().await;
            });
        }
    });

    match *notice {
        HomeNotice::Loading => html! { <div class="home home--loading" aria-busy="true"></div> },
        HomeNotice::Documents => html! {
            <div class="home">
                <Searchbar />
            </div>
        },
        other => {
            let key = other.message_key().unwrap_or_default();
            html! {
                <div class="home home--notice">
                    <p class="home__message">{ bundle.text(key, "") }</p>
                    if other == HomeNotice::RetriesExhausted {
                        <Button
                            label={bundle.text("home.refresh", "Reload")}
                            variant={ButtonVariant::Secondary}
                            onclick={onreload} />
                    }
                </div>
            }
        }
    }
}
