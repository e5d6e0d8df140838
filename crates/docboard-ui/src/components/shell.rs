//! App chrome: navigation links and the locale picker.

use crate::app::Route;
use crate::core::store::AppStore;
use crate::features::home::logic::show_settings_link;
use docboard_core::i18n::{DEFAULT_LOCALE, LocaleCode, TranslationBundle};
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yew_router::prelude::Link;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct AppShellProps {
    pub locale: LocaleCode,
    pub on_locale_change: Callback<LocaleCode>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(AppShell)]
pub(crate) fn app_shell(props: &AppShellProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let show_settings = *use_selector(|store: &AppStore| show_settings_link(&store.application));

    let onchange = {
        let on_locale_change = props.on_locale_change.clone();
        Callback::from(move |event: Event| {
            let locale = event
                .target_dyn_into::<HtmlSelectElement>()
                .and_then(|select| LocaleCode::from_lang_tag(&select.value()));
            if let Some(locale) = locale {
                on_locale_change.emit(locale);
            }
        })
    };

    html! {
        <div class="shell">
            <nav class="shell__nav">
                <Link<Route> to={Route::Home} classes={classes!("shell__link")}>
                    { bundle.text("nav.home", "Documents") }
                </Link<Route>>
                if show_settings {
                    <Link<Route> to={Route::Settings} classes={classes!("shell__link")}>
                        { bundle.text("nav.settings", "Settings") }
                    </Link<Route>>
                }
                <select class="shell__locale" {onchange}>
                    { for LocaleCode::all().into_iter().map(|locale| html! {
                        <option value={locale.code()} selected={locale == props.locale}>
                            { locale.label() }
                        </option>
                    }) }
                </select>
            </nav>
            <main class="shell__main">{ props.children.clone() }</main>
        </div>
    }
}
