//! App root: boot, service wiring, store mirroring, and routing.

use crate::components::shell::AppShell;
use crate::core::store::{AppStore, app_dispatch};
use crate::features::home::view::HomePage;
use crate::features::settings::view::SettingsPage;
use docboard_core::UiConfig;
use docboard_core::i18n::{LocaleCode, TranslationBundle};
use gloo::console;
use preferences::{load_locale, page_origin, persist_locale};
pub(crate) use routes::Route;
pub(crate) use services::ServicesCtx;
use yew::prelude::*;
use yew_router::prelude::*;

mod logging;
mod preferences;
mod routes;
mod services;

#[derive(Properties, PartialEq)]
struct DocboardAppProps {
    config: UiConfig,
}

#[function_component(DocboardApp)]
fn docboard_app(props: &DocboardAppProps) -> Html {
    let locale = use_state(load_locale);
    let bundle = {
        let locale = *locale;
        use_memo(move |_| TranslationBundle::new(locale), locale)
    };
    let services = {
        let config = props.config.clone();
        use_memo(move |_| ServicesCtx::new(&config), ())
    };

    {
        let services = (*services).clone();
        use_effect_with_deps(
            move |_| {
                let dispatch = app_dispatch();
                let (settings, application) =
                    (services.settings.snapshot(), services.application.snapshot());
                dispatch.reduce_mut(|store| {
                    store.settings = settings;
                    store.application = application;
                });
                let settings_id = {
                    let dispatch = dispatch.clone();
                    services.settings.subscribe(move |state| {
                        let state = state.clone();
                        dispatch.reduce_mut(|store| store.settings = state);
                    })
                };
                let application_id = {
                    let dispatch = dispatch.clone();
                    services.application.subscribe(move |state| {
                        let state = state.clone();
                        dispatch.reduce_mut(|store| store.application = state);
                    })
                };
                let refresh_id = services
                    .events
                    .on_refresh(move || dispatch.reduce_mut(AppStore::begin_files_load));
                move || {
                    services.settings.unsubscribe(settings_id);
                    services.application.unsubscribe(application_id);
                    services.events.off_refresh(refresh_id);
                }
            },
            (),
        );
    }

    let on_locale_change = {
        let locale = locale.clone();
        Callback::from(move |next: LocaleCode| {
            persist_locale(next);
            locale.set(next);
        })
    };

    html! {
        <ContextProvider<ServicesCtx> context={(*services).clone()}>
            <ContextProvider<TranslationBundle> context={(*bundle).clone()}>
                <HashRouter>
                    <AppShell locale={*locale} {on_locale_change}>
                        <AppRoutes services={(*services).clone()} />
                    </AppShell>
                </HashRouter>
            </ContextProvider<TranslationBundle>>
        </ContextProvider<ServicesCtx>>
    }
}

#[derive(Properties, PartialEq)]
struct AppRoutesProps {
    services: ServicesCtx,
}

/// Runs the boot authorization check and renders the active route.
#[function_component(AppRoutes)]
fn app_routes(props: &AppRoutesProps) -> Html {
    let navigator = use_navigator();
    {
        let services = props.services.clone();
        use_effect_with_deps(
            move |_| {
                yew::platform::spawn_local(async move {
                    let dispatch = app_dispatch();
                    let application = &services.application;
                    dispatch.reduce_mut(AppStore::begin_files_load);
                    let target = application.reload_authorization().await;
                    dispatch.reduce_mut(AppStore::finish_files_load);
                    if let Some(navigator) = navigator {
                        navigator.replace(&Route::from(target));
                    }
                    if application.snapshot().authorized && application.should_refresh_token() {
                        application.authorize().await;
                    }
                });
                || ()
            },
            (),
        );
    }

    let services = props.services.clone();
    html! {
        <Switch<Route> render={move |route| match route {
            Route::Home => html! { <HomePage /> },
            Route::Settings => html! { <SettingsPage services={services.clone()} /> },
            Route::NotFound => html! { <Redirect<Route> to={Route::Home} /> },
        }} />
    }
}

/// Install logging and mount the app into `#root` (or `<body>`).
pub fn run_app() {
    console_error_panic_hook::set_once();
    let config = match UiConfig::from_build_env(&page_origin()) {
        Ok(config) => config,
        Err(err) => {
            console::error!(format!("docboard configuration invalid: {err}"));
            return;
        }
    };
    if let Err(err) = logging::init_logging(&config.log_level) {
        console::error!(format!("docboard logging unavailable: {err}"));
    }
    tracing::info!(
        backend = %config.backend_url,
        demo_days = config.demo_expiration_days,
        "starting docboard ui"
    );

    let props = DocboardAppProps { config };
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<DocboardApp>::with_root_and_props(root, props).render();
    } else {
        yew::Renderer::<DocboardApp>::with_props(props).render();
    }
}
