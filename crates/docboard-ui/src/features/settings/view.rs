//! Settings form view.
//!
//! # Design
//! - One `SettingsForm` controller per mount; the view only forwards events.
//! - Field values come from the mirrored `AppStore`; errors and flags from the controller.

use crate::app::{Route, ServicesCtx};
use crate::components::atoms::{Button, FormInput};
use crate::core::store::{AppStore, app_dispatch};
use docboard_core::i18n::{DEFAULT_LOCALE, TranslationBundle};
use docboard_core::settings::{SettingsForm, SubmitOutcome};
use yew::prelude::*;
use yew_router::prelude::use_navigator;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsPageProps {
    pub services: ServicesCtx,
}

#[function_component(SettingsPage)]
pub(crate) fn settings_page(props: &SettingsPageProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str, fallback: &str| bundle.text(key, fallback);
    let navigator = use_navigator();
    let settings = use_selector(|store: &AppStore| store.settings.clone());
    let redraw = use_force_update();

    let form = {
        let services = props.services.clone();
        let bundle = bundle.clone();
        use_memo(
            move |_| {
                SettingsForm::new(
                    services.settings,
                    services.application,
                    services.events,
                    services.host,
                    bundle,
                )
            },
            (),
        )
    };

    {
        let form = form.clone();
        use_effect_with_deps(
            move |_| {
                let subscription = form.subscribe(move |_| redraw.force_update());
                form.mount();
                move || {
                    form.unsubscribe(subscription);
                    form.unmount();
                }
            },
            (),
        );
    }
    {
        let form = form.clone();
        use_effect_with_deps(
            move |bundle| {
                form.set_translations(bundle.clone());
                || ()
            },
            bundle.clone(),
        );
    }
    {
        let form = form.clone();
        let demo = settings.demo;
        use_effect_with_deps(
            move |_| {
                form.sync_demo();
                || ()
            },
            demo,
        );
    }

    let flags = form.flags();
    let errors = form.state().errors;

    let onsubmit = {
        let form = form.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let form = form.clone();
            let navigator = navigator.clone();
            yew::platform::spawn_local(async move {
                if let SubmitOutcome::Saved(target) = form.submit().await {
                    app_dispatch().reduce_mut(AppStore::finish_files_load);
                    if let Some(navigator) = navigator {
                        navigator.push(&Route::from(target));
                    }
                }
            });
        })
    };
    let field = |handler: fn(&SettingsForm, &str)| {
        let form = form.clone();
        Callback::from(move |value: String| handler(&form, &value))
    };
    let ontoggle = {
        let form = form.clone();
        Callback::from(move |_: Event| form.toggle_demo())
    };

    html! {
        <div class="form">
            <div class="form__content">
                <p class="form__description">{ t("features.settings.form.description", "") }</p>
                <form class="form__fields" autocomplete="off" {onsubmit}>
                    <FormInput
                        label={t("features.settings.form.address", "Address")}
                        name="address"
                        value={settings.address.clone()}
                        error={errors.address}
                        disabled={flags.fields_disabled}
                        required={flags.fields_required}
                        oninput={field(SettingsForm::input_address)}
                        onblur={field(SettingsForm::blur_address)} />
                    <FormInput
                        label={t("features.settings.form.secret", "Secret")}
                        name="secret"
                        kind="password"
                        value={settings.secret.clone()}
                        error={errors.secret}
                        disabled={flags.fields_disabled}
                        required={flags.fields_required}
                        oninput={field(SettingsForm::input_secret)}
                        onblur={field(SettingsForm::blur_secret)} />
                    <FormInput
                        label={t("features.settings.form.header", "Header")}
                        name="header"
                        value={settings.header.clone()}
                        error={errors.header}
                        disabled={flags.fields_disabled}
                        required={flags.fields_required}
                        oninput={field(SettingsForm::input_header)}
                        onblur={field(SettingsForm::blur_header)} />

                    if flags.demo_expired {
                        <div class="form__checkbox-container form__checkbox-container--expired">
                            <p class="form__checkbox-description">
                                { t("features.settings.form.demo.expired", "") }
                            </p>
                        </div>
                    } else {
                        <div class="form__checkbox-container">
                            <label class="form__checkbox-label" for="demo-checkbox">
                                <input
                                    id="demo-checkbox"
                                    type="checkbox"
                                    class="checkbox form__checkbox"
                                    checked={settings.demo}
                                    disabled={flags.demo_checkbox_disabled}
                                    onchange={ontoggle} />
                                <span class="form__checkbox-text">
                                    { t("features.settings.form.demo.title", "Demo") }
                                </span>
                            </label>
                            <p class="form__checkbox-description">{ form.demo_description() }</p>
                        </div>
                    }

                    <div class="form__button-container">
                        <Button
                            kind="submit"
                            label={t("features.settings.form.save", "Save")}
                            disabled={flags.save_disabled}
                            class={classes!("form__save-button")} />
                    </div>
                </form>
            </div>
        </div>
    }
}
