use chrono::TimeDelta;
use docboard_core::ApiError;
use docboard_core::authorization::{AuthorizationApi, ApplicationStore, NavigationTarget};
use docboard_core::events::DocumentEvents;
use docboard_core::i18n::{LocaleCode, TranslationBundle};
use docboard_core::ports::{BoardHost, Clock};
use docboard_core::settings::{FieldErrors, SettingsApi, SettingsForm, SettingsStore, SubmitOutcome};
use docboard_test_support::fixtures::{credentials, demo_started, fixed_now, init_test_tracing};
use docboard_test_support::mocks::{FakeAuthorizationApi, FakeHost, FakeSettingsApi, ManualClock};
use std::cell::Cell;
use std::rc::Rc;

struct Harness {
    api: Rc<FakeSettingsApi>,
    host: Rc<FakeHost>,
    events: Rc<DocumentEvents>,
    settings: Rc<SettingsStore>,
    app: Rc<ApplicationStore>,
    form: SettingsForm,
}

fn harness() -> Harness {
    init_test_tracing();
    let api = Rc::new(FakeSettingsApi::default());
    let host = Rc::new(FakeHost::default());
    let clock = Rc::new(ManualClock::default()) as Rc<dyn Clock>;
    let settings = Rc::new(SettingsStore::new(
        Rc::clone(&api) as Rc<dyn SettingsApi>,
        Rc::clone(&clock),
        30,
    ));
    let app = Rc::new(ApplicationStore::new(
        Rc::clone(&settings),
        Rc::new(FakeAuthorizationApi::default()) as Rc<dyn AuthorizationApi>,
        clock,
    ));
    let events = Rc::new(DocumentEvents::new());
    let form = SettingsForm::new(
        Rc::clone(&settings),
        Rc::clone(&app),
        Rc::clone(&events),
        Rc::clone(&host) as Rc<dyn BoardHost>,
        TranslationBundle::new(LocaleCode::En),
    );
    Harness {
        api,
        host,
        events,
        settings,
        app,
        form,
    }
}

async fn loaded(settings: docboard_api_models::SettingsResponse) -> Harness {
    let h = harness();
    h.api.push_fetch(Ok(settings));
    h.settings.initialize_settings().await.expect("loaded");
    h.form.mount();
    h
}

#[tokio::test]
async fn empty_form_cannot_be_saved() {
    let h = loaded(docboard_api_models::SettingsResponse::empty()).await;
    let flags = h.form.flags();
    assert!(flags.fields_required);
    assert!(!flags.has_inputs);
    assert!(flags.save_disabled);
    assert!(!flags.fields_disabled);
    assert!(!flags.demo_checkbox_disabled);
}

#[tokio::test]
async fn valid_credentials_enable_save() {
    let h = loaded(credentials()).await;
    assert!(!h.form.flags().save_disabled);

    h.form.input_address("http://insecure.example.com");
    assert!(h.form.flags().save_disabled);
}

#[tokio::test]
async fn input_is_sanitized_before_reaching_the_store() {
    let h = loaded(credentials()).await;
    h.form.input_address("javascript:alert(1)");
    h.form.input_header("X-<i>Auth</i>");
    h.form.input_secret("<script>steal()</script>key");

    let state = h.settings.snapshot();
    assert_eq!(state.address, "");
    assert_eq!(state.header, "X-Auth");
    assert_eq!(state.secret, "key");
}

#[tokio::test]
async fn blur_normalizes_address_and_reports_errors() {
    let h = loaded(credentials()).await;
    h.form.blur_address("  https://docs.example.com//  ");
    assert_eq!(h.settings.snapshot().address, "https://docs.example.com");
    assert_eq!(h.form.state().errors.address, None);

    h.form.blur_address("ftp://docs.example.com");
    assert_eq!(
        h.form.state().errors.address.as_deref(),
        Some("Enter a valid https address without a trailing slash")
    );

    h.form.blur_header("");
    assert!(h.form.state().errors.header.is_some());
    h.form.blur_secret(&"x".repeat(256));
    assert!(h.form.state().errors.secret.is_some());
}

#[tokio::test]
async fn enabling_demo_clears_credentials_and_errors() {
    let h = loaded(credentials()).await;
    h.form.blur_header("");
    assert!(h.form.state().errors.header.is_some());

    h.form.toggle_demo();
    let state = h.settings.snapshot();
    assert!(state.demo);
    assert!(state.address.is_empty() && state.header.is_empty() && state.secret.is_empty());
    assert_eq!(h.form.state().errors, FieldErrors::default());

    let flags = h.form.flags();
    assert!(!flags.fields_required);
    assert!(flags.fields_disabled);
    assert!(!flags.save_disabled);
}

#[tokio::test]
async fn demo_with_leftover_input_cannot_be_saved() {
    let h = loaded(credentials()).await;
    h.settings.set_demo(true);
    assert!(h.form.flags().save_disabled);
}

#[tokio::test]
async fn expired_demo_requires_credentials_and_hides_checkbox() {
    let h = loaded(demo_started(fixed_now() - TimeDelta::days(40))).await;
    let flags = h.form.flags();
    assert!(flags.demo_expired);
    assert!(flags.fields_required);
    assert!(!flags.fields_disabled);
    assert!(flags.demo_checkbox_disabled);
    assert!(flags.save_disabled);
}

#[tokio::test]
async fn demo_description_shows_expiry_once_started() {
    let h = loaded(docboard_api_models::SettingsResponse::empty()).await;
    assert!(h.form.demo_description().contains("30 days"));

    let h = loaded(demo_started(fixed_now())).await;
    assert_eq!(
        h.form.demo_description(),
        "The demo server is available until 14.04.2025."
    );
}

#[tokio::test]
async fn unmount_reverts_unsaved_edits() {
    let h = loaded(credentials()).await;
    h.form.input_secret("other");
    h.form.unmount();
    assert_eq!(h.settings.snapshot().secret, "s3cret");
}

#[tokio::test]
async fn invalid_submit_records_errors_without_saving() {
    let h = loaded(docboard_api_models::SettingsResponse::empty()).await;
    assert_eq!(h.form.submit().await, SubmitOutcome::Invalid);
    let errors = h.form.state().errors;
    assert!(errors.address.is_some() && errors.header.is_some() && errors.secret.is_some());
    assert!(h.api.saved().is_empty());
    assert!(!h.form.state().submitting);
}

#[tokio::test]
async fn locale_switch_retranslates_recorded_errors() {
    let h = loaded(docboard_api_models::SettingsResponse::empty()).await;
    h.form.blur_address("");
    assert_eq!(
        h.form.state().errors.address.as_deref(),
        Some("Enter a valid https address without a trailing slash")
    );

    h.form.set_translations(TranslationBundle::new(LocaleCode::De));
    assert_eq!(
        h.form.state().errors.address.as_deref(),
        Some("Geben Sie eine gültige https-Adresse ohne abschließenden Schrägstrich ein")
    );
}

#[tokio::test]
async fn successful_submit_refreshes_and_navigates_home() {
    let h = loaded(docboard_api_models::SettingsResponse::empty()).await;
    let refreshes = Rc::new(Cell::new(0));
    {
        let refreshes = Rc::clone(&refreshes);
        h.events.on_refresh(move || refreshes.set(refreshes.get() + 1));
    }
    h.form.input_address("https://docs.example.com");
    h.form.input_header("Authorization");
    h.form.input_secret("s3cret");
    h.api.push_fetch(Ok(credentials()));

    assert_eq!(
        h.form.submit().await,
        SubmitOutcome::Saved(NavigationTarget::Home)
    );
    assert_eq!(h.api.saved().len(), 1);
    assert_eq!(refreshes.get(), 1);
    assert_eq!(h.api.fetch_calls(), 2);
    assert!(h.app.snapshot().admin);
    assert!(h.form.state().has_saved);
    assert!(h.host.shown_errors().is_empty());

    h.form.input_secret("typed after save");
    h.form.unmount();
    assert_eq!(h.settings.snapshot().secret, "typed after save");
}

#[tokio::test]
async fn failed_submit_shows_translated_host_error() {
    let h = loaded(credentials()).await;
    h.api.push_save(Err(ApiError::ServiceUnavailable {
        message: Some("features.settings.form.errors.bad_jwt".into()),
    }));

    let outcome = h.form.submit().await;
    let message = "The document server rejected the secret key".to_string();
    assert_eq!(outcome, SubmitOutcome::Failed(message.clone()));
    assert_eq!(h.host.shown_errors(), vec![message]);
    assert!(!h.form.state().has_saved);
    assert_eq!(h.api.fetch_calls(), 1);
}
