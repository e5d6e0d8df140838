use chrono::TimeDelta;
use docboard_api_models::{AUTHORIZE_PATH, AuthorizationResponse, SIGNATURE_HEADER};
use docboard_core::authorization::{AuthorizationApi, ApplicationStore, NavigationTarget};
use docboard_core::ports::{BoardHost, Clock, HttpTransport};
use docboard_core::settings::{SettingsApi, SettingsStore};
use docboard_core::{ApiError, BackendClient};
use docboard_test_support::fixtures::{
    BASE_URL, ID_TOKEN, credentials, demo_started, fixed_now, init_test_tracing, json_response,
    status,
};
use docboard_test_support::mocks::{
    FakeAuthorizationApi, FakeHost, FakeSettingsApi, ManualClock, ScriptedTransport,
};
use std::rc::Rc;

struct Harness {
    settings_api: Rc<FakeSettingsApi>,
    auth_api: Rc<FakeAuthorizationApi>,
    clock: Rc<ManualClock>,
    settings: Rc<SettingsStore>,
    app: ApplicationStore,
}

fn harness() -> Harness {
    init_test_tracing();
    let settings_api = Rc::new(FakeSettingsApi::default());
    let auth_api = Rc::new(FakeAuthorizationApi::default());
    let clock = Rc::new(ManualClock::default());
    let settings = Rc::new(SettingsStore::new(
        Rc::clone(&settings_api) as Rc<dyn SettingsApi>,
        Rc::clone(&clock) as Rc<dyn Clock>,
        30,
    ));
    let app = ApplicationStore::new(
        Rc::clone(&settings),
        Rc::clone(&auth_api) as Rc<dyn AuthorizationApi>,
        Rc::clone(&clock) as Rc<dyn Clock>,
    );
    Harness {
        settings_api,
        auth_api,
        clock,
        settings,
        app,
    }
}

#[tokio::test]
async fn configured_board_goes_home_as_admin() {
    let h = harness();
    h.settings_api.push_fetch(Ok(credentials()));

    assert_eq!(h.app.reload_authorization().await, NavigationTarget::Home);
    let state = h.app.snapshot();
    assert!(state.initialized);
    assert!(!state.loading);
    assert!(state.authorized);
    assert!(state.admin);
    assert!(!state.retries_exhausted);
}

#[tokio::test]
async fn admin_without_settings_is_sent_to_settings() {
    let h = harness();
    h.settings_api
        .push_fetch(Ok(demo_started(fixed_now() - TimeDelta::days(45))));

    assert_eq!(h.app.reload_authorization().await, NavigationTarget::Settings);
    assert!(!h.settings.snapshot().has_settings);
}

#[tokio::test]
async fn non_admin_without_settings_stays_home() {
    let h = harness();
    h.settings_api.push_fetch(Err(ApiError::AccessDenied));

    assert_eq!(h.app.reload_authorization().await, NavigationTarget::Home);
    let state = h.app.snapshot();
    assert!(state.authorized);
    assert!(!state.admin);
}

#[tokio::test]
async fn unauthorized_user_is_locked_out() {
    let h = harness();
    h.settings_api.push_fetch(Err(ApiError::NotAuthorized));

    assert_eq!(h.app.reload_authorization().await, NavigationTarget::Home);
    let state = h.app.snapshot();
    assert!(!state.authorized);
    assert!(!state.admin);
    assert!(state.initialized);
}

#[tokio::test]
async fn exhausted_retries_are_flagged() {
    let h = harness();
    h.settings_api.push_fetch(Err(ApiError::MaxRetriesExceeded));

    assert_eq!(h.app.reload_authorization().await, NavigationTarget::Home);
    let state = h.app.snapshot();
    assert!(state.authorized);
    assert!(!state.admin);
    assert!(state.retries_exhausted);
}

#[tokio::test]
async fn unexpected_errors_keep_admin_access() {
    let h = harness();
    h.settings_api
        .push_fetch(Err(ApiError::ServiceUnavailable { message: None }));

    h.app.reload_authorization().await;
    let state = h.app.snapshot();
    assert!(state.authorized);
    assert!(state.admin);
}

#[tokio::test]
async fn refresh_reclassifies_without_touching_initialized() {
    let h = harness();
    h.settings_api.push_fetch(Err(ApiError::MaxRetriesExceeded));
    h.settings_api.push_fetch(Ok(credentials()));

    h.app.refresh_authorization().await;
    let state = h.app.snapshot();
    assert!(state.retries_exhausted);
    assert!(!state.initialized);

    h.app.refresh_authorization().await;
    let state = h.app.snapshot();
    assert!(!state.retries_exhausted);
    assert!(state.admin);
    assert_eq!(h.settings_api.fetch_calls(), 2);
}

#[tokio::test]
async fn token_expiry_is_skewed_and_tracked() {
    let h = harness();
    assert!(h.app.should_refresh_token());

    let expires_at = fixed_now().timestamp() + 3600;
    h.auth_api.push(Ok(AuthorizationResponse {
        token: "backend-token".into(),
        expires_at,
    }));
    h.app.authorize().await;

    let state = h.app.snapshot();
    assert!(state.has_token);
    assert_eq!(state.token_expires_at, Some(expires_at - 50));
    assert_eq!(h.app.auth_token().as_deref(), Some("backend-token"));
    assert!(!h.app.should_refresh_token());

    h.clock.advance(TimeDelta::seconds(3600 - 50) - TimeDelta::milliseconds(101));
    assert!(!h.app.should_refresh_token());
    h.clock.advance(TimeDelta::milliseconds(1));
    assert!(h.app.should_refresh_token());
}

#[tokio::test]
async fn extreme_token_expiry_does_not_overflow() {
    let h = harness();
    h.auth_api.push(Ok(AuthorizationResponse {
        token: "ancient".into(),
        expires_at: i64::MIN,
    }));
    h.app.authorize().await;
    assert_eq!(h.app.snapshot().token_expires_at, Some(i64::MIN));
    assert!(h.app.should_refresh_token());

    h.auth_api.push(Ok(AuthorizationResponse {
        token: "forever".into(),
        expires_at: i64::MAX,
    }));
    h.app.authorize().await;
    assert!(!h.app.should_refresh_token());
}

#[tokio::test]
async fn failed_token_request_clears_token_and_classifies() {
    let h = harness();
    h.auth_api.push(Ok(AuthorizationResponse {
        token: "old".into(),
        expires_at: fixed_now().timestamp() + 600,
    }));
    h.app.authorize().await;

    h.auth_api.push(Err(ApiError::AccessDenied));
    h.app.authorize().await;

    let state = h.app.snapshot();
    assert!(!state.has_token);
    assert_eq!(state.auth_token, None);
    assert_eq!(state.token_expires_at, None);
    assert!(state.authorized);
    assert!(!state.admin);
    assert!(h.app.should_refresh_token());
}

#[tokio::test]
async fn token_endpoint_over_http() {
    init_test_tracing();
    let transport = Rc::new(ScriptedTransport::with_responses([
        json_response(
            200,
            &serde_json::json!({ "token": "t", "expiresAt": 1_700_000_000 }),
        ),
        status(401),
        status(418),
    ]));
    let client = BackendClient::new(
        BASE_URL,
        Rc::new(FakeHost::default()) as Rc<dyn BoardHost>,
        Rc::clone(&transport) as Rc<dyn HttpTransport>,
        Rc::new(ManualClock::default()) as Rc<dyn Clock>,
    );

    let authorization = client.authorize().await.expect("token");
    assert_eq!(authorization.expires_at, 1_700_000_000);
    assert_eq!(client.authorize().await, Err(ApiError::NotAuthorized));
    assert_eq!(
        client.authorize().await,
        Err(ApiError::ServiceUnavailable { message: None })
    );

    let requests = transport.requests();
    assert_eq!(requests[0].url, format!("{BASE_URL}/{AUTHORIZE_PATH}"));
    assert_eq!(requests[0].header_value(SIGNATURE_HEADER), Some(ID_TOKEN));
}
