//! Service context shared by every view.
//!
//! # Design
//! - Create exactly one backend client and store pair per app boot.
//! - Views reach them through a Yew context rather than globals.

use crate::services::{BrowserClock, GlooTransport, MiroHost};
use docboard_core::authorization::{AuthorizationApi, ApplicationStore};
use docboard_core::events::DocumentEvents;
use docboard_core::ports::{BoardHost, Clock, HttpTransport};
use docboard_core::settings::{SettingsApi, SettingsStore};
use docboard_core::{BackendClient, UiConfig};
use std::rc::Rc;

/// Shared stores and host handle for UI views.
#[derive(Clone)]
pub(crate) struct ServicesCtx {
    pub host: Rc<dyn BoardHost>,
    pub settings: Rc<SettingsStore>,
    pub application: Rc<ApplicationStore>,
    pub events: Rc<DocumentEvents>,
}

impl ServicesCtx {
    /// Wire the browser adapters into the core stores.
    pub(crate) fn new(config: &UiConfig) -> Self {
        let host: Rc<dyn BoardHost> = Rc::new(MiroHost);
        let clock: Rc<dyn Clock> = Rc::new(BrowserClock);
        let transport: Rc<dyn HttpTransport> = Rc::new(GlooTransport);
        let client = Rc::new(BackendClient::new(
            config.backend_url.clone(),
            Rc::clone(&host),
            transport,
            Rc::clone(&clock),
        ));
        let settings = Rc::new(SettingsStore::new(
            Rc::clone(&client) as Rc<dyn SettingsApi>,
            Rc::clone(&clock),
            config.demo_expiration_days,
        ));
        let application = Rc::new(ApplicationStore::new(
            Rc::clone(&settings),
            client as Rc<dyn AuthorizationApi>,
            clock,
        ));
        Self {
            host,
            settings,
            application,
            events: Rc::new(DocumentEvents::new()),
        }
    }
}

impl PartialEq for ServicesCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.settings, &other.settings)
    }
}
