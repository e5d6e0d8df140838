//! Wall clock and timers from the browser.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use docboard_core::ports::Clock;
use js_sys::Date;
use std::time::Duration;

/// `Date.now()` plus `setTimeout`-backed sleeps.
pub(crate) struct BrowserClock;

#[async_trait(?Send)]
impl Clock for BrowserClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(Date::now() as i64).unwrap_or(DateTime::UNIX_EPOCH)
    }

    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
