//! Browser Surfaces
//!
//! Blocking alerts, the staleness notice, and locale-aware dates.

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use notes_sync::Notifier;
use serde::Serialize;
use wasm_bindgen::JsValue;

/// Alerts through `window.alert`, staleness through a banner signal
pub struct BrowserNotifier {
    stale_notice: RwSignal<Option<String>>,
}

impl BrowserNotifier {
    pub fn new(stale_notice: RwSignal<Option<String>>) -> Self {
        Self { stale_notice }
    }
}

impl Notifier for BrowserNotifier {
    fn alert(&self, message: &str) {
        log::warn!("[Alert] {}", message);
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn stale(&self, pending: &[String]) {
        log::warn!("[Alert] lists did not confirm refresh: {}", pending.join(", "));
        let _ = self
            .stale_notice
            .try_set(Some("Some lists may be out of date. Reload to see the latest notes.".to_string()));
    }

    fn fresh(&self) {
        if self.stale_notice.try_get_untracked().flatten().is_some() {
            let _ = self.stale_notice.try_set(None);
        }
    }
}

#[derive(Serialize)]
struct LongDateOptions {
    weekday: &'static str,
    year: &'static str,
    month: &'static str,
    day: &'static str,
}

/// Long localized date, e.g. "Thursday, April 14, 2022"
pub fn format_long_date(at: &DateTime<Utc>) -> String {
    let options = LongDateOptions {
        weekday: "long",
        year: "numeric",
        month: "long",
        day: "numeric",
    };
    match serde_wasm_bindgen::to_value(&options) {
        Ok(options) => {
            let date = js_sys::Date::new(&JsValue::from_f64(at.timestamp_millis() as f64));
            date.to_locale_date_string("default", &options).into()
        }
        Err(_) => at.format("%A, %B %-d, %Y").to_string(),
    }
}
