//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::config::ApiConfig;
use crate::toast::Toasts;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload everything from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload everything from backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Backend settings as last saved
    pub config: RwSignal<ApiConfig>,
    pub toasts: Toasts,
}

impl AppContext {
    pub fn new(reload_trigger: (ReadSignal<u32>, WriteSignal<u32>), config: ApiConfig) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            config: RwSignal::new(config),
            toasts: Toasts::new(),
        }
    }

    /// Trigger a reload of all collections
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Name recorded on handovers
    pub fn operator(&self) -> String {
        self.config.with(|c| c.operator.clone())
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
