//! FiberDesk App
//!
//! Root component: provides the store and app context, loads every
//! collection, and routes between the pages.

use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes},
    ParamSegment, StaticSegment,
};
use reactive_stores::Store;

use crate::components::{provide_board_dnd, Sidebar, ToastStack};
use crate::config::ApiConfig;
use crate::context::AppContext;
use crate::loaders::load_all;
use crate::pages::{
    BillingPage, CustomerDetailPage, CustomersPage, DashboardPage, LeadsPage, NotificationsPage,
    OnboardingPage, PlansPage, SettingsPage, TeamPage, TicketDetailPage, TicketsPage,
};
use crate::store::{AppState, AppStore};

#[component]
pub fn App() -> impl IntoView {
    let store: AppStore = Store::new(AppState::default());
    provide_context(store);

    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let ctx = AppContext::new((reload_trigger, set_reload_trigger), ApiConfig::load());
    provide_context(ctx);

    // Bound once so the document mouseup listener survives navigation
    provide_board_dnd(store, ctx.toasts);

    // Load everything on mount and whenever settings change
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        tracing::info!(trigger, "loading collections");
        load_all(store, ctx.toasts);
    });

    view! {
        <Router>
            <div class="app-layout">
                <Sidebar />
                <main class="main-content">
                    <Routes fallback=|| view! { <p class="muted">"Page not found."</p> }>
                        <Route path=StaticSegment("") view=DashboardPage />
                        <Route path=StaticSegment("tickets") view=TicketsPage />
                        <Route path=(StaticSegment("tickets"), ParamSegment("id")) view=TicketDetailPage />
                        <Route path=StaticSegment("customers") view=CustomersPage />
                        <Route path=(StaticSegment("customers"), ParamSegment("id")) view=CustomerDetailPage />
                        <Route path=StaticSegment("onboarding") view=OnboardingPage />
                        <Route path=StaticSegment("plans") view=PlansPage />
                        <Route path=StaticSegment("team") view=TeamPage />
                        <Route path=StaticSegment("leads") view=LeadsPage />
                        <Route path=StaticSegment("billing") view=BillingPage />
                        <Route path=StaticSegment("notifications") view=NotificationsPage />
                        <Route path=StaticSegment("settings") view=SettingsPage />
                    </Routes>
                </main>
            </div>
            <ToastStack />
        </Router>
    }
}
