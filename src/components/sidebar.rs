//! Sidebar Component
//!
//! Left navigation with the unread-notification badge and the count of
//! board changes still waiting for the server.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::store::{store_unread_count, use_app_store, AppStateStoreFields};

const NAV: &[(&str, &str)] = &[
    ("/", "Dashboard"),
    ("/tickets", "Tickets"),
    ("/customers", "Customers"),
    ("/onboarding", "Onboarding"),
    ("/plans", "Plans"),
    ("/team", "Team & Areas"),
    ("/leads", "Leads"),
    ("/billing", "Billing"),
    ("/notifications", "Notifications"),
    ("/settings", "Settings"),
];

/// `/` only matches itself; other entries also match their sub-pages
fn is_active(href: &str, path: &str) -> bool {
    if href == "/" {
        path == "/"
    } else {
        path == href || path.starts_with(&format!("{}/", href))
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let store = use_app_store();
    let location = use_location();

    let unread = move || store_unread_count(&store);
    let pending = move || store.board().with(|b| b.pending_count());

    view! {
        <nav class="sidebar">
            <div class="sidebar-brand">"FiberDesk"</div>
            <ul class="sidebar-nav">
                {NAV
                    .iter()
                    .map(|(href, label)| {
                        let href = *href;
                        let class = move || {
                            if is_active(href, &location.pathname.get()) { "nav-link active" } else { "nav-link" }
                        };
                        view! {
                            <li>
                                <a class=class href=href>
                                    {*label}
                                    {(href == "/notifications").then(|| view! {
                                        <Show when=move || { unread() > 0 }>
                                            <span class="nav-badge">{unread}</span>
                                        </Show>
                                    })}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <Show when=move || { pending() > 0 }>
                <div class="sidebar-pending">{move || format!("Saving {} change(s)…", pending())}</div>
            </Show>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_active() {
        assert!(is_active("/", "/"));
        assert!(!is_active("/", "/tickets"));
        assert!(is_active("/tickets", "/tickets/T1"));
        assert!(!is_active("/team", "/teams"));
    }
}
