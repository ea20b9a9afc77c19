//! Notifications page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::use_app_context;
use crate::models::NotificationId;
use crate::store::{
    store_mark_all_read, store_remove_notification, store_unread_count, store_upsert_notification,
    use_app_store, AppStateStoreFields,
};

#[component]
pub fn NotificationsPage() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let items = Memo::new(move |_| {
        let mut list = store.notifications().get();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    });

    let mark_read = move |id: NotificationId| {
        spawn_local(async move {
            match api::mark_notification_read(&id).await {
                Ok(n) => store_upsert_notification(&store, n),
                Err(e) => ctx.toasts.error(format!("Could not update notification: {}", e)),
            }
        });
    };

    let mark_all = move |_| {
        spawn_local(async move {
            match api::mark_all_notifications_read().await {
                Ok(()) => store_mark_all_read(&store),
                Err(e) => ctx.toasts.error(format!("Could not update notifications: {}", e)),
            }
        });
    };

    let delete = move |id: NotificationId| {
        spawn_local(async move {
            match api::delete_notification(&id).await {
                Ok(()) => store_remove_notification(&store, &id),
                Err(e) => ctx.toasts.error(format!("Could not delete notification: {}", e)),
            }
        });
    };

    view! {
        <div class="page notifications-page">
            <header class="page-header">
                <h1>"Notifications"</h1>
                <button
                    class="btn"
                    prop:disabled=move || store_unread_count(&store) == 0
                    on:click=mark_all
                >
                    "Mark all read"
                </button>
            </header>
            <Show
                when=move || !items.with(Vec::is_empty)
                fallback=|| view! { <p class="muted">"Nothing new."</p> }
            >
                <ul class="notification-list">
                    <For
                        each=move || items.get()
                        key=|n| (n.id.clone(), n.read)
                        children=move |n| {
                            let read_id = n.id.clone();
                            let delete_id = n.id.clone();
                            view! {
                                <li class={if n.read { "notification" } else { "notification unread" }}>
                                    <div class="notification-body">
                                        <strong>{n.title.clone()}</strong>
                                        <p>{n.message.clone()}</p>
                                        <span class="muted">{n.created_at.format("%d %b %Y %H:%M").to_string()}</span>
                                    </div>
                                    <div class="notification-actions">
                                        {(!n.read)
                                            .then(|| view! {
                                                <button class="btn btn-small" on:click=move |_| mark_read(read_id.clone())>
                                                    "Mark read"
                                                </button>
                                            })}
                                        <button class="delete-btn" title="Delete" on:click=move |_| delete(delete_id.clone())>
                                            "×"
                                        </button>
                                    </div>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}
