//! Data Loading
//!
//! Fetches collections into the store and runs board changes. Failures become
//! toasts; nothing here panics on a bad response.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::board::{dispatch, Settled, TicketChange};
use crate::error::ApiResult;
use crate::models::CustomerId;
use crate::store::{merge_entities, store_set_load, AppStateStoreFields, AppStore, LoadState, Resource};
use crate::toast::Toasts;

impl Resource {
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Tickets => "tickets",
            Resource::Customers => "customers",
            Resource::Connections => "connections",
            Resource::Plans => "plans",
            Resource::Team => "team",
            Resource::Areas => "areas",
            Resource::Leads => "leads",
            Resource::Invoices => "invoices",
            Resource::Notifications => "notifications",
        }
    }
}

/// Fetch one collection and hand it to `apply`, tracking load state
pub fn spawn_load<T, Fut>(store: AppStore, toasts: Toasts, resource: Resource, fetch: Fut, apply: fn(&AppStore, Vec<T>))
where
    T: 'static,
    Fut: Future<Output = ApiResult<Vec<T>>> + 'static,
{
    store_set_load(&store, resource, LoadState::Loading);
    spawn_local(async move {
        match fetch.await {
            Ok(items) => {
                tracing::debug!(count = items.len(), "loaded {}", resource.label());
                apply(&store, items);
                store_set_load(&store, resource, LoadState::Ready);
            }
            Err(e) => {
                store_set_load(&store, resource, LoadState::Failed(e.to_string()));
                toasts.error(format!("Could not load {}: {}", resource.label(), e));
            }
        }
    });
}

/// Everything the sidebar pages show
pub fn load_all(store: AppStore, toasts: Toasts) {
    spawn_load(store, toasts, Resource::Tickets, api::list_tickets(), |s, items| {
        s.board().write().replace_all(items)
    });
    spawn_load(store, toasts, Resource::Customers, api::list_customers(), |s, items| {
        *s.customers().write() = items
    });
    spawn_load(store, toasts, Resource::Connections, api::list_connections(), |s, items| {
        *s.connections().write() = items
    });
    spawn_load(store, toasts, Resource::Plans, api::list_plans(), |s, items| *s.plans().write() = items);
    spawn_load(store, toasts, Resource::Team, api::list_team(), |s, items| *s.team().write() = items);
    spawn_load(store, toasts, Resource::Areas, api::list_areas(), |s, items| *s.areas().write() = items);
    spawn_load(store, toasts, Resource::Leads, api::list_leads(), |s, items| *s.leads().write() = items);
    spawn_load(store, toasts, Resource::Invoices, api::list_invoices(), |s, items| {
        *s.invoices().write() = items
    });
    spawn_load(store, toasts, Resource::Notifications, api::list_notifications(), |s, items| {
        *s.notifications().write() = items
    });
}

/// Refresh the records hanging off one customer (detail page)
pub fn load_customer_records(store: AppStore, toasts: Toasts, customer: CustomerId) {
    spawn_local(async move {
        match api::list_customer_connections(&customer).await {
            Ok(fresh) => merge_entities(&mut *store.connections().write(), fresh, |c| c.customer == customer),
            Err(e) => toasts.error(format!("Could not load connections: {}", e)),
        }
        match api::list_customer_invoices(&customer).await {
            Ok(fresh) => merge_entities(&mut *store.invoices().write(), fresh, |i| i.customer == customer),
            Err(e) => toasts.error(format!("Could not load invoices: {}", e)),
        }
        match api::list_subscriptions(&customer).await {
            Ok(fresh) => merge_entities(&mut *store.subscriptions().write(), fresh, |s| s.customer == customer),
            Err(e) => toasts.error(format!("Could not load subscriptions: {}", e)),
        }
    });
}

/// Optimistically apply `change`, persist it, and report a rollback
pub fn spawn_board_change(store: AppStore, toasts: Toasts, change: TicketChange) {
    spawn_local(async move {
        let what = change.describe();
        match dispatch(&api::RestTickets, &store, change).await {
            Some(Settled::RolledBack(e)) => toasts.error(format!("Could not save ({}): {}", what, e)),
            Some(Settled::Confirmed) | Some(Settled::Superseded) => {}
            None => tracing::warn!("dropped change for a ticket no longer on the board: {}", what),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_labels_are_distinct() {
        let all = [
            Resource::Tickets,
            Resource::Customers,
            Resource::Connections,
            Resource::Plans,
            Resource::Team,
            Resource::Areas,
            Resource::Leads,
            Resource::Invoices,
            Resource::Notifications,
        ];
        let mut labels: Vec<&str> = all.iter().map(Resource::label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), all.len());
        assert_eq!(Resource::Team.label(), "team");
    }
}
