//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Every write to an
//! entity list goes through the helpers at the bottom of this file.

use std::collections::HashMap;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::board::{BoardHandle, TicketBoard};
use crate::models::{
    Area, Connection, Customer, Entity, Invoice, Lead, Notification, Plan, Subscription, TeamMember,
};

/// Backend collections the app loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Tickets,
    Customers,
    Connections,
    Plans,
    Team,
    Areas,
    Leads,
    Invoices,
    Notifications,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Tickets plus in-flight optimistic changes
    pub board: TicketBoard,
    pub customers: Vec<Customer>,
    pub connections: Vec<Connection>,
    pub plans: Vec<Plan>,
    /// Only for customers whose detail page was opened
    pub subscriptions: Vec<Subscription>,
    pub team: Vec<TeamMember>,
    pub areas: Vec<Area>,
    pub leads: Vec<Lead>,
    pub invoices: Vec<Invoice>,
    pub notifications: Vec<Notification>,
    pub loads: HashMap<Resource, LoadState>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

impl BoardHandle for AppStore {
    fn with_board<R>(&self, f: impl FnOnce(&mut TicketBoard) -> R) -> R {
        f(&mut *self.board().write())
    }
}

// ========================
// Entity list helpers
// ========================

/// Replace the entity with the same id, or append it
pub fn upsert_entity<T: Entity>(list: &mut Vec<T>, entity: T) {
    match list.iter_mut().find(|e| e.id() == entity.id()) {
        Some(slot) => *slot = entity,
        None => list.push(entity),
    }
}

/// Drop the entity with `id`; true if one was removed
pub fn remove_entity<T: Entity>(list: &mut Vec<T>, id: &T::Id) -> bool {
    let before = list.len();
    list.retain(|e| e.id() != id);
    list.len() != before
}

pub fn find_entity<'a, T: Entity>(list: &'a [T], id: &T::Id) -> Option<&'a T> {
    list.iter().find(|e| e.id() == id)
}

/// Replace every entity fetched for one scope (e.g. one customer's
/// connections), leaving entities outside the scope alone
pub fn merge_entities<T: Entity>(list: &mut Vec<T>, fresh: Vec<T>, in_scope: impl Fn(&T) -> bool) {
    list.retain(|e| !in_scope(e));
    for entity in fresh {
        upsert_entity(list, entity);
    }
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_load(store: &AppStore, resource: Resource, state: LoadState) {
    store.loads().write().insert(resource, state);
}

pub fn store_load_state(store: &AppStore, resource: Resource) -> LoadState {
    store.loads().read().get(&resource).cloned().unwrap_or_default()
}

pub fn store_upsert_customer(store: &AppStore, customer: Customer) {
    upsert_entity(&mut *store.customers().write(), customer);
}

pub fn store_upsert_connection(store: &AppStore, connection: Connection) {
    upsert_entity(&mut *store.connections().write(), connection);
}

pub fn store_upsert_plan(store: &AppStore, plan: Plan) {
    upsert_entity(&mut *store.plans().write(), plan);
}

pub fn store_upsert_subscription(store: &AppStore, subscription: Subscription) {
    upsert_entity(&mut *store.subscriptions().write(), subscription);
}

pub fn store_upsert_member(store: &AppStore, member: TeamMember) {
    upsert_entity(&mut *store.team().write(), member);
}

pub fn store_upsert_area(store: &AppStore, area: Area) {
    upsert_entity(&mut *store.areas().write(), area);
}

pub fn store_upsert_lead(store: &AppStore, lead: Lead) {
    upsert_entity(&mut *store.leads().write(), lead);
}

pub fn store_upsert_invoice(store: &AppStore, invoice: Invoice) {
    upsert_entity(&mut *store.invoices().write(), invoice);
}

pub fn store_upsert_notification(store: &AppStore, notification: Notification) {
    upsert_entity(&mut *store.notifications().write(), notification);
}

/// Remove a customer together with the records hanging off it
pub fn store_remove_customer(store: &AppStore, id: &crate::models::CustomerId) {
    remove_entity(&mut *store.customers().write(), id);
    store.connections().write().retain(|c| &c.customer != id);
    store.invoices().write().retain(|i| &i.customer != id);
    store.subscriptions().write().retain(|s| &s.customer != id);
}

pub fn store_remove_plan(store: &AppStore, id: &crate::models::PlanId) {
    remove_entity(&mut *store.plans().write(), id);
}

pub fn store_remove_member(store: &AppStore, id: &crate::models::MemberId) {
    remove_entity(&mut *store.team().write(), id);
}

pub fn store_remove_area(store: &AppStore, id: &crate::models::AreaId) {
    remove_entity(&mut *store.areas().write(), id);
    for member in store.team().write().iter_mut() {
        member.areas.retain(|a| a != id);
    }
}

pub fn store_remove_lead(store: &AppStore, id: &crate::models::LeadId) {
    remove_entity(&mut *store.leads().write(), id);
}

pub fn store_remove_notification(store: &AppStore, id: &crate::models::NotificationId) {
    remove_entity(&mut *store.notifications().write(), id);
}

pub fn store_mark_all_read(store: &AppStore) {
    for n in store.notifications().write().iter_mut() {
        n.read = true;
    }
}

pub fn store_unread_count(store: &AppStore) -> usize {
    store.notifications().read().iter().filter(|n| !n.read).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AreaId, Customer, CustomerId};
    use crate::board::test_support::at;

    fn area(id: &str, name: &str) -> Area {
        Area { id: AreaId::from(id), name: name.to_string(), pincode: None }
    }

    #[test]
    fn test_upsert_replaces_or_appends() {
        let mut areas = vec![area("A1", "North")];
        upsert_entity(&mut areas, area("A1", "North Zone"));
        upsert_entity(&mut areas, area("A2", "South"));
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].name, "North Zone");
    }

    #[test]
    fn test_remove_and_find() {
        let mut areas = vec![area("A1", "North"), area("A2", "South")];
        assert!(remove_entity(&mut areas, &AreaId::from("A1")));
        assert!(!remove_entity(&mut areas, &AreaId::from("A9")));
        assert!(find_entity(&areas, &AreaId::from("A2")).is_some());
        assert!(find_entity(&areas, &AreaId::from("A1")).is_none());
    }

    #[test]
    fn test_merge_only_touches_scope() {
        let customer = |id: &str, area: &str| Customer {
            id: CustomerId::from(id),
            name: id.to_string(),
            phone: "9999999999".into(),
            email: None,
            address: String::new(),
            area: Some(AreaId::from(area)),
            created_at: at(8),
        };
        let mut list = vec![customer("C1", "A1"), customer("C2", "A2"), customer("C3", "A1")];
        let in_a1 = |c: &Customer| c.area == Some(AreaId::from("A1"));

        merge_entities(&mut list, vec![customer("C1", "A1")], in_a1);

        let ids: Vec<&str> = list.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["C2", "C1"]);
    }

    #[test]
    fn test_load_state() {
        assert!(LoadState::Loading.is_loading());
        assert_eq!(LoadState::Failed("down".into()).error(), Some("down"));
        assert_eq!(LoadState::default(), LoadState::Idle);
    }
}
