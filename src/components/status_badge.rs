//! Status Badge Component

use leptos::prelude::*;

use crate::models::{ConnectionStatus, InvoiceStatus, LeadStatus, Priority, TicketStatus};

/// Pill with a status label; the class is derived from the label
#[component]
pub fn StatusBadge(#[prop(into)] label: String) -> impl IntoView {
    let class = format!("badge badge-{}", label.to_lowercase().replace(' ', "-"));
    view! { <span class=class>{label}</span> }
}

pub fn ticket_badge(status: TicketStatus) -> impl IntoView {
    view! { <span class=format!("badge {}", status.css_class())>{status.as_str()}</span> }
}

pub fn priority_badge(priority: Priority) -> impl IntoView {
    view! { <StatusBadge label=priority.as_str() /> }
}

pub fn connection_badge(status: ConnectionStatus) -> impl IntoView {
    view! { <StatusBadge label=status.as_str() /> }
}

pub fn lead_badge(status: LeadStatus) -> impl IntoView {
    view! { <StatusBadge label=status.as_str() /> }
}

pub fn invoice_badge(status: InvoiceStatus) -> impl IntoView {
    view! { <StatusBadge label=status.as_str() /> }
}
