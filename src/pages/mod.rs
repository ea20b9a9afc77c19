//! Routed Pages

mod billing;
mod customer_detail;
mod customers;
mod dashboard;
mod leads;
mod notifications;
mod onboarding;
mod plans;
mod settings;
mod team;
mod ticket_detail;
mod tickets;

pub use billing::BillingPage;
pub use customer_detail::CustomerDetailPage;
pub use customers::CustomersPage;
pub use dashboard::DashboardPage;
pub use leads::LeadsPage;
pub use notifications::NotificationsPage;
pub use onboarding::OnboardingPage;
pub use plans::PlansPage;
pub use settings::SettingsPage;
pub use team::TeamPage;
pub use ticket_detail::TicketDetailPage;
pub use tickets::TicketsPage;
