//! Onboarding Wizard
//!
//! Profile -> connection -> plan. Each step is submitted to the backend as
//! soon as it is completed and hands its id to the next step. Nothing here
//! rolls back server state: a customer created in step one stays created even
//! if the wizard is abandoned, so onboarding can be resumed later.

use thiserror::Error;

use crate::models::{ConnectionId, CustomerId, SubscriptionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum WizardStep {
    #[default]
    Profile,
    Connection,
    Plan,
    Done,
}

impl WizardStep {
    pub const STEPS: [WizardStep; 3] = [WizardStep::Profile, WizardStep::Connection, WizardStep::Plan];

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Profile => "Customer profile",
            WizardStep::Connection => "Connection & hardware",
            WizardStep::Plan => "Plan",
            WizardStep::Done => "Done",
        }
    }

    pub fn number(&self) -> usize {
        match self {
            WizardStep::Profile => 1,
            WizardStep::Connection => 2,
            WizardStep::Plan => 3,
            WizardStep::Done => 4,
        }
    }

    fn previous(&self) -> WizardStep {
        match self {
            WizardStep::Profile | WizardStep::Connection => WizardStep::Profile,
            WizardStep::Plan => WizardStep::Connection,
            WizardStep::Done => WizardStep::Plan,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Save the customer profile first")]
    MissingCustomer,
    #[error("Save the connection details first")]
    MissingConnection,
    #[error("\"{}\" is not available yet", .0.title())]
    Locked(WizardStep),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OnboardingWizard {
    step: WizardStep,
    customer_id: Option<CustomerId>,
    connection_id: Option<ConnectionId>,
    subscription_id: Option<SubscriptionId>,
}

impl OnboardingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue onboarding an existing customer at the first incomplete step
    pub fn resume(customer_id: CustomerId, connection_id: Option<ConnectionId>) -> Self {
        let step = if connection_id.is_some() { WizardStep::Plan } else { WizardStep::Connection };
        Self {
            step,
            customer_id: Some(customer_id),
            connection_id,
            subscription_id: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn customer_id(&self) -> Option<&CustomerId> {
        self.customer_id.as_ref()
    }

    pub fn connection_id(&self) -> Option<&ConnectionId> {
        self.connection_id.as_ref()
    }

    pub fn subscription_id(&self) -> Option<&SubscriptionId> {
        self.subscription_id.as_ref()
    }

    /// A step's data has been committed on the server
    pub fn is_complete(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Profile => self.customer_id.is_some(),
            WizardStep::Connection => self.connection_id.is_some(),
            WizardStep::Plan | WizardStep::Done => self.subscription_id.is_some(),
        }
    }

    pub fn is_unlocked(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Profile => true,
            WizardStep::Connection => self.customer_id.is_some(),
            WizardStep::Plan => self.customer_id.is_some() && self.connection_id.is_some(),
            WizardStep::Done => self.subscription_id.is_some(),
        }
    }

    pub fn go_to(&mut self, step: WizardStep) -> Result<(), WizardError> {
        if !self.is_unlocked(step) {
            return Err(WizardError::Locked(step));
        }
        self.step = step;
        Ok(())
    }

    /// Step back without touching anything already saved
    pub fn back(&mut self) {
        self.step = self.step.previous();
    }

    /// Guard for the connection step's submit
    pub fn require_customer(&self) -> Result<&CustomerId, WizardError> {
        self.customer_id.as_ref().ok_or(WizardError::MissingCustomer)
    }

    /// Guard for the plan step's submit
    pub fn require_connection(&self) -> Result<(&CustomerId, &ConnectionId), WizardError> {
        let customer = self.require_customer()?;
        let connection = self.connection_id.as_ref().ok_or(WizardError::MissingConnection)?;
        Ok((customer, connection))
    }

    /// Step one done. A different customer invalidates the later ids.
    pub fn profile_saved(&mut self, id: CustomerId) {
        if self.customer_id.as_ref() != Some(&id) {
            self.connection_id = None;
            self.subscription_id = None;
        }
        self.customer_id = Some(id);
        self.step = WizardStep::Connection;
    }

    pub fn connection_saved(&mut self, id: ConnectionId) -> Result<(), WizardError> {
        self.require_customer()?;
        if self.connection_id.as_ref() != Some(&id) {
            self.subscription_id = None;
        }
        self.connection_id = Some(id);
        self.step = WizardStep::Plan;
        Ok(())
    }

    pub fn plan_saved(&mut self, id: SubscriptionId) -> Result<(), WizardError> {
        self.require_connection()?;
        self.subscription_id = Some(id);
        self.step = WizardStep::Done;
        Ok(())
    }

    /// Start over with an empty wizard. Server records stay as they are.
    pub fn restart(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_submit_needs_customer() {
        let wizard = OnboardingWizard::new();
        assert_eq!(wizard.require_customer(), Err(WizardError::MissingCustomer));
        assert!(!wizard.is_unlocked(WizardStep::Connection));
    }

    #[test]
    fn test_plan_submit_needs_connection() {
        let mut wizard = OnboardingWizard::new();
        wizard.profile_saved(CustomerId::from("C1"));
        assert_eq!(wizard.require_connection(), Err(WizardError::MissingConnection));

        let mut other = OnboardingWizard::new();
        assert_eq!(other.connection_saved(ConnectionId::from("N1")), Err(WizardError::MissingCustomer));
        assert_eq!(other.plan_saved(SubscriptionId::from("S1")), Err(WizardError::MissingCustomer));
        assert_eq!(other.step(), WizardStep::Profile);
    }

    #[test]
    fn test_full_flow() {
        let mut wizard = OnboardingWizard::new();
        wizard.profile_saved(CustomerId::from("C1"));
        assert_eq!(wizard.step(), WizardStep::Connection);

        wizard.connection_saved(ConnectionId::from("N1")).expect("customer present");
        assert_eq!(wizard.step(), WizardStep::Plan);
        assert_eq!(
            wizard.require_connection(),
            Ok((&CustomerId::from("C1"), &ConnectionId::from("N1")))
        );

        wizard.plan_saved(SubscriptionId::from("S1")).expect("connection present");
        assert_eq!(wizard.step(), WizardStep::Done);
    }

    #[test]
    fn test_back_keeps_saved_ids() {
        let mut wizard = OnboardingWizard::new();
        wizard.profile_saved(CustomerId::from("C1"));
        wizard.connection_saved(ConnectionId::from("N1")).expect("customer present");
        wizard.back();
        wizard.back();

        assert_eq!(wizard.step(), WizardStep::Profile);
        assert_eq!(wizard.customer_id(), Some(&CustomerId::from("C1")));
        assert_eq!(wizard.connection_id(), Some(&ConnectionId::from("N1")));
        // Forward again without re-submitting
        assert!(wizard.go_to(WizardStep::Plan).is_ok());
    }

    #[test]
    fn test_new_customer_clears_later_steps() {
        let mut wizard = OnboardingWizard::new();
        wizard.profile_saved(CustomerId::from("C1"));
        wizard.connection_saved(ConnectionId::from("N1")).expect("customer present");
        wizard.profile_saved(CustomerId::from("C2"));

        assert_eq!(wizard.connection_id(), None);
        assert_eq!(wizard.go_to(WizardStep::Plan), Err(WizardError::Locked(WizardStep::Plan)));
    }

    #[test]
    fn test_resume_starts_at_first_incomplete_step() {
        let wizard = OnboardingWizard::resume(CustomerId::from("C1"), None);
        assert_eq!(wizard.step(), WizardStep::Connection);

        let wizard = OnboardingWizard::resume(CustomerId::from("C1"), Some(ConnectionId::from("N1")));
        assert_eq!(wizard.step(), WizardStep::Plan);
        assert!(wizard.is_complete(WizardStep::Connection));
    }

    #[test]
    fn test_restart_forgets_ids() {
        let mut wizard = OnboardingWizard::resume(CustomerId::from("C1"), None);
        wizard.restart();
        assert_eq!(wizard, OnboardingWizard::new());
    }

    #[test]
    fn test_locked_message() {
        assert_eq!(
            WizardError::Locked(WizardStep::Plan).to_string(),
            "\"Plan\" is not available yet"
        );
    }
}
