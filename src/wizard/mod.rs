//! Order intake state machines and the validator they share.

pub mod assign_client;
pub mod fields;
pub mod order;
pub mod validation;

pub use assign_client::{AssignClientWizard, AssignStep, DashboardNavigator, WizardSelection};
pub use fields::{ContactField, FieldUpdate};
pub use order::{OrderSubmitter, OrderWizard, WizardError, WizardPhase};
pub use validation::{ValidationErrorMap, ValidationPolicy, validate};
