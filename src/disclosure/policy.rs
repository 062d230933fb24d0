//! Category to presentation table

use std::fmt;

use serde::{Serialize, Serializer};

use crate::taxonomy::FailureCategory;

/// UI channel a failure is surfaced through, least to most intrusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisclosureLevel {
    /// Next to the offending field
    Inline,
    /// Non-modal banner
    Banner,
    /// Modal alert
    Alert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A button offered alongside the failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisclosureAction {
    Fix,
    Cancel,
    Retry,
    WorkOffline,
    ContactSupport,
    Restart,
    UpgradeStorage,
    ManageData,
    Ok,
}

impl DisclosureAction {
    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            DisclosureAction::Fix => "Fix",
            DisclosureAction::Cancel => "Cancel",
            DisclosureAction::Retry => "Retry",
            DisclosureAction::WorkOffline => "Work Offline",
            DisclosureAction::ContactSupport => "Contact Support",
            DisclosureAction::Restart => "Restart",
            DisclosureAction::UpgradeStorage => "Upgrade Storage",
            DisclosureAction::ManageData => "Manage Data",
            DisclosureAction::Ok => "OK",
        }
    }
}

impl Serialize for DisclosureAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl fmt::Display for DisclosureAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How a failure is shown to the user.
///
/// `dismissible` means the presentation can be closed without picking
/// an action. An explicit Cancel action does not make an alert
/// dismissible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub level: DisclosureLevel,
    pub actions: Vec<DisclosureAction>,
    pub blocks_interaction: bool,
    pub priority: Priority,
    pub dismissible: bool,
}

impl Presentation {
    fn new(
        level: DisclosureLevel,
        actions: &[DisclosureAction],
        blocks_interaction: bool,
        priority: Priority,
        dismissible: bool,
    ) -> Self {
        Self {
            level,
            actions: actions.to_vec(),
            blocks_interaction,
            priority,
            dismissible,
        }
    }

    /// Action labels in display order
    pub fn action_labels(&self) -> Vec<&'static str> {
        self.actions.iter().map(DisclosureAction::label).collect()
    }

    /// Whether this presentation holds the alert-tier guarantees
    pub fn satisfies_alert_contract(&self) -> bool {
        self.level != DisclosureLevel::Alert || (self.priority == Priority::High && !self.dismissible)
    }
}

/// Stateless disclosure rules
#[derive(Debug, Clone, Copy, Default)]
pub struct DisclosurePolicy;

impl DisclosurePolicy {
    /// Presentation contract for a category
    pub fn presentation_for(category: FailureCategory) -> Presentation {
        use DisclosureAction::*;
        use DisclosureLevel::*;

        match category {
            FailureCategory::InvalidInput
            | FailureCategory::MissingField
            | FailureCategory::InvalidRange
            | FailureCategory::ValidationError => {
                Presentation::new(Inline, &[Fix, Cancel], false, Priority::Medium, true)
            }
            FailureCategory::NetworkFailure
            | FailureCategory::Timeout
            | FailureCategory::ServerError => {
                Presentation::new(Banner, &[Retry, WorkOffline], false, Priority::Medium, true)
            }
            FailureCategory::SaveFailure => {
                Presentation::new(Banner, &[Retry, Cancel], false, Priority::Medium, true)
            }
            FailureCategory::DatabaseCorrupted => {
                Presentation::new(Alert, &[ContactSupport, Restart], true, Priority::High, false)
            }
            FailureCategory::CloudKitQuota => Presentation::new(
                Alert,
                &[UpgradeStorage, ManageData, Cancel],
                false,
                Priority::High,
                false,
            ),
            FailureCategory::Other => Presentation::new(Banner, &[Ok], false, Priority::Low, true),
        }
    }
}
