//! Category to recovery plan table

use std::time::Duration;

use serde::Serialize;

use crate::record::ErrorRecord;
use crate::taxonomy::FailureCategory;

/// Exponential backoff for automatically retryable failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RetryPolicy {
    /// Retries allowed after the first failure
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_attempts,
            base_delay_ms,
            max_delay_ms,
        }
    }

    /// Delay before retry number `attempt` (0-based), capped at the maximum
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        let millis = self
            .base_delay_ms
            .saturating_mul(factor)
            .min(self.max_delay_ms);
        Duration::from_millis(millis)
    }

    /// Whether another retry is allowed after `retry_count` retries
    pub fn allows(&self, retry_count: u32) -> bool {
        retry_count < self.max_attempts
    }
}

/// Ordered remediation for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoveryPlan {
    /// Imperative steps, most useful first
    pub steps: Vec<&'static str>,
    pub can_retry_automatically: bool,
    pub requires_user_action: bool,
    /// Present only when `can_retry_automatically`
    pub retry_policy: Option<RetryPolicy>,
}

impl RecoveryPlan {
    fn user_driven(steps: &[&'static str]) -> Self {
        Self {
            steps: steps.to_vec(),
            can_retry_automatically: false,
            requires_user_action: true,
            retry_policy: None,
        }
    }

    fn automatic(steps: &[&'static str], policy: RetryPolicy) -> Self {
        Self {
            steps: steps.to_vec(),
            can_retry_automatically: true,
            requires_user_action: false,
            retry_policy: Some(policy),
        }
    }
}

const NETWORK_RETRY: RetryPolicy = RetryPolicy::new(3, 1_000, 30_000);
const SERVER_RETRY: RetryPolicy = RetryPolicy::new(3, 5_000, 60_000);
const SAVE_RETRY: RetryPolicy = RetryPolicy::new(2, 500, 2_000);

/// Stateless recovery rules
#[derive(Debug, Clone, Copy, Default)]
pub struct RecoveryPlanner;

impl RecoveryPlanner {
    /// Recovery plan for a category
    pub fn plan_for(category: FailureCategory) -> RecoveryPlan {
        match category {
            FailureCategory::NetworkFailure => RecoveryPlan::automatic(
                &[
                    "Check your internet connection",
                    "Ensure Airplane Mode is turned off",
                    "Try again once you are back online",
                ],
                NETWORK_RETRY,
            ),
            FailureCategory::Timeout => RecoveryPlan::automatic(
                &[
                    "Try the request again in a moment",
                    "Check that your connection is stable",
                ],
                NETWORK_RETRY,
            ),
            FailureCategory::ServerError => RecoveryPlan::automatic(
                &[
                    "Try again in a few minutes",
                    "Check the service status page for outages",
                ],
                SERVER_RETRY,
            ),
            FailureCategory::SaveFailure => RecoveryPlan::automatic(
                &[
                    "Try saving the change again",
                    "Ensure the device has free storage space",
                    "Contact support if saving keeps failing",
                ],
                SAVE_RETRY,
            ),
            FailureCategory::ValidationError
            | FailureCategory::InvalidInput
            | FailureCategory::MissingField
            | FailureCategory::InvalidRange => RecoveryPlan::user_driven(&[
                "Check the highlighted fields for mistakes",
                "Ensure every required field is filled in",
                "Ensure dates and amounts are within the allowed range",
            ]),
            FailureCategory::DatabaseCorrupted => RecoveryPlan::user_driven(&[
                "Try restarting the app",
                "Contact support so your data can be recovered",
            ]),
            FailureCategory::CloudKitQuota => RecoveryPlan::user_driven(&[
                "Delete old trips or attachments you no longer need",
                "Free up space in your iCloud settings",
                "Upgrade your iCloud storage plan",
            ]),
            FailureCategory::Other => RecoveryPlan::user_driven(&[
                "Try the action again",
                "Contact support if the problem persists",
            ]),
        }
    }

    /// Plan for a concrete record.
    ///
    /// Automatic retry is withdrawn once the record is unrecoverable or
    /// its retry budget is spent; the user then has to act.
    pub fn plan_for_record(record: &ErrorRecord) -> RecoveryPlan {
        let mut plan = Self::plan_for(record.category());
        let exhausted = plan
            .retry_policy
            .map_or(true, |policy| !policy.allows(record.retry_count()));
        if plan.can_retry_automatically && (exhausted || !record.is_recoverable()) {
            plan.can_retry_automatically = false;
            plan.requires_user_action = true;
            plan.retry_policy = None;
        }
        plan
    }
}
