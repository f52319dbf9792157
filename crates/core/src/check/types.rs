//! Check request domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The kind of check request.
///
/// Purchase and general checks disburse a linked payment request;
/// petty-cash and fuel checks replenish a dedicated cash account instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Check covering a purchase payment request.
    Purchase,
    /// Check covering a general payment request.
    General,
    /// Check replenishing the petty cash account.
    PettyCash,
    /// Check replenishing the fuel cash account.
    Fuel,
}

impl CheckKind {
    /// Returns the wire representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::General => "general",
            Self::PettyCash => "petty_cash",
            Self::Fuel => "fuel",
        }
    }

    /// Parses a kind from its wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "purchase" => Some(Self::Purchase),
            "general" => Some(Self::General),
            "petty_cash" => Some(Self::PettyCash),
            "fuel" => Some(Self::Fuel),
            _ => None,
        }
    }

    /// Returns true when this kind must be paired with a payment request.
    #[must_use]
    pub fn requires_linked_payment(&self) -> bool {
        matches!(self, Self::Purchase | Self::General)
    }

    /// The cash account replenished when a check of this kind is paid.
    #[must_use]
    pub fn cash_account_name(&self) -> Option<&'static str> {
        match self {
            Self::PettyCash => Some("Petty Cash"),
            Self::Fuel => Some("Fuel Cash"),
            Self::Purchase | Self::General => None,
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Check request status.
///
/// Valid transitions:
/// - Pending → Approved
/// - Pending/Approved → Rejected
/// - Rejected → Pending (appeal)
/// - Approved → Paid (through `pay` only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Awaiting approval.
    Pending,
    /// Approved, ready for disbursement.
    Approved,
    /// Disbursed (immutable).
    Paid,
    /// Rejected; may be appealed back to Pending.
    Rejected,
}

impl CheckStatus {
    /// Returns the wire representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Paid => "paid",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from its wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "paid" => Some(Self::Paid),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bank-check disbursement request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    /// Unique identifier.
    pub id: Uuid,
    /// The kind of check.
    #[serde(rename = "type")]
    pub kind: CheckKind,
    /// Check amount.
    pub amount: Decimal,
    /// Bank check number, once issued.
    pub check_number: Option<String>,
    /// Issuing bank.
    pub bank: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Who the check is made out to.
    #[serde(rename = "to")]
    pub payee: String,
    /// Why the disbursement is requested.
    pub reason: Option<String>,
    /// When the check was issued.
    pub issued_at: Option<DateTime<Utc>>,
    /// Current workflow status.
    pub status: CheckStatus,
    /// User who requested the check.
    pub requested_by: Uuid,
    /// Receipt reference captured at pay time.
    #[serde(rename = "recept_reference")]
    pub receipt_reference: Option<String>,
    /// URL of the uploaded receipt image, if any.
    pub related_receipt_url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a check request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckInput {
    /// The kind of check.
    #[serde(rename = "type")]
    pub kind: CheckKind,
    /// Check amount.
    pub amount: Decimal,
    /// Bank check number.
    pub check_number: Option<String>,
    /// Issuing bank.
    pub bank: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Who the check is made out to.
    #[serde(rename = "to", default)]
    pub payee: String,
    /// Why the disbursement is requested.
    pub reason: Option<String>,
    /// When the check was issued.
    pub issued_at: Option<DateTime<Utc>>,
    /// User requesting the check.
    pub requested_by: Uuid,
}

/// Pay-time fields for a check request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayCheckFields {
    /// Receipt reference captured at pay time.
    #[serde(rename = "recept_reference")]
    pub receipt_reference: Option<String>,
    /// URL of the uploaded receipt image.
    pub related_receipt_url: Option<String>,
}

/// Workflow action representing a validated check transition.
#[derive(Debug, Clone)]
pub enum CheckAction {
    /// Simple status update (approve/reject/appeal); no side effects.
    SetStatus {
        /// The new status.
        new_status: CheckStatus,
    },
    /// Pay an approved check; the engine branches side effects by kind.
    Pay {
        /// The new status (Paid).
        new_status: CheckStatus,
        /// When the check was paid.
        paid_at: DateTime<Utc>,
    },
}

impl CheckAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> CheckStatus {
        match self {
            Self::SetStatus { new_status } | Self::Pay { new_status, .. } => *new_status,
        }
    }
}
