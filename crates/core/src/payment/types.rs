//! Payment domain types for the request lifecycle.
//!
//! Wire field names preserve the original system's spelling
//! (`suspence_payment`, `suspenceAmount`, `recept_reference`) so existing
//! clients and stored records keep working.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Category marking a payment as itemized vehicle maintenance.
///
/// The category field is otherwise free-form (`"fuel"`, `"bgi"`, ...);
/// only this value carries extra validation rules.
pub const VEHICLE_MAINTENANCE: &str = "vehicleMaintenance";

/// The kind of payment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    /// Cash payment against a receipt.
    ReceiptPayment,
    /// Cash advance to be reconciled later against a returned amount.
    #[serde(rename = "suspence_payment")]
    SuspensePayment,
    /// Disbursed via a bank check rather than a cash account.
    CheckPayment,
    /// Direct bank transfer.
    BankTransfer,
}

impl PaymentKind {
    /// Returns the wire representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReceiptPayment => "receipt_payment",
            Self::SuspensePayment => "suspence_payment",
            Self::CheckPayment => "check_payment",
            Self::BankTransfer => "bank_transfer",
        }
    }

    /// Parses a kind from its wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "receipt_payment" => Some(Self::ReceiptPayment),
            "suspence_payment" => Some(Self::SuspensePayment),
            "check_payment" => Some(Self::CheckPayment),
            "bank_transfer" => Some(Self::BankTransfer),
            _ => None,
        }
    }

    /// Returns the initial status for a newly created request of this kind.
    #[must_use]
    pub fn initial_status(&self) -> PaymentStatus {
        match self {
            Self::SuspensePayment => PaymentStatus::Suspense,
            _ => PaymentStatus::Requested,
        }
    }
}

impl fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment request status in the approval workflow.
///
/// The valid transitions are:
/// - Requested → Approved (approve)
/// - Suspence → Approved (approve)
/// - Requested/Suspence/Approved → Rejected (reject)
/// - Approved → Paid (pay)
/// - Rejected → Requested (appeal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Awaiting approval.
    Requested,
    /// Suspense advance awaiting approval.
    #[serde(rename = "suspence")]
    Suspense,
    /// Approved and ready for payment.
    Approved,
    /// Paid out (immutable).
    Paid,
    /// Rejected; may be appealed back to Requested.
    Rejected,
}

impl PaymentStatus {
    /// Returns the wire representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Suspense => "suspence",
            Self::Approved => "approved",
            Self::Paid => "paid",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from its wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "requested" => Some(Self::Requested),
            "suspence" => Some(Self::Suspense),
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

    /// Returns true if the request is awaiting an approval decision.
    #[must_use]
    pub fn is_awaiting_approval(&self) -> bool {
        matches!(self, Self::Requested | Self::Suspense)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A vehicle maintenance line item on a payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLine {
    /// The vehicle the work was done on.
    pub vehicle_id: Uuid,
    /// The action performed (e.g. "replace", "repair").
    pub action: String,
    /// Component category (e.g. "engine", "brakes").
    pub component_category: String,
    /// The specific component.
    pub component: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Quantity of parts or units of work.
    pub quantity: Decimal,
    /// Line amount.
    pub amount: Decimal,
}

/// A payment request record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Unique identifier.
    pub id: Uuid,
    /// The kind of payment.
    #[serde(rename = "type")]
    pub kind: PaymentKind,
    /// Free-form category (`paymentType` on the wire).
    #[serde(rename = "paymentType")]
    pub category: String,
    /// Current workflow status.
    pub status: PaymentStatus,
    /// Amount for receipt/check/transfer kinds.
    pub amount: Option<Decimal>,
    /// Advance amount for suspense payments.
    #[serde(rename = "suspenceAmount")]
    pub suspense_amount: Option<Decimal>,
    /// Cash handed back when a suspense advance is settled.
    pub return_amount: Option<Decimal>,
    /// Optional quantity (e.g. liters of fuel).
    pub quantity: Option<Decimal>,
    /// Who the payment goes to.
    #[serde(rename = "to")]
    pub payee: String,
    /// Why the payment is requested.
    pub reason: Option<String>,
    /// Receipt reference captured at pay time.
    #[serde(rename = "recept_reference")]
    pub receipt_reference: Option<String>,
    /// URL of the uploaded receipt image, if any.
    pub related_receipt_url: Option<String>,
    /// Voucher serial number, assigned at pay time.
    pub serial_number: Option<i64>,
    /// Cash account the payment was drawn from.
    pub cash_account_id: Option<Uuid>,
    /// Back-link to a check request when converted to the check path.
    pub check_request_id: Option<Uuid>,
    /// User who requested the payment.
    pub requested_by: Uuid,
    /// User who approved it, once approved.
    pub approved_by: Option<Uuid>,
    /// User who rejected it, once rejected.
    pub rejected_by: Option<Uuid>,
    /// User who created the record.
    pub created_by: Uuid,
    /// Reason given on rejection.
    pub rejected_reason: Option<String>,
    /// Vehicle the request concerns, required for transporter requesters.
    pub vehicle_id: Option<Uuid>,
    /// Itemized maintenance work, ordered as submitted.
    #[serde(rename = "vehicleMaintenance")]
    pub maintenance_lines: Vec<MaintenanceLine>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a payment request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentInput {
    /// The kind of payment.
    #[serde(rename = "type")]
    pub kind: PaymentKind,
    /// Free-form category.
    #[serde(rename = "paymentType")]
    pub category: String,
    /// Amount for receipt/check/transfer kinds.
    pub amount: Option<Decimal>,
    /// Advance amount for suspense payments.
    #[serde(rename = "suspenceAmount")]
    pub suspense_amount: Option<Decimal>,
    /// Optional quantity.
    pub quantity: Option<Decimal>,
    /// Who the payment goes to.
    #[serde(rename = "to", default)]
    pub payee: String,
    /// Why the payment is requested.
    pub reason: Option<String>,
    /// Pre-filled receipt reference.
    #[serde(rename = "recept_reference")]
    pub receipt_reference: Option<String>,
    /// User requesting the payment.
    pub requested_by: Uuid,
    /// User creating the record.
    pub created_by: Uuid,
    /// Whether the requester holds the transporter role.
    #[serde(default)]
    pub requester_is_transporter: bool,
    /// Vehicle the request concerns.
    pub vehicle_id: Option<Uuid>,
    /// Itemized maintenance work.
    #[serde(rename = "vehicleMaintenance", default)]
    pub maintenance_lines: Vec<MaintenanceLine>,
}

/// Workflow action representing a validated state transition.
///
/// Each variant captures the action performed, the resulting state, and
/// the audit trail information. The engine applies the action to the
/// stored record; the rules service never mutates anything itself.
#[derive(Debug, Clone)]
pub enum PaymentAction {
    /// Approve a request awaiting approval.
    Approve {
        /// The new status after approval.
        new_status: PaymentStatus,
        /// The user who approved the request.
        approved_by: Uuid,
        /// When the request was approved.
        approved_at: DateTime<Utc>,
    },
    /// Reject a non-terminal, unpaid request.
    Reject {
        /// The new status after rejection.
        new_status: PaymentStatus,
        /// The user who rejected the request.
        rejected_by: Uuid,
        /// When the request was rejected.
        rejected_at: DateTime<Utc>,
        /// The reason for rejection.
        rejected_reason: String,
    },
    /// Reopen a rejected request for another approval round.
    Appeal {
        /// The new status after appeal (Requested).
        new_status: PaymentStatus,
    },
    /// Redirect a cash-path request to the check path.
    ConvertToCheck {
        /// The new kind (CheckPayment). Status is unchanged.
        new_kind: PaymentKind,
    },
}

impl PaymentAction {
    /// Returns the new status resulting from this action, if it changes.
    #[must_use]
    pub fn new_status(&self) -> Option<PaymentStatus> {
        match self {
            Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. }
            | Self::Appeal { new_status } => Some(*new_status),
            Self::ConvertToCheck { .. } => None,
        }
    }
}

/// The validated effects of paying an approved request.
///
/// Produced by the workflow's pay validation; the engine debits the cash
/// account by `effective_amount`, allocates the voucher serial, and then
/// applies these fields to the stored record as one atomic unit.
#[derive(Debug, Clone)]
pub struct Settlement {
    /// When the request was paid.
    pub paid_at: DateTime<Utc>,
    /// The amount to debit from the cash account. For suspense payments
    /// this is the reconciled advance minus return.
    pub effective_amount: Decimal,
    /// Maintenance lines after merging pay-time submissions.
    pub merged_lines: Vec<MaintenanceLine>,
    /// Return amount recorded at settlement, for suspense payments.
    pub return_amount: Option<Decimal>,
}
