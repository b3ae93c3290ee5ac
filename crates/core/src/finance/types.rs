//! Financial title domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use praxis_shared::types::quantize;

/// Lifecycle status of a payable/receivable title.
///
/// `Open` and `Overdue` are interchangeable depending on the due date;
/// `Paid` is entered whenever a settlement date is present; `Canceled`
/// is an explicit user action and is terminal for automatic sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancialStatus {
    /// Title is open and not yet due.
    Open,
    /// Title is past its due date without settlement.
    Overdue,
    /// Title has been settled.
    Paid,
    /// Title was canceled (terminal for automatic sync).
    Canceled,
}

impl FinancialStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Overdue => "overdue",
            Self::Paid => "paid",
            Self::Canceled => "canceled",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "overdue" => Some(Self::Overdue),
            "paid" => Some(Self::Paid),
            "canceled" => Some(Self::Canceled),
            _ => None,
        }
    }

    /// Returns true if the title still awaits settlement.
    #[must_use]
    pub fn is_outstanding(&self) -> bool {
        matches!(self, Self::Open | Self::Overdue)
    }
}

impl fmt::Display for FinancialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment method of a title or an individual payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Instant transfer (Pix).
    Pix,
    /// Bank transfer.
    Transfer,
    /// Bank slip (boleto).
    Boleto,
    /// Credit/debit card.
    Card,
    /// Cash.
    Cash,
    /// Anything else.
    Other,
}

impl PaymentMethod {
    /// Returns the string representation of the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pix => "pix",
            Self::Transfer => "transfer",
            Self::Boleto => "boleto",
            Self::Card => "card",
            Self::Cash => "cash",
            Self::Other => "other",
        }
    }

    /// Parses a method from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pix" => Some(Self::Pix),
            "transfer" => Some(Self::Transfer),
            "boleto" => Some(Self::Boleto),
            "card" => Some(Self::Card),
            "cash" => Some(Self::Cash),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The shared value shape of a payable/receivable title.
///
/// Ownership links (supplier, client, invoice) live on the persistence
/// side; everything that participates in the status machine and the
/// amount derivation is here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Title {
    /// Document number, unique per counterparty.
    pub document_number: String,
    /// Free-text description.
    pub description: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Due date.
    pub due_date: NaiveDate,
    /// Face amount.
    pub amount: Decimal,
    /// Discount applied.
    pub discount: Decimal,
    /// Interest accrued.
    pub interest: Decimal,
    /// Penalty applied.
    pub penalty: Decimal,
    /// Current lifecycle status.
    pub status: FinancialStatus,
    /// Settlement date, present once the title is fully paid.
    pub settlement_date: Option<NaiveDate>,
    /// Payment method, if known.
    pub payment_method: Option<PaymentMethod>,
    /// Free-text notes.
    pub notes: String,
}

impl Title {
    /// Effective amount of the title: amount - discount + interest + penalty,
    /// quantized to 2 decimal places.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        quantize(self.amount - self.discount + self.interest + self.penalty)
    }
}
