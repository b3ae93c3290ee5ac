//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `ProjectId` where a
//! `ClientId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a platform user.");
typed_id!(ClientId, "Unique identifier for a client.");
typed_id!(SupplierId, "Unique identifier for a supplier.");
typed_id!(ConsultantId, "Unique identifier for a consultant.");
typed_id!(BankAccountId, "Unique identifier for a company bank account.");
typed_id!(ProductId, "Unique identifier for a product.");
typed_id!(ModuleId, "Unique identifier for a product module.");
typed_id!(SubmoduleId, "Unique identifier for a module submodule.");
typed_id!(ProjectId, "Unique identifier for a project.");
typed_id!(ActivityId, "Unique identifier for a project activity.");
typed_id!(TimeEntryId, "Unique identifier for a time entry.");
typed_id!(InvoiceId, "Unique identifier for a billing invoice.");
typed_id!(PayableId, "Unique identifier for an accounts payable title.");
typed_id!(ReceivableId, "Unique identifier for an accounts receivable title.");
typed_id!(PaymentId, "Unique identifier for a payment against a title.");
typed_id!(ObservationId, "Unique identifier for a project observation.");
