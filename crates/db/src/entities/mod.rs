//! `SeaORM` entity definitions.
//!
//! Status enums are stored as strings and converted through the
//! `as_str`/`parse` pairs on the core domain enums.

pub mod account_plan_items;
pub mod accounts_payable;
pub mod accounts_receivable;
pub mod activity_consultants;
pub mod activity_predecessors;
pub mod bank_accounts;
pub mod billing_invoices;
pub mod clients;
pub mod consultants;
pub mod dispatch_log;
pub mod modules;
pub mod payable_payments;
pub mod products;
pub mod project_activities;
pub mod project_observations;
pub mod projects;
pub mod receivable_payments;
pub mod submodules;
pub mod suppliers;
pub mod time_entries;
pub mod users;
