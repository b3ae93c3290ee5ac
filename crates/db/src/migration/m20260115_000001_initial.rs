//! Initial database migration.
//!
//! Creates every core table: registration catalogs, projects and
//! activities, time entries, billing invoices, the payable/receivable
//! titles with their payment ledgers, project observations and the
//! dispatch log.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: REGISTRATIONS
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(CLIENTS_SQL).await?;
        db.execute_unprepared(SUPPLIERS_SQL).await?;
        db.execute_unprepared(CONSULTANTS_SQL).await?;
        db.execute_unprepared(BANK_ACCOUNTS_SQL).await?;
        db.execute_unprepared(ACCOUNT_PLAN_ITEMS_SQL).await?;

        // ============================================================
        // PART 2: PRODUCT CATALOG
        // ============================================================
        db.execute_unprepared(PRODUCTS_SQL).await?;
        db.execute_unprepared(MODULES_SQL).await?;
        db.execute_unprepared(SUBMODULES_SQL).await?;

        // ============================================================
        // PART 3: PROJECTS & ACTIVITIES
        // ============================================================
        db.execute_unprepared(PROJECTS_SQL).await?;
        db.execute_unprepared(PROJECT_ACTIVITIES_SQL).await?;
        db.execute_unprepared(ACTIVITY_CONSULTANTS_SQL).await?;
        db.execute_unprepared(ACTIVITY_PREDECESSORS_SQL).await?;
        db.execute_unprepared(PROJECT_OBSERVATIONS_SQL).await?;

        // ============================================================
        // PART 4: BILLING & TIME ENTRIES
        // ============================================================
        db.execute_unprepared(BILLING_INVOICES_SQL).await?;
        db.execute_unprepared(TIME_ENTRIES_SQL).await?;

        // ============================================================
        // PART 5: FINANCIAL TITLES & PAYMENTS
        // ============================================================
        db.execute_unprepared(ACCOUNTS_PAYABLE_SQL).await?;
        db.execute_unprepared(ACCOUNTS_RECEIVABLE_SQL).await?;
        db.execute_unprepared(PAYABLE_PAYMENTS_SQL).await?;
        db.execute_unprepared(RECEIVABLE_PAYMENTS_SQL).await?;

        // ============================================================
        // PART 6: SCHEDULER STATE
        // ============================================================
        db.execute_unprepared(DISPATCH_LOG_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    full_name VARCHAR(150) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const CLIENTS_SQL: &str = r"
CREATE TABLE clients (
    id UUID PRIMARY KEY,
    name VARCHAR(200) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const SUPPLIERS_SQL: &str = r"
CREATE TABLE suppliers (
    id UUID PRIMARY KEY,
    legal_name VARCHAR(200) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const CONSULTANTS_SQL: &str = r"
CREATE TABLE consultants (
    id UUID PRIMARY KEY,
    full_name VARCHAR(150) NOT NULL,
    whatsapp_phone VARCHAR(30),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const BANK_ACCOUNTS_SQL: &str = r"
CREATE TABLE bank_accounts (
    id UUID PRIMARY KEY,
    bank_name VARCHAR(100) NOT NULL,
    agency VARCHAR(20) NOT NULL,
    account_number VARCHAR(30) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const ACCOUNT_PLAN_ITEMS_SQL: &str = r"
CREATE TABLE account_plan_items (
    id UUID PRIMARY KEY,
    code VARCHAR(30) NOT NULL,
    description VARCHAR(200) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const PRODUCTS_SQL: &str = r"
CREATE TABLE products (
    id UUID PRIMARY KEY,
    name VARCHAR(120) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const MODULES_SQL: &str = r"
CREATE TABLE modules (
    id UUID PRIMARY KEY,
    product_id UUID NOT NULL REFERENCES products(id) ON DELETE RESTRICT,
    name VARCHAR(120) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX idx_modules_product ON modules(product_id);
";

const SUBMODULES_SQL: &str = r"
CREATE TABLE submodules (
    id UUID PRIMARY KEY,
    product_id UUID NOT NULL REFERENCES products(id) ON DELETE RESTRICT,
    module_id UUID NOT NULL REFERENCES modules(id) ON DELETE RESTRICT,
    name VARCHAR(120) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX idx_submodules_module ON submodules(module_id);
";

const PROJECTS_SQL: &str = r"
CREATE TABLE projects (
    id UUID PRIMARY KEY,
    billing_client_id UUID NOT NULL REFERENCES clients(id) ON DELETE RESTRICT,
    project_client_id UUID NOT NULL REFERENCES clients(id) ON DELETE RESTRICT,
    description VARCHAR(200) NOT NULL,
    received_date DATE,
    planned_go_live_date DATE,
    cutover_planned_start DATE,
    cutover_planned_end DATE,
    contract_type VARCHAR(20) NOT NULL DEFAULT 'fixed_value',
    status VARCHAR(20) NOT NULL DEFAULT 'budget',
    total_value NUMERIC(12, 2) NOT NULL DEFAULT 0,
    hourly_rate NUMERIC(10, 2) NOT NULL DEFAULT 0,
    contracted_hours NUMERIC(12, 2) NOT NULL DEFAULT 0,
    contingency_percent NUMERIC(5, 2) NOT NULL DEFAULT 0,
    available_hours NUMERIC(12, 2) NOT NULL DEFAULT 0,
    available_value NUMERIC(12, 2) NOT NULL DEFAULT 0,
    internal_manager_id UUID REFERENCES users(id) ON DELETE SET NULL,
    external_manager_id UUID REFERENCES users(id) ON DELETE SET NULL,
    client_user_id UUID REFERENCES users(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX idx_projects_billing_client ON projects(billing_client_id);
";

const PROJECT_ACTIVITIES_SQL: &str = r"
CREATE TABLE project_activities (
    id UUID PRIMARY KEY,
    project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    seq SMALLINT NOT NULL,
    phase VARCHAR(120) NOT NULL DEFAULT '',
    product_id UUID NOT NULL REFERENCES products(id) ON DELETE RESTRICT,
    module_id UUID NOT NULL REFERENCES modules(id) ON DELETE RESTRICT,
    submodule_id UUID NOT NULL REFERENCES submodules(id) ON DELETE RESTRICT,
    activity VARCHAR(200) NOT NULL,
    subactivity VARCHAR(200) NOT NULL DEFAULT '',
    days NUMERIC(6, 2) NOT NULL DEFAULT 0,
    hours NUMERIC(8, 2) NOT NULL DEFAULT 0,
    criticality VARCHAR(20) NOT NULL DEFAULT 'medium',
    billing_type VARCHAR(20) NOT NULL DEFAULT 'billable',
    assumed_reason VARCHAR(20),
    consultant_hourly_rate NUMERIC(10, 2),
    planned_start DATE,
    planned_end DATE,
    actual_start DATE,
    actual_end DATE,
    status VARCHAR(20) NOT NULL DEFAULT 'planned',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT unique_project_activity_seq UNIQUE (project_id, seq)
);
CREATE INDEX idx_project_activities_project ON project_activities(project_id);
CREATE INDEX idx_project_activities_status ON project_activities(status);
";

const ACTIVITY_CONSULTANTS_SQL: &str = r"
CREATE TABLE activity_consultants (
    activity_id UUID NOT NULL REFERENCES project_activities(id) ON DELETE CASCADE,
    consultant_id UUID NOT NULL REFERENCES consultants(id) ON DELETE CASCADE,
    PRIMARY KEY (activity_id, consultant_id)
);
";

const ACTIVITY_PREDECESSORS_SQL: &str = r"
CREATE TABLE activity_predecessors (
    activity_id UUID NOT NULL REFERENCES project_activities(id) ON DELETE CASCADE,
    predecessor_id UUID NOT NULL REFERENCES project_activities(id) ON DELETE CASCADE,
    PRIMARY KEY (activity_id, predecessor_id)
);
";

const PROJECT_OBSERVATIONS_SQL: &str = r"
CREATE TABLE project_observations (
    id UUID PRIMARY KEY,
    project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    observation_type VARCHAR(20) NOT NULL DEFAULT 'manual',
    note TEXT NOT NULL DEFAULT '',
    changes JSONB,
    created_by UUID REFERENCES users(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX idx_project_observations_project ON project_observations(project_id);
";

const BILLING_INVOICES_SQL: &str = r"
CREATE TABLE billing_invoices (
    id UUID PRIMARY KEY,
    number VARCHAR(40) NOT NULL UNIQUE,
    billing_client_id UUID NOT NULL REFERENCES clients(id) ON DELETE RESTRICT,
    project_id UUID REFERENCES projects(id) ON DELETE RESTRICT,
    period_start DATE NOT NULL,
    period_end DATE NOT NULL,
    total_hours NUMERIC(10, 2) NOT NULL DEFAULT 0,
    total_value NUMERIC(12, 2) NOT NULL DEFAULT 0,
    payment_status VARCHAR(10) NOT NULL DEFAULT 'unpaid',
    created_by UUID REFERENCES users(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const TIME_ENTRIES_SQL: &str = r"
CREATE TABLE time_entries (
    id UUID PRIMARY KEY,
    activity_id UUID NOT NULL REFERENCES project_activities(id) ON DELETE CASCADE,
    consultant_id UUID NOT NULL REFERENCES consultants(id) ON DELETE RESTRICT,
    entry_type VARCHAR(10) NOT NULL DEFAULT 'daily',
    status VARCHAR(10) NOT NULL DEFAULT 'pending',
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    hours NUMERIC(8, 2),
    hours_monday NUMERIC(6, 2),
    hours_tuesday NUMERIC(6, 2),
    hours_wednesday NUMERIC(6, 2),
    hours_thursday NUMERIC(6, 2),
    hours_friday NUMERIC(6, 2),
    hours_saturday NUMERIC(6, 2),
    hours_sunday NUMERIC(6, 2),
    total_hours NUMERIC(8, 2) NOT NULL DEFAULT 0,
    description TEXT NOT NULL DEFAULT '',
    rejection_reason TEXT NOT NULL DEFAULT '',
    reviewed_by UUID REFERENCES users(id) ON DELETE SET NULL,
    reviewed_at TIMESTAMPTZ,
    billing_invoice_id UUID REFERENCES billing_invoices(id) ON DELETE SET NULL,
    billing_invoice_number VARCHAR(40) NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT time_entry_end_date_gte_start_date CHECK (end_date >= start_date)
);
CREATE INDEX idx_time_entries_activity ON time_entries(activity_id);
CREATE INDEX idx_time_entries_invoice_number ON time_entries(billing_invoice_number);
";

const ACCOUNTS_PAYABLE_SQL: &str = r"
CREATE TABLE accounts_payable (
    id UUID PRIMARY KEY,
    supplier_id UUID NOT NULL REFERENCES suppliers(id) ON DELETE RESTRICT,
    consultant_id UUID REFERENCES consultants(id) ON DELETE SET NULL,
    billing_invoice_id UUID REFERENCES billing_invoices(id) ON DELETE RESTRICT,
    account_plan_item_id UUID REFERENCES account_plan_items(id) ON DELETE RESTRICT,
    document_number VARCHAR(60) NOT NULL,
    description VARCHAR(200) NOT NULL,
    issue_date DATE NOT NULL,
    due_date DATE NOT NULL,
    amount NUMERIC(12, 2) NOT NULL,
    discount NUMERIC(12, 2) NOT NULL DEFAULT 0,
    interest NUMERIC(12, 2) NOT NULL DEFAULT 0,
    penalty NUMERIC(12, 2) NOT NULL DEFAULT 0,
    status VARCHAR(20) NOT NULL DEFAULT 'open',
    settlement_date DATE,
    payment_method VARCHAR(20),
    notes TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT unique_payable_document_per_supplier UNIQUE (supplier_id, document_number)
);
CREATE INDEX idx_accounts_payable_due ON accounts_payable(due_date);
CREATE INDEX idx_accounts_payable_status ON accounts_payable(status);
";

const ACCOUNTS_RECEIVABLE_SQL: &str = r"
CREATE TABLE accounts_receivable (
    id UUID PRIMARY KEY,
    client_id UUID NOT NULL REFERENCES clients(id) ON DELETE RESTRICT,
    billing_invoice_id UUID REFERENCES billing_invoices(id) ON DELETE RESTRICT,
    account_plan_item_id UUID REFERENCES account_plan_items(id) ON DELETE RESTRICT,
    document_number VARCHAR(60) NOT NULL,
    description VARCHAR(200) NOT NULL,
    issue_date DATE NOT NULL,
    due_date DATE NOT NULL,
    amount NUMERIC(12, 2) NOT NULL,
    discount NUMERIC(12, 2) NOT NULL DEFAULT 0,
    interest NUMERIC(12, 2) NOT NULL DEFAULT 0,
    penalty NUMERIC(12, 2) NOT NULL DEFAULT 0,
    status VARCHAR(20) NOT NULL DEFAULT 'open',
    settlement_date DATE,
    payment_method VARCHAR(20),
    notes TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT unique_receivable_document_per_client UNIQUE (client_id, document_number)
);
CREATE INDEX idx_accounts_receivable_due ON accounts_receivable(due_date);
CREATE INDEX idx_accounts_receivable_invoice ON accounts_receivable(billing_invoice_id);
";

const PAYABLE_PAYMENTS_SQL: &str = r"
CREATE TABLE payable_payments (
    id UUID PRIMARY KEY,
    payable_id UUID NOT NULL REFERENCES accounts_payable(id) ON DELETE CASCADE,
    bank_account_id UUID NOT NULL REFERENCES bank_accounts(id) ON DELETE RESTRICT,
    payment_date DATE NOT NULL,
    amount NUMERIC(12, 2) NOT NULL,
    payment_method VARCHAR(20),
    notes TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX idx_payable_payments_bank_date ON payable_payments(bank_account_id, payment_date);
";

const RECEIVABLE_PAYMENTS_SQL: &str = r"
CREATE TABLE receivable_payments (
    id UUID PRIMARY KEY,
    receivable_id UUID NOT NULL REFERENCES accounts_receivable(id) ON DELETE CASCADE,
    bank_account_id UUID NOT NULL REFERENCES bank_accounts(id) ON DELETE RESTRICT,
    payment_date DATE NOT NULL,
    amount NUMERIC(12, 2) NOT NULL,
    payment_method VARCHAR(20),
    notes TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX idx_receivable_payments_bank_date ON receivable_payments(bank_account_id, payment_date);
";

const DISPATCH_LOG_SQL: &str = r"
CREATE TABLE dispatch_log (
    id UUID PRIMARY KEY,
    report_kind VARCHAR(30) NOT NULL,
    sent_on DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT unique_dispatch_per_day UNIQUE (report_kind, sent_on)
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS dispatch_log;
DROP TABLE IF EXISTS receivable_payments;
DROP TABLE IF EXISTS payable_payments;
DROP TABLE IF EXISTS accounts_receivable;
DROP TABLE IF EXISTS accounts_payable;
DROP TABLE IF EXISTS time_entries;
DROP TABLE IF EXISTS billing_invoices;
DROP TABLE IF EXISTS project_observations;
DROP TABLE IF EXISTS activity_predecessors;
DROP TABLE IF EXISTS activity_consultants;
DROP TABLE IF EXISTS project_activities;
DROP TABLE IF EXISTS projects;
DROP TABLE IF EXISTS submodules;
DROP TABLE IF EXISTS modules;
DROP TABLE IF EXISTS products;
DROP TABLE IF EXISTS account_plan_items;
DROP TABLE IF EXISTS bank_accounts;
DROP TABLE IF EXISTS consultants;
DROP TABLE IF EXISTS suppliers;
DROP TABLE IF EXISTS clients;
DROP TABLE IF EXISTS users;
";
