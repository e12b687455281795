//! Initial database migration.
//!
//! Creates the users, allowance entries and calendar locks tables together
//! with their enums and indexes.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: DIRECTORY
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;

        // ============================================================
        // PART 3: ALLOWANCES
        // ============================================================
        db.execute_unprepared(ALLOWANCE_ENTRIES_SQL).await?;
        db.execute_unprepared(CALENDAR_LOCKS_SQL).await?;

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

const ENUMS_SQL: &str = r"
-- User roles
CREATE TYPE user_role AS ENUM ('employee', 'manager', 'admin');

-- Entry types: shifts, specials and days off
CREATE TYPE entry_type AS ENUM (
    '6am',
    '9am',
    '1pm',
    '5pm',
    '9pm',
    'oncall',
    'patch_full',
    'patch_half',
    'activity_full',
    'activity_half',
    'leave',
    'weekend',
    'holiday'
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    employee_code VARCHAR(50) NOT NULL UNIQUE,
    email VARCHAR(255) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    role user_role NOT NULL DEFAULT 'employee',
    manager_id UUID REFERENCES users(id) ON DELETE SET NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_not_own_manager CHECK (manager_id IS NULL OR manager_id <> id)
);

-- Team lookups derive a manager's reports from this column
CREATE INDEX idx_users_manager ON users(manager_id) WHERE manager_id IS NOT NULL;
CREATE INDEX idx_users_role ON users(role) WHERE is_active = true;
";

const ALLOWANCE_ENTRIES_SQL: &str = r"
CREATE TABLE allowance_entries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    employee_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    entry_date DATE NOT NULL,
    entry_type entry_type NOT NULL,
    is_wfh BOOLEAN NOT NULL DEFAULT false,
    proof TEXT NOT NULL DEFAULT '',
    allowance NUMERIC(12, 2) NOT NULL DEFAULT 0,
    month VARCHAR(7) NOT NULL,
    year INTEGER NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_entry_employee_date UNIQUE (employee_id, entry_date),
    CONSTRAINT chk_allowance_non_negative CHECK (allowance >= 0),
    CONSTRAINT chk_month_format CHECK (month ~ '^[0-9]{4}-(0[1-9]|1[0-2])$')
);

CREATE INDEX idx_entries_employee_month ON allowance_entries(employee_id, month);
CREATE INDEX idx_entries_month ON allowance_entries(month);
";

const CALENDAR_LOCKS_SQL: &str = r"
CREATE TABLE calendar_locks (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    month VARCHAR(7) NOT NULL UNIQUE,
    is_locked BOOLEAN NOT NULL DEFAULT false,
    locked_by UUID REFERENCES users(id) ON DELETE SET NULL,
    locked_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_lock_month_format CHECK (month ~ '^[0-9]{4}-(0[1-9]|1[0-2])$')
);
";

const DROP_ALL_SQL: &str = r"
-- Order matters due to foreign key constraints
DROP TABLE IF EXISTS calendar_locks CASCADE;
DROP TABLE IF EXISTS allowance_entries CASCADE;
DROP TABLE IF EXISTS users CASCADE;

DROP TYPE IF EXISTS entry_type;
DROP TYPE IF EXISTS user_role;
";
