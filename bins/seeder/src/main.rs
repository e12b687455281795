//! Database seeder for ShiftPay development and testing.
//!
//! Seeds an admin, a manager, two employees reporting to the manager and a
//! few recent entries, then prints a development token for each user.
//! Running it again leaves existing rows alone and re-saves the entries.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Days, Utc};
use shiftpay_core::allowance::EntryType;
use shiftpay_core::auth::UserRole;
use shiftpay_core::entry::EntryWriteInput;
use shiftpay_db::entities::users;
use shiftpay_db::repositories::{CreateUserInput, EntryRepositoryError, UserError};
use shiftpay_db::{AllowanceEntryRepository, UserRepository, connect};
use shiftpay_shared::types::UserId;
use shiftpay_shared::{AppConfig, JwtConfig, JwtService};

/// Seed users as `(employee_code, email, name)`.
const ADMIN: (&str, &str, &str) = ("A0001", "admin@shiftpay.dev", "Avery Admin");
const MANAGER: (&str, &str, &str) = ("M0001", "manager@shiftpay.dev", "Morgan Manager");
const EMPLOYEES: [(&str, &str, &str); 2] = [
    ("E0001", "erin@shiftpay.dev", "Erin Engineer"),
    ("E0002", "sam@shiftpay.dev", "Sam Support"),
];

/// Rotation used for seeded days.
const ROTATION: [EntryType; 7] = [
    EntryType::FivePm,
    EntryType::NinePm,
    EntryType::OnCall,
    EntryType::OnePm,
    EntryType::Weekend,
    EntryType::SixAm,
    EntryType::Leave,
];

/// Number of past days seeded per employee.
const SEED_DAYS: u64 = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    println!("Connecting to database...");
    let db = connect(&config.database.url)
        .await
        .context("failed to connect to database")?;

    let users_repo = UserRepository::new(db.clone());
    let entries_repo = AllowanceEntryRepository::new(db);

    println!("Seeding admin...");
    let admin = seed_admin(&users_repo).await?;

    println!("Seeding manager...");
    let manager = match users_repo.find_by_email(MANAGER.1).await? {
        Some(existing) => {
            println!("  Manager already exists, skipping...");
            existing
        }
        None => users_repo.create_manager(input(MANAGER)).await?,
    };

    println!("Seeding employees...");
    let mut employees = Vec::with_capacity(EMPLOYEES.len());
    for seed in EMPLOYEES {
        let employee = match users_repo.find_by_email(seed.1).await? {
            Some(existing) => {
                println!("  {} already exists, skipping...", existing.email);
                existing
            }
            None => {
                users_repo
                    .onboard_employee(input(seed), UserId::from_uuid(manager.id))
                    .await?
                    .0
            }
        };
        employees.push(employee);
    }

    println!("Seeding entries...");
    let today = Utc::now().date_naive();
    for (offset, employee) in employees.iter().enumerate() {
        let mut saved = 0;
        for day in 0..SEED_DAYS {
            let Some(date) = today.checked_sub_days(Days::new(day)) else {
                continue;
            };
            let index = usize::try_from(day).unwrap_or_default() + offset;
            let entry_type = ROTATION[index % ROTATION.len()];

            let result = entries_repo
                .save_entry(
                    UserId::from_uuid(employee.id),
                    EntryWriteInput {
                        date: date.format("%Y-%m-%d").to_string(),
                        entry_type: entry_type.code().to_string(),
                        is_wfh: entry_type.allows_wfh() && index % 3 == 0,
                        proof: String::new(),
                    },
                    today,
                )
                .await;

            match result {
                Ok(_) => saved += 1,
                Err(EntryRepositoryError::Rule(rule)) => {
                    println!("  Skipped {date} for {}: {rule}", employee.email);
                }
                Err(e) => return Err(e.into()),
            }
        }
        println!("  Saved {saved} entries for {}", employee.email);
    }

    let jwt = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_secs: config.jwt.access_token_expires_secs()?,
    });

    println!("\nDevelopment tokens:");
    let everyone = admin.iter().chain(std::iter::once(&manager)).chain(&employees);
    for user in everyone {
        let role: UserRole = user.role.into();
        let token = jwt.generate_access_token(user.id, role.as_str())?;
        println!("  {:<8} {:<24} {token}", role.as_str(), user.email);
    }

    println!("\nSeeding complete!");
    Ok(())
}

fn input((employee_code, email, name): (&str, &str, &str)) -> CreateUserInput {
    CreateUserInput {
        employee_code: employee_code.to_string(),
        email: email.to_string(),
        name: name.to_string(),
    }
}

/// Creates the seed admin unless it or another admin already exists.
async fn seed_admin(users_repo: &UserRepository) -> anyhow::Result<Option<users::Model>> {
    if let Some(existing) = users_repo.find_by_email(ADMIN.1).await? {
        println!("  Admin already exists, skipping...");
        return Ok(Some(existing));
    }

    match users_repo.create_first_admin(input(ADMIN)).await {
        Ok(admin) => Ok(Some(admin)),
        Err(UserError::SetupComplete) => {
            println!("  Another admin is already set up, skipping...");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
