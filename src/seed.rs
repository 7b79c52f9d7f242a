//! Demo data for a fresh database: staff and client accounts in Nashik,
//! the recipe book, the two-week menu rotation and one active subscription
//! per client.

use anyhow::Context;
use sqlx::{PgPool, Postgres, Transaction};
use time::Date;
use tracing::info;
use uuid::Uuid;

use crate::auth::{password::hash_password, repo_types::Role};
use crate::calendar;

pub const DEMO_PASSWORD: &str = "password";

pub struct SeedAccount {
    pub email: &'static str,
    pub role: Role,
    pub full_name: &'static str,
}

pub const ACCOUNTS: [SeedAccount; 6] = [
    SeedAccount { email: "admin@nutrifit.com", role: Role::Admin, full_name: "Admin User" },
    SeedAccount { email: "chef@nutrifit.com", role: Role::Chef, full_name: "Chef User" },
    SeedAccount { email: "driver@nutrifit.com", role: Role::Driver, full_name: "Driver User" },
    SeedAccount { email: "client1@example.com", role: Role::Client, full_name: "Aarav Sharma" },
    SeedAccount { email: "client2@example.com", role: Role::Client, full_name: "Diya Patel" },
    SeedAccount { email: "client3@example.com", role: Role::Client, full_name: "Rohan Mehta" },
];

pub struct SeedAddress {
    pub line1: &'static str,
    pub city: &'static str,
    pub pincode: &'static str,
    pub lat: f64,
    pub lng: f64,
}

/// One per client, in client order.
pub const CLIENT_ADDRESSES: [SeedAddress; 3] = [
    SeedAddress { line1: "123 Gangapur Road", city: "Nashik", pincode: "422013", lat: 20.0084, lng: 73.7639 },
    SeedAddress { line1: "456 College Road", city: "Nashik", pincode: "422005", lat: 19.9975, lng: 73.7898 },
    SeedAddress { line1: "789 Trimbak Road", city: "Nashik", pincode: "422002", lat: 19.9949, lng: 73.7534 },
];

/// Where the demo driver starts out (central Nashik).
pub const DRIVER_START: (f64, f64) = (19.9975, 73.7898);

pub struct SeedRecipe {
    pub name: &'static str,
    pub kcal: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}

const fn recipe(name: &'static str, kcal: f64, protein_g: f64, carbs_g: f64, fats_g: f64) -> SeedRecipe {
    SeedRecipe { name, kcal, protein_g, carbs_g, fats_g }
}

pub const RECIPES: [SeedRecipe; 10] = [
    recipe("Grilled Chicken Salad", 350.0, 40.0, 10.0, 18.0),
    recipe("Paneer Tikka Bowl", 400.0, 25.0, 20.0, 25.0),
    recipe("Quinoa Pulao", 320.0, 12.0, 55.0, 8.0),
    recipe("Egg Curry", 450.0, 20.0, 15.0, 35.0),
    recipe("Tofu Stir Fry", 380.0, 22.0, 30.0, 18.0),
    recipe("Fish Curry", 420.0, 35.0, 10.0, 28.0),
    recipe("Dal Makhani", 380.0, 15.0, 45.0, 15.0),
    recipe("Chicken Biryani", 550.0, 30.0, 60.0, 20.0),
    recipe("Soya Chaap Masala", 410.0, 28.0, 25.0, 22.0),
    recipe("Mushroom Matar", 300.0, 10.0, 35.0, 14.0),
];

/// (week_no, iso weekday, index into `RECIPES`); no service on Sundays.
pub const MENU_ROTATION: [(i16, i16, usize); 12] = [
    (1, 1, 0),
    (1, 2, 1),
    (1, 3, 2),
    (1, 4, 3),
    (1, 5, 4),
    (1, 6, 5),
    (2, 1, 6),
    (2, 2, 7),
    (2, 3, 8),
    (2, 4, 9),
    (2, 5, 0),
    (2, 6, 1),
];

#[derive(Debug, Default)]
pub struct SeedReport {
    pub accounts: usize,
    pub addresses: usize,
    pub recipes: usize,
    pub templates: usize,
    pub subscriptions: usize,
}

pub async fn run(pool: &PgPool, keep_existing: bool, today: Date) -> anyhow::Result<SeedReport> {
    info!("seeding database");
    let mut tx = pool.begin().await.context("begin tx")?;

    if !keep_existing {
        clear(&mut tx).await?;
        info!("cleared existing demo data");
    }

    let mut report = SeedReport::default();

    // Hash once; every demo account shares the password.
    let hash = hash_password(DEMO_PASSWORD)?;
    let mut ids = Vec::with_capacity(ACCOUNTS.len());
    for account in &ACCOUNTS {
        let id = insert_account(&mut tx, account, &hash)
            .await
            .with_context(|| format!("create account {}", account.email))?;
        info!(email = account.email, role = ?account.role, "created account");
        ids.push((id, account.role));
    }
    report.accounts = ids.len();

    let clients: Vec<Uuid> = ids
        .iter()
        .filter(|(_, role)| *role == Role::Client)
        .map(|(id, _)| *id)
        .collect();

    for (user_id, addr) in clients.iter().zip(CLIENT_ADDRESSES.iter()) {
        sqlx::query(
            r#"
            INSERT INTO addresses (user_id, line1, city, pincode, lat, lng)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user_id)
        .bind(addr.line1)
        .bind(addr.city)
        .bind(addr.pincode)
        .bind(addr.lat)
        .bind(addr.lng)
        .execute(&mut *tx)
        .await
        .context("insert address")?;
        report.addresses += 1;
    }
    info!(count = report.addresses, "created addresses");

    for (driver, _) in ids.iter().filter(|(_, role)| *role == Role::Driver) {
        sqlx::query(r#"INSERT INTO driver_locations (driver_id, lat, lng) VALUES ($1, $2, $3)"#)
            .bind(driver)
            .bind(DRIVER_START.0)
            .bind(DRIVER_START.1)
            .execute(&mut *tx)
            .await
            .context("insert driver location")?;
    }

    let mut recipe_ids = Vec::with_capacity(RECIPES.len());
    for r in &RECIPES {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO recipes (name, kcal, protein_g, carbs_g, fats_g)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(r.name)
        .bind(r.kcal)
        .bind(r.protein_g)
        .bind(r.carbs_g)
        .bind(r.fats_g)
        .fetch_one(&mut *tx)
        .await
        .with_context(|| format!("insert recipe {}", r.name))?;
        recipe_ids.push(id);
    }
    report.recipes = recipe_ids.len();
    info!(count = report.recipes, "created recipes");

    for (week_no, dow, recipe) in MENU_ROTATION {
        let recipe_id = recipe_ids
            .get(recipe)
            .copied()
            .context("menu rotation points past the recipe list")?;
        sqlx::query(
            r#"
            INSERT INTO menu_templates (week_no, dow, recipe_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (week_no, dow) DO UPDATE SET recipe_id = EXCLUDED.recipe_id
            "#,
        )
        .bind(week_no)
        .bind(dow)
        .bind(recipe_id)
        .execute(&mut *tx)
        .await
        .context("insert menu template")?;
        report.templates += 1;
    }
    info!(count = report.templates, "created menu templates");

    let next_billing = calendar::add_one_month(today);
    for user_id in &clients {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (user_id, status, start_date, next_billing_date)
            VALUES ($1, 'active', $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(today)
        .bind(next_billing)
        .execute(&mut *tx)
        .await
        .context("insert subscription")?;
        report.subscriptions += 1;
    }
    info!(count = report.subscriptions, start = %today, "created subscriptions");

    tx.commit().await.context("commit tx")?;
    info!("database seeding complete");
    Ok(report)
}

async fn clear(tx: &mut Transaction<'_, Postgres>) -> anyhow::Result<()> {
    for table in [
        "deliveries",
        "pauses",
        "menu_instances",
        "menu_templates",
        "subscriptions",
        "driver_locations",
        "addresses",
        "recipes",
        "profiles",
        "users",
    ] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut **tx)
            .await
            .with_context(|| format!("clear {table}"))?;
    }
    Ok(())
}

async fn insert_account(
    tx: &mut Transaction<'_, Postgres>,
    account: &SeedAccount,
    password_hash: &str,
) -> anyhow::Result<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO users (email, password_hash)
        VALUES ($1, $2)
        ON CONFLICT (email) DO UPDATE SET password_hash = EXCLUDED.password_hash
        RETURNING id
        "#,
    )
    .bind(account.email)
    .bind(password_hash)
    .fetch_one(&mut **tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO profiles (id, role, full_name)
        VALUES ($1, $2, $3)
        ON CONFLICT (id) DO UPDATE SET role = EXCLUDED.role, full_name = EXCLUDED.full_name
        "#,
    )
    .bind(id)
    .bind(account.role)
    .bind(account.full_name)
    .execute(&mut **tx)
    .await?;
    Ok(id)
}
