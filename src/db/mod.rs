use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::models::*;

const PRODUCTS_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL,
    description TEXT,
    price_cents INTEGER NOT NULL,
    sku         TEXT,
    date_added  DATE
)
"#;

const CLIENTS_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS clients (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL,
    birthdate  DATE,
    address    TEXT,
    cpf        TEXT NOT NULL UNIQUE,
    phone      TEXT NOT NULL,
    email      TEXT NOT NULL UNIQUE,
    date_added DATE
)
"#;

/// Creates both tables when they do not exist yet. Existing tables are left
/// untouched; schema changes need manual intervention.
pub async fn init_schema(pool: &SqlitePool) -> AppResult<()> {
    sqlx::query(PRODUCTS_DDL).execute(pool).await?;
    sqlx::query(CLIENTS_DDL).execute(pool).await?;
    Ok(())
}

// ── Products ──────────────────────────────────────────────────────────────────

pub async fn fetch_all_products(pool: &SqlitePool) -> AppResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT id, name, description, price_cents, sku, date_added
         FROM products ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn fetch_product_by_id(pool: &SqlitePool, id: i64) -> AppResult<Product> {
    sqlx::query_as::<_, Product>(
        "SELECT id, name, description, price_cents, sku, date_added
         FROM products WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.to_string()))
}

pub async fn insert_product(pool: &SqlitePool, product: &NewProduct) -> AppResult<Product> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (name, description, price_cents, sku, date_added)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, name, description, price_cents, sku, date_added
        "#,
    )
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price_cents)
    .bind(&product.sku)
    .bind(product.date_added)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

/// Overwrites every column of the row. Absent optional values are written as
/// NULL rather than merged with what was stored.
pub async fn update_product(
    pool: &SqlitePool,
    id: i64,
    product: &NewProduct,
) -> AppResult<Product> {
    sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET name        = ?,
            description = ?,
            price_cents = ?,
            sku         = ?,
            date_added  = ?
        WHERE id = ?
        RETURNING id, name, description, price_cents, sku, date_added
        "#,
    )
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price_cents)
    .bind(&product.sku)
    .bind(product.date_added)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.to_string()))
}

pub async fn delete_product(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(PRODUCT_NOT_FOUND.to_string()));
    }
    Ok(())
}

// ── Clients ───────────────────────────────────────────────────────────────────

pub async fn fetch_all_clients(pool: &SqlitePool) -> AppResult<Vec<Client>> {
    let clients = sqlx::query_as::<_, Client>(
        "SELECT id, name, birthdate, address, cpf, phone, email, date_added
         FROM clients ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(clients)
}

pub async fn fetch_client_by_id(pool: &SqlitePool, id: i64) -> AppResult<Client> {
    sqlx::query_as::<_, Client>(
        "SELECT id, name, birthdate, address, cpf, phone, email, date_added
         FROM clients WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(CLIENT_NOT_FOUND.to_string()))
}

/// Duplicate `cpf` or `email` surfaces as the storage engine's UNIQUE
/// violation; nothing is checked up front.
pub async fn insert_client(pool: &SqlitePool, client: &NewClient) -> AppResult<Client> {
    let client = sqlx::query_as::<_, Client>(
        r#"
        INSERT INTO clients (name, birthdate, address, cpf, phone, email, date_added)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id, name, birthdate, address, cpf, phone, email, date_added
        "#,
    )
    .bind(&client.name)
    .bind(client.birthdate)
    .bind(&client.address)
    .bind(&client.cpf)
    .bind(&client.phone)
    .bind(&client.email)
    .bind(client.date_added)
    .fetch_one(pool)
    .await?;

    Ok(client)
}

pub async fn update_client(
    pool: &SqlitePool,
    id: i64,
    client: &NewClient,
) -> AppResult<Client> {
    sqlx::query_as::<_, Client>(
        r#"
        UPDATE clients
        SET name       = ?,
            birthdate  = ?,
            address    = ?,
            cpf        = ?,
            phone      = ?,
            email      = ?,
            date_added = ?
        WHERE id = ?
        RETURNING id, name, birthdate, address, cpf, phone, email, date_added
        "#,
    )
    .bind(&client.name)
    .bind(client.birthdate)
    .bind(&client.address)
    .bind(&client.cpf)
    .bind(&client.phone)
    .bind(&client.email)
    .bind(client.date_added)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(CLIENT_NOT_FOUND.to_string()))
}

pub async fn delete_client(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM clients WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(CLIENT_NOT_FOUND.to_string()));
    }
    Ok(())
}
