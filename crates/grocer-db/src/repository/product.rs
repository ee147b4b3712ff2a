//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD operations
//! - Field edits through [`ProductUpdate`]
//!
//! Sales never go through this repository: the quantity decrement that
//! accompanies a recorded transaction lives in the recorder, inside the
//! same unit of work as the log row.

use grocer_core::{NewProduct, Product, ProductUpdate};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let milk = repo.get_by_id(3).await?;
/// repo.update(3, &ProductUpdate::Price(Money::from_cents(379))).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product ordered by ID.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, name, vendor_id, price_cents, quantity
            FROM products
            ORDER BY product_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, name, vendor_id, price_cents, quantity
            FROM products
            WHERE product_id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists the products supplied by one vendor.
    pub async fn list_by_vendor(&self, vendor_id: i64) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, name, vendor_id, price_cents, quantity
            FROM products
            WHERE vendor_id = ?1
            ORDER BY name
            "#,
        )
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted product with its assigned ID
    /// * `Err(DbError::ForeignKeyViolation)` - Vendor doesn't exist
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        product.validate()?;

        debug!(name = %product.name, "Inserting product");

        let stored = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, vendor_id, price_cents, quantity)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING product_id, name, vendor_id, price_cents, quantity
            "#,
        )
        .bind(product.name.trim())
        .bind(product.vendor_id)
        .bind(product.price.cents())
        .bind(product.quantity)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    /// Applies a single field edit.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, id: i64, update: &ProductUpdate) -> DbResult<()> {
        debug!(product_id = id, field = %update.field(), "Updating product");

        let query = match update {
            ProductUpdate::Name(value) => {
                sqlx::query("UPDATE products SET name = ?2 WHERE product_id = ?1")
                    .bind(id)
                    .bind(value)
            }
            ProductUpdate::VendorId(value) => {
                sqlx::query("UPDATE products SET vendor_id = ?2 WHERE product_id = ?1")
                    .bind(id)
                    .bind(*value)
            }
            ProductUpdate::Price(value) => {
                sqlx::query("UPDATE products SET price_cents = ?2 WHERE product_id = ?1")
                    .bind(id)
                    .bind(value.cents())
            }
            ProductUpdate::Quantity(value) => {
                sqlx::query("UPDATE products SET quantity = ?2 WHERE product_id = ?1")
                    .bind(id)
                    .bind(*value)
            }
        };

        let result = query.execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// Fails with `ForeignKeyViolation` while transactions reference it.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(product_id = id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE product_id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
