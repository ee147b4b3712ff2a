//! # Customer Repository
//!
//! Database operations for customers.
//!
//! ## Account Rows
//! ```text
//!   insert(NewCustomer)
//!     BEGIN
//!       INSERT customers ... RETURNING *      → customer_id = 7
//!       INSERT credit  (7, 0)
//!       INSERT rewards (7, 0)
//!     COMMIT
//!
//!   delete(7) → credit and rewards rows go with it (ON DELETE CASCADE)
//! ```

use grocer_core::{Customer, CustomerUpdate, NewCustomer};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

const SELECT_CUSTOMER: &str = r#"
    SELECT customer_id, first_name, last_name, email, phone, address, created_at
    FROM customers
"#;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists every customer, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "{SELECT_CUSTOMER} ORDER BY customer_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = customers.len(), "Listed customers");
        Ok(customers)
    }

    /// Gets a customer by ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - Customer not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "{SELECT_CUSTOMER} WHERE customer_id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Inserts a customer together with a zero credit balance and zero
    /// reward points.
    ///
    /// ## Returns
    /// * `Ok(Customer)` - Stored customer with its assigned ID
    /// * `Err(DbError::Domain)` - Input failed validation
    pub async fn insert(&self, customer: &NewCustomer) -> DbResult<Customer> {
        customer.validate()?;

        debug!(last_name = %customer.last_name, "Inserting customer");

        let mut tx = self.pool.begin().await?;

        let stored = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (first_name, last_name, email, phone, address)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING customer_id, first_name, last_name, email, phone, address, created_at
            "#,
        )
        .bind(customer.first_name.trim())
        .bind(customer.last_name.trim())
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO credit (customer_id, credit_cents) VALUES (?1, 0)")
            .bind(stored.customer_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO rewards (customer_id, points) VALUES (?1, 0)")
            .bind(stored.customer_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(customer_id = stored.customer_id, "Customer inserted");
        Ok(stored)
    }

    /// Applies a single field edit.
    ///
    /// Each field maps to its own fixed statement.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Customer doesn't exist
    pub async fn update(&self, id: i64, update: &CustomerUpdate) -> DbResult<()> {
        debug!(customer_id = id, field = %update.field(), "Updating customer");

        let query = match update {
            CustomerUpdate::FirstName(value) => {
                sqlx::query("UPDATE customers SET first_name = ?2 WHERE customer_id = ?1")
                    .bind(id)
                    .bind(value)
            }
            CustomerUpdate::LastName(value) => {
                sqlx::query("UPDATE customers SET last_name = ?2 WHERE customer_id = ?1")
                    .bind(id)
                    .bind(value)
            }
            CustomerUpdate::Email(value) => {
                sqlx::query("UPDATE customers SET email = ?2 WHERE customer_id = ?1")
                    .bind(id)
                    .bind(value)
            }
            CustomerUpdate::Phone(value) => {
                sqlx::query("UPDATE customers SET phone = ?2 WHERE customer_id = ?1")
                    .bind(id)
                    .bind(value)
            }
            CustomerUpdate::Address(value) => {
                sqlx::query("UPDATE customers SET address = ?2 WHERE customer_id = ?1")
                    .bind(id)
                    .bind(value)
            }
        };

        let result = query.execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    /// Deletes a customer and, by cascade, its credit and rewards rows.
    ///
    /// Fails with `ForeignKeyViolation` while transactions reference it.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(customer_id = id, "Deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE customer_id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    /// Counts customers (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
