//! SQLite implementation of the CustomerRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Customer, Page, PageRequest};
use crate::domain::ports::{CustomerFilter, CustomerRepository};

use super::{like_pattern, ListQuery};

const CUSTOMER_COLUMNS: &str = "id, name, email, website, comment, archived";

#[derive(Clone)]
pub struct SqliteCustomerRepository {
    pool: SqlitePool,
}

impl SqliteCustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for SqliteCustomerRepository {
    async fn create(&self, customer: &Customer) -> DomainResult<Customer> {
        let result = sqlx::query(
            "INSERT INTO customers (name, email, website, comment, archived) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.website)
        .bind(&customer.comment)
        .bind(customer.archived)
        .execute(&self.pool)
        .await?;

        Ok(Customer {
            id: result.last_insert_rowid(),
            ..customer.clone()
        })
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Customer>> {
        let row: Option<CustomerRow> =
            sqlx::query_as(&format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, customer: &Customer) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE customers SET name = ?, email = ?, website = ?, comment = ?, archived = ? WHERE id = ?",
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.website)
        .bind(&customer.comment)
        .bind(customer.archived)
        .bind(customer.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Customer", customer.id));
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Customer", id));
        }

        Ok(())
    }

    async fn list(&self, filter: CustomerFilter, page: PageRequest) -> DomainResult<Page<Customer>> {
        let mut query = ListQuery::new();
        if !filter.include_archived {
            query.and_raw("archived = 0");
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
            query.and("LOWER(name) LIKE ? ESCAPE '\\'", like_pattern(search.trim()));
        }

        let (count, rows) = query
            .fetch_page::<CustomerRow>(&self.pool, CUSTOMER_COLUMNS, "customers", "name, id", page)
            .await?;
        Ok(Page::new(page, count, rows.into_iter().map(Into::into).collect()))
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    email: String,
    website: String,
    comment: String,
    archived: bool,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            email: row.email,
            website: row.website,
            comment: row.comment,
            archived: row.archived,
        }
    }
}
