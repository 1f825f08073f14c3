//! # Statistics Repository
//!
//! Read-only aggregates for the dashboard and the daily time series.
//!
//! Every call reads committed data directly; there is no caching layer,
//! so repeated calls always reflect the latest writes.
//!
//! ## Day Boundaries
//! Timestamps are stored as UTC text and SQLite's `date()`/`strftime()`
//! compare against `'now'`, which is also UTC: "today" and "this month"
//! are UTC calendar boundaries.

use std::collections::BTreeMap;

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::settings::SettingsRepository;
use atelier_core::{
    DailyStat, DashboardStats, Product, Repair, DEFAULT_LOW_STOCK_THRESHOLD,
    LOW_STOCK_THRESHOLD_KEY, OPEN_REPAIR_STATUSES,
};

/// Bound on the recent-repairs and low-stock lists in the dashboard.
const DASHBOARD_LIST_LIMIT: i64 = 5;

#[derive(Debug, sqlx::FromRow)]
struct DayTotalRow {
    day: String,
    total: f64,
    count: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct DayCountRow {
    day: String,
    count: i64,
}

/// Repository for read-only statistics queries.
#[derive(Debug, Clone)]
pub struct StatsRepository {
    pool: SqlitePool,
}

impl StatsRepository {
    /// Creates a new StatsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StatsRepository { pool }
    }

    /// Computes the dashboard aggregates.
    ///
    /// ## Profit Definition
    /// `today_profit` is revenue minus recorded cost basis over today's
    /// sale items: `SUM(quantity × (unit_price − COALESCE(products.cost, 0)))`
    /// with a LEFT JOIN to products, so manual lines (no catalog
    /// product, hence no cost on file) contribute their full revenue.
    ///
    /// ## Low-Stock Threshold
    /// Read from the `low_stock_threshold` settings key, falling back
    /// to [`DEFAULT_LOW_STOCK_THRESHOLD`] when absent or unparseable.
    ///
    /// All sums are 0.0 and all lists empty on an empty database.
    pub async fn dashboard(&self) -> DbResult<DashboardStats> {
        let today_sales: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(final_total), 0.0) FROM sales WHERE date(created_at) = date('now')",
        )
        .fetch_one(&self.pool)
        .await?;

        let month_sales: f64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(final_total), 0.0) FROM sales
            WHERE strftime('%Y-%m', created_at) = strftime('%Y-%m', 'now')
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let today_profit: f64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(si.quantity * (si.unit_price - COALESCE(p.cost, 0))), 0.0)
            FROM sale_items si
            JOIN sales s ON s.id = si.sale_id
            LEFT JOIN products p ON p.id = si.product_id
            WHERE date(s.created_at) = date('now')
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let ongoing_repairs = self.count_ongoing_repairs().await?;

        let threshold = self.low_stock_threshold().await?;

        let low_stock_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE stock_quantity < ?1")
                .bind(threshold)
                .fetch_one(&self.pool)
                .await?;

        let low_stock_items = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, sku, price, cost, stock_quantity, category, created_at
            FROM products
            WHERE stock_quantity < ?1
            ORDER BY stock_quantity ASC, id ASC
            LIMIT ?2
            "#,
        )
        .bind(threshold)
        .bind(DASHBOARD_LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        let recent_repairs = sqlx::query_as::<_, Repair>(
            r#"
            SELECT id, client_id, device_details, issue_description, status,
                   cost_estimate, created_at, updated_at, parts_list, warranty,
                   depot, repair_type, notes
            FROM repairs
            ORDER BY updated_at DESC, id DESC
            LIMIT ?1
            "#,
        )
        .bind(DASHBOARD_LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        debug!(
            today_sales,
            month_sales, ongoing_repairs, low_stock_count, "Dashboard computed"
        );

        Ok(DashboardStats {
            today_sales,
            month_sales,
            today_profit,
            ongoing_repairs,
            low_stock_count,
            recent_repairs,
            low_stock_items,
        })
    }

    /// Returns the daily series for the last `days` calendar days
    /// (today included), ascending by date.
    ///
    /// `days` is an explicit caller decision - the API server passes its
    /// configured `daily_stats_days`. Days with no rows in either the
    /// sales or repairs table are omitted; a day present on only one
    /// side reports zero for the other.
    pub async fn daily(&self, days: u32) -> DbResult<Vec<DailyStat>> {
        // date('now', '-29 days') .. today covers a 30-day window.
        let modifier = format!("-{} days", days.saturating_sub(1));

        let sale_rows = sqlx::query_as::<_, DayTotalRow>(
            r#"
            SELECT date(created_at) AS day,
                   COALESCE(SUM(final_total), 0.0) AS total,
                   COUNT(*) AS count
            FROM sales
            WHERE date(created_at) >= date('now', ?1)
            GROUP BY day
            "#,
        )
        .bind(&modifier)
        .fetch_all(&self.pool)
        .await?;

        let repair_rows = sqlx::query_as::<_, DayCountRow>(
            r#"
            SELECT date(created_at) AS day, COUNT(*) AS count
            FROM repairs
            WHERE date(created_at) >= date('now', ?1)
            GROUP BY day
            "#,
        )
        .bind(&modifier)
        .fetch_all(&self.pool)
        .await?;

        // Merge the two grouped queries; BTreeMap keys sort the series
        // chronologically (ISO dates sort lexicographically).
        let mut merged: BTreeMap<String, DailyStat> = BTreeMap::new();

        for row in sale_rows {
            merged.insert(
                row.day.clone(),
                DailyStat {
                    date: row.day,
                    sales_total: row.total,
                    sales_count: row.count,
                    repairs_count: 0,
                },
            );
        }

        for row in repair_rows {
            merged
                .entry(row.day.clone())
                .or_insert_with(|| DailyStat {
                    date: row.day,
                    sales_total: 0.0,
                    sales_count: 0,
                    repairs_count: 0,
                })
                .repairs_count = row.count;
        }

        Ok(merged.into_values().collect())
    }

    /// Counts repairs whose status is in the open set.
    async fn count_ongoing_repairs(&self) -> DbResult<i64> {
        let placeholders = (1..=OPEN_REPAIR_STATUSES.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");

        // The SQL string must outlive the query that borrows it.
        let sql = format!("SELECT COUNT(*) FROM repairs WHERE status IN ({placeholders})");
        let mut query = sqlx::query_scalar(&sql);
        for status in OPEN_REPAIR_STATUSES {
            query = query.bind(status);
        }

        Ok(query.fetch_one(&self.pool).await?)
    }

    /// Resolves the low-stock threshold from settings.
    async fn low_stock_threshold(&self) -> DbResult<i64> {
        let threshold = SettingsRepository::new(self.pool.clone())
            .get(LOW_STOCK_THRESHOLD_KEY)
            .await?
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);

        Ok(threshold)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
