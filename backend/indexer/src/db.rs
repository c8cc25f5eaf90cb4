//! Database layer — migrations, event writes, projections, and cursor management.
//!
//! Events are the source of truth; `campaigns`, `donations`, `milestones` and
//! `votes` are materialized views folded from them. Projection runs in the
//! same transaction as the event insert and only when the insert actually
//! lands, so replaying a page of already-seen events is a no-op.

use sqlx::{sqlite::SqlitePoolOptions, Sqlite, SqlitePool, Transaction};
use tracing::info;

use crate::errors::Result;
use crate::events::{CampaignView, EventRecord, FundflowEvent, MilestoneView};

/// Establish a SQLite connection pool and run pending migrations.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
    // Make sure the file is created if it doesn't exist yet.
    let url = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite:{database_url}")
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied successfully");
    Ok(pool)
}

// ─────────────────────────────────────────────────────────
// Cursor helpers
// ─────────────────────────────────────────────────────────

/// Read the last-seen ledger from the cursor row.
/// Returns `0` when no cursor has been persisted yet.
pub async fn get_last_ledger(pool: &SqlitePool) -> Result<i64> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT last_ledger FROM indexer_cursor WHERE id = 1")
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(v,)| v).unwrap_or(0))
}

/// Persist the last-seen ledger (and optionally a pagination cursor string).
pub async fn save_cursor(
    pool: &SqlitePool,
    last_ledger: i64,
    last_cursor: Option<&str>,
) -> Result<()> {
    sqlx::query("UPDATE indexer_cursor SET last_ledger = ?1, last_cursor = ?2 WHERE id = 1")
        .bind(last_ledger)
        .bind(last_cursor)
        .execute(pool)
        .await?;
    Ok(())
}

/// Read back the raw cursor string (used to resume pagination mid-ledger).
pub async fn get_cursor_string(pool: &SqlitePool) -> Result<Option<String>> {
    let row: Option<(Option<String>,)> =
        sqlx::query_as("SELECT last_cursor FROM indexer_cursor WHERE id = 1")
            .fetch_optional(pool)
            .await?;
    Ok(row.and_then(|(v,)| v))
}

// ─────────────────────────────────────────────────────────
// Event writes + projection
// ─────────────────────────────────────────────────────────

/// Persist a batch of decoded events and fold each new one into the view
/// tables.  Events that share the same
/// `(ledger, tx_hash, event_type, campaign_id, milestone_id, actor)` tuple
/// are silently ignored, which makes both the insert and the projection
/// idempotent under at-least-once delivery.
pub async fn insert_events(pool: &SqlitePool, events: &[FundflowEvent]) -> Result<usize> {
    let mut count = 0usize;
    for ev in events {
        let mut tx = pool.begin().await?;

        let rows_affected = sqlx::query(
            r#"
            INSERT OR IGNORE INTO events
                (event_type, campaign_id, actor, amount, milestone_id, detail,
                 ledger, timestamp, contract_id, tx_hash)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&ev.event_type)
        .bind(&ev.campaign_id)
        .bind(&ev.actor)
        .bind(&ev.amount)
        .bind(&ev.milestone_id)
        .bind(&ev.detail)
        .bind(ev.ledger)
        .bind(ev.timestamp)
        .bind(&ev.contract_id)
        .bind(&ev.tx_hash)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if rows_affected > 0 {
            project_event(&mut tx, ev).await?;
            count += 1;
        }

        tx.commit().await?;
    }
    Ok(count)
}

/// Fold a single freshly-inserted event into the materialized views.
async fn project_event(tx: &mut Transaction<'_, Sqlite>, ev: &FundflowEvent) -> Result<()> {
    let Some(campaign_id) = ev.campaign_id.as_deref() else {
        // Platform-level events (fee changes, fee withdrawals) have no
        // campaign scope and nothing to project.
        return Ok(());
    };

    match ev.event_type.as_str() {
        "campaign_created" => {
            sqlx::query(
                r#"
                INSERT OR IGNORE INTO campaigns
                    (campaign_id, owner, goal, total_donated, donation_count,
                     milestone_count, approved_milestones, ended, last_ledger)
                VALUES (?1, ?2, ?3, 0, 0, 0, 0, 0, ?4)
                "#,
            )
            .bind(campaign_id)
            .bind(&ev.actor)
            .bind(&ev.amount)
            .bind(ev.ledger)
            .execute(&mut **tx)
            .await?;
        }
        "donation_received" => {
            let amount: i64 = ev.amount.as_deref().and_then(|a| a.parse().ok()).unwrap_or(0);
            sqlx::query(
                r#"
                UPDATE campaigns
                SET    total_donated = total_donated + ?2,
                       donation_count = donation_count + 1,
                       last_ledger = MAX(last_ledger, ?3)
                WHERE  campaign_id = ?1
                "#,
            )
            .bind(campaign_id)
            .bind(amount)
            .bind(ev.ledger)
            .execute(&mut **tx)
            .await?;

            sqlx::query(
                r#"
                INSERT INTO donations (campaign_id, donor, amount, refunded, ledger, timestamp)
                VALUES (?1, ?2, ?3, 0, ?4, ?5)
                "#,
            )
            .bind(campaign_id)
            .bind(&ev.actor)
            .bind(amount)
            .bind(ev.ledger)
            .bind(ev.timestamp)
            .execute(&mut **tx)
            .await?;
        }
        "donation_withdrawn" => {
            sqlx::query(
                r#"
                UPDATE donations
                SET    refunded = 1
                WHERE  campaign_id = ?1 AND donor = ?2 AND refunded = 0
                "#,
            )
            .bind(campaign_id)
            .bind(&ev.actor)
            .execute(&mut **tx)
            .await?;
        }
        "milestone_created" => {
            sqlx::query(
                r#"
                INSERT OR IGNORE INTO milestones
                    (campaign_id, milestone_id, status, votes_for, votes_against,
                     voting_deadline, last_ledger)
                VALUES (?1, ?2, 'pending', 0, 0, ?3, ?4)
                "#,
            )
            .bind(campaign_id)
            .bind(&ev.milestone_id)
            .bind(ev.detail.as_deref().and_then(|d| d.parse::<i64>().ok()))
            .bind(ev.ledger)
            .execute(&mut **tx)
            .await?;

            sqlx::query(
                r#"
                UPDATE campaigns
                SET    milestone_count = milestone_count + 1,
                       last_ledger = MAX(last_ledger, ?2)
                WHERE  campaign_id = ?1
                "#,
            )
            .bind(campaign_id)
            .bind(ev.ledger)
            .execute(&mut **tx)
            .await?;
        }
        "voted_on_milestone" => {
            let weight: i64 = ev.amount.as_deref().and_then(|a| a.parse().ok()).unwrap_or(0);
            let support = ev.detail.as_deref() == Some("true");

            sqlx::query(
                r#"
                INSERT OR IGNORE INTO votes
                    (campaign_id, milestone_id, voter, support, weight, ledger, timestamp)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(campaign_id)
            .bind(&ev.milestone_id)
            .bind(&ev.actor)
            .bind(support)
            .bind(weight)
            .bind(ev.ledger)
            .bind(ev.timestamp)
            .execute(&mut **tx)
            .await?;

            let (for_delta, against_delta) = if support { (weight, 0) } else { (0, weight) };
            sqlx::query(
                r#"
                UPDATE milestones
                SET    votes_for = votes_for + ?3,
                       votes_against = votes_against + ?4,
                       last_ledger = MAX(last_ledger, ?5)
                WHERE  campaign_id = ?1 AND milestone_id = ?2
                "#,
            )
            .bind(campaign_id)
            .bind(&ev.milestone_id)
            .bind(for_delta)
            .bind(against_delta)
            .bind(ev.ledger)
            .execute(&mut **tx)
            .await?;
        }
        "milestone_status_updated" => {
            let status = ev
                .detail
                .as_deref()
                .map(|s| s.to_ascii_lowercase())
                .unwrap_or_else(|| "pending".to_string());

            sqlx::query(
                r#"
                UPDATE milestones
                SET    status = ?3, last_ledger = MAX(last_ledger, ?4)
                WHERE  campaign_id = ?1 AND milestone_id = ?2
                "#,
            )
            .bind(campaign_id)
            .bind(&ev.milestone_id)
            .bind(&status)
            .bind(ev.ledger)
            .execute(&mut **tx)
            .await?;

            if status == "approved" {
                sqlx::query(
                    r#"
                    UPDATE campaigns
                    SET    approved_milestones = approved_milestones + 1,
                           last_ledger = MAX(last_ledger, ?2)
                    WHERE  campaign_id = ?1
                    "#,
                )
                .bind(campaign_id)
                .bind(ev.ledger)
                .execute(&mut **tx)
                .await?;
            }
        }
        "campaign_ended" => {
            sqlx::query(
                r#"
                UPDATE campaigns
                SET    ended = 1, last_ledger = MAX(last_ledger, ?2)
                WHERE  campaign_id = ?1
                "#,
            )
            .bind(campaign_id)
            .bind(ev.ledger)
            .execute(&mut **tx)
            .await?;
        }
        // milestone_withdrawn only moves escrowed funds; the views track
        // donated totals and milestone status, both already updated.
        _ => {}
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────
// Event reads
// ─────────────────────────────────────────────────────────

const EVENT_COLUMNS: &str = "id, event_type, campaign_id, actor, amount, milestone_id, detail, \
                             ledger, timestamp, contract_id, tx_hash, created_at";

/// Fetch all events for a given campaign, ordered by ledger ascending.
pub async fn get_events_for_campaign(
    pool: &SqlitePool,
    campaign_id: &str,
) -> Result<Vec<EventRecord>> {
    let rows = sqlx::query_as::<_, EventRecord>(&format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE campaign_id = ?1 ORDER BY ledger ASC, id ASC"
    ))
    .bind(campaign_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Fetch all events, ordered by ledger ascending.
pub async fn get_all_events(pool: &SqlitePool) -> Result<Vec<EventRecord>> {
    let rows = sqlx::query_as::<_, EventRecord>(&format!(
        "SELECT {EVENT_COLUMNS} FROM events ORDER BY ledger ASC, id ASC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

// ─────────────────────────────────────────────────────────
// View reads
// ─────────────────────────────────────────────────────────

/// Fetch all materialized campaign rows, newest first.
pub async fn get_campaigns(pool: &SqlitePool) -> Result<Vec<CampaignView>> {
    let rows = sqlx::query_as::<_, CampaignView>(
        r#"
        SELECT campaign_id, owner, goal, total_donated, donation_count,
               milestone_count, approved_milestones, ended, last_ledger
        FROM   campaigns
        ORDER  BY CAST(campaign_id AS INTEGER) DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Fetch one campaign view row.
pub async fn get_campaign(pool: &SqlitePool, campaign_id: &str) -> Result<Option<CampaignView>> {
    let row = sqlx::query_as::<_, CampaignView>(
        r#"
        SELECT campaign_id, owner, goal, total_donated, donation_count,
               milestone_count, approved_milestones, ended, last_ledger
        FROM   campaigns
        WHERE  campaign_id = ?1
        "#,
    )
    .bind(campaign_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Fetch the milestone view rows for one campaign, in creation order.
pub async fn get_milestones_for_campaign(
    pool: &SqlitePool,
    campaign_id: &str,
) -> Result<Vec<MilestoneView>> {
    let rows = sqlx::query_as::<_, MilestoneView>(
        r#"
        SELECT campaign_id, milestone_id, status, votes_for, votes_against,
               voting_deadline, last_ledger
        FROM   milestones
        WHERE  campaign_id = ?1
        ORDER  BY rowid ASC
        "#,
    )
    .bind(campaign_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
