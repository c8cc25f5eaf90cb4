//! # Types
//!
//! Shared data structures used across all modules of the Fundflow protocol.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A campaign is internally stored as two separate ledger entries:
//!
//! - [`CampaignConfig`] — written once at creation; never mutated.
//! - [`CampaignState`] — written on every deposit, refund, milestone
//!   settlement and end transition.
//!
//! Deposits and votes are the high-frequency writes; keeping the mutable
//! entry small cuts the per-write ledger cost while the public API exposes
//! the reconstructed [`Campaign`] struct.
//!
//! ### Milestone lifecycle as a Finite-State Machine
//!
//! [`MilestoneStatus`] enforces a strict forward-only lifecycle:
//!
//! ```text
//! (not created) ──► Pending ──► Approved
//!                       └─────► Declined
//! ```
//!
//! Both `Approved` and `Declined` are terminal. A declined milestone does not
//! reopen its slot: the creator must create a new milestone in the next
//! ordinal, and the lifetime cap of three created milestones still applies.

use soroban_sdk::{contracttype, Address, String};

/// Lifecycle status of a campaign.
///
/// `Ended` is terminal: no further deposits are accepted, and only an ended
/// campaign can pay out milestone tranches.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CampaignStatus {
    /// Accepting donations; milestones cannot be withdrawn yet.
    Active,
    /// Closed for donations; milestone withdrawal unlocked.
    Ended,
}

/// Settlement status of a milestone.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MilestoneStatus {
    /// Created, voting window open or awaiting tally.
    Pending,
    /// Tally passed; the tranche was paid.
    Approved,
    /// Tally failed; the tranche is forfeited permanently.
    Declined,
}

/// Campaign category codes accepted by `create_campaign`.
///
/// Stored and emitted as the raw `u32` so the projector does not need the
/// contract's enum definition; [`is_valid_category`] gates the range.
pub const CATEGORY_CHARITY: u32 = 0;
pub const CATEGORY_TECH: u32 = 1;
pub const CATEGORY_ART: u32 = 2;
pub const CATEGORY_COMMUNITY: u32 = 3;
pub const CATEGORY_EDUCATION: u32 = 4;

/// Returns `true` for a known category code.
pub fn is_valid_category(category: u32) -> bool {
    category <= CATEGORY_EDUCATION
}

/// Immutable campaign configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    pub id: u64,
    /// Address that created the campaign and receives milestone tranches.
    pub creator: Address,
    /// Opaque content identifier (e.g. Arweave tx id) for campaign media.
    pub content_ref: String,
    pub title: String,
    pub category: u32,
    /// Target funding amount in the smallest token unit.
    pub goal: i128,
    /// Ledger timestamp after which anyone may end the campaign.
    pub duration_end: u64,
}

/// Mutable campaign state, updated on deposits, refunds and settlements.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignState {
    /// Cumulative donations net of refunded contributions.
    pub total_raised: i128,
    /// Funds currently escrowed. Invariant: `balance <= total_raised`.
    pub balance: i128,
    /// Number of distinct donors with a live (non-refunded) entry.
    pub donor_count: u32,
    pub status: CampaignStatus,
    /// Milestones ever created, 0..=3. Declined milestones consume a slot.
    pub milestones_created: u32,
    /// Milestones paid out, 0..=3, monotonically increasing.
    pub milestones_withdrawn: u32,
    /// Milestones approved, 0..=3; drives the refund entitlement fraction.
    pub approved_milestones: u32,
    /// Voting window length in days, bounds 14..=90.
    pub voting_period_days: u32,
}

/// Full representation of a campaign, reconstructed from the split
/// `CampaignConfig` + `CampaignState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    pub id: u64,
    pub creator: Address,
    pub content_ref: String,
    pub title: String,
    pub category: u32,
    pub goal: i128,
    pub duration_end: u64,
    pub total_raised: i128,
    pub balance: i128,
    pub donor_count: u32,
    pub status: CampaignStatus,
    pub milestones_created: u32,
    pub milestones_withdrawn: u32,
    pub approved_milestones: u32,
    pub voting_period_days: u32,
}

/// Per-campaign donor entry.
///
/// Created on first deposit, mutated on subsequent deposits and removed on
/// full refund. `reward_scale` is the contribution-weighted average of the
/// global reward scale at each deposit, locked in so a refund burns exactly
/// the tokens that were minted regardless of later scale changes.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Donor {
    pub contributed: i128,
    pub reward_scale: i128,
}

/// A milestone funding tranche.
///
/// The `id` is an opaque content identifier supplied by the creator and acts
/// as the primary key together with the campaign id. `ordinal` is the 1-based
/// creation index and selects the tranche fraction.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Milestone {
    pub id: String,
    pub campaign_id: u64,
    pub ordinal: u32,
    pub created_at: u64,
    pub voting_deadline: u64,
    pub status: MilestoneStatus,
    /// Amount-weighted support.
    pub votes_for: i128,
    /// Amount-weighted opposition.
    pub votes_against: i128,
}

/// An immutable, one-per-donor vote record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteRecord {
    pub voter: Address,
    pub support: bool,
    /// Donor's contributed amount at cast time.
    pub weight: i128,
    pub timestamp: u64,
}

/// Aggregate read-model row returned by `get_campaign_stats`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignStats {
    pub campaign_id: u64,
    pub total_raised: i128,
    pub goal: i128,
    pub donor_count: u32,
    pub approved_milestones: u32,
    pub ended: bool,
}
