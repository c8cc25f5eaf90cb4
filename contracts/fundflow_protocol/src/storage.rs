//! # Storage
//!
//! Typed helpers over Soroban's storage tiers used by Fundflow:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key             | Type      | Description                               |
//! |-----------------|-----------|-------------------------------------------|
//! | `Admin`         | `Address` | Platform admin                            |
//! | `PendingAdmin`  | `Address` | Proposed admin (two-step handover)        |
//! | `Token`         | `Address` | Funding token (native asset contract)     |
//! | `CampaignCount` | `u64`     | Auto-increment campaign ID counter        |
//! | `FundingFee`    | `i128`    | Fee required to create a campaign         |
//! | `RewardScale`   | `i128`    | Global reward-token mint multiplier       |
//! | `AccruedFees`   | `i128`    | Platform fee pool (creation fees + taxes) |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                        | Type             | Description             |
//! |----------------------------|------------------|-------------------------|
//! | `Config(id)`               | `CampaignConfig` | Immutable campaign data |
//! | `State(id)`                | `CampaignState`  | Mutable campaign state  |
//! | `Donor(id, addr)`          | `Donor`          | Per-donor entry         |
//! | `CurrentMilestone(id)`     | `String`         | Open milestone id       |
//! | `Milestone(id, mid)`       | `Milestone`      | Milestone record        |
//! | `Vote(id, mid, addr)`      | `VoteRecord`     | One vote per donor      |
//! | `RewardBalance(addr)`      | `i128`           | Reward-token balance    |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining.
//!
//! ## Reentrancy guard
//!
//! `Guard(id)` lives in **temporary** storage and is held for the duration of
//! any value-transferring call on that campaign. The host already reverts all
//! writes on panic; the guard additionally blocks a malicious token recipient
//! from re-invoking an escrow operation mid-transfer.

use soroban_sdk::{contracttype, panic_with_error, Address, Env, String};

use crate::types::{Campaign, CampaignConfig, CampaignState, Donor, Milestone, VoteRecord};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Platform admin address (Instance).
    Admin,
    /// Proposed new admin awaiting acceptance (Instance).
    PendingAdmin,
    /// Funding token address (Instance).
    Token,
    /// Global auto-increment counter for campaign IDs (Instance).
    CampaignCount,
    /// Campaign creation fee (Instance).
    FundingFee,
    /// Global reward-token mint multiplier (Instance).
    RewardScale,
    /// Platform fee pool (Instance).
    AccruedFees,
    /// Immutable campaign configuration keyed by ID (Persistent).
    Config(u64),
    /// Mutable campaign state keyed by ID (Persistent).
    State(u64),
    /// Per-campaign donor entry (Persistent).
    Donor(u64, Address),
    /// Content id of the campaign's open Pending milestone (Persistent).
    CurrentMilestone(u64),
    /// Milestone record keyed by campaign ID and content id (Persistent).
    Milestone(u64, String),
    /// Vote record keyed by campaign ID, milestone id and voter (Persistent).
    Vote(u64, String, Address),
    /// Reward-token balance per holder (Persistent).
    RewardBalance(Address),
    /// Reentrancy guard flag per campaign (Temporary).
    Guard(u64),
    /// Reentrancy guard flag for platform fee withdrawal (Temporary).
    PlatformGuard,
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

/// Panics with `Unauthorized` before init; init gates on [`is_initialized`].
pub fn get_admin(env: &Env) -> Address {
    bump_instance(env);
    match env.storage().instance().get(&DataKey::Admin) {
        Some(admin) => admin,
        None => panic_with_error!(env, Error::Unauthorized),
    }
}

pub fn set_pending_admin(env: &Env, pending: &Address) {
    env.storage().instance().set(&DataKey::PendingAdmin, pending);
    bump_instance(env);
}

pub fn take_pending_admin(env: &Env) -> Option<Address> {
    let pending: Option<Address> = env.storage().instance().get(&DataKey::PendingAdmin);
    if pending.is_some() {
        env.storage().instance().remove(&DataKey::PendingAdmin);
    }
    pending
}

pub fn set_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
    bump_instance(env);
}

pub fn get_token(env: &Env) -> Address {
    bump_instance(env);
    match env.storage().instance().get(&DataKey::Token) {
        Some(token) => token,
        None => panic_with_error!(env, Error::Unauthorized),
    }
}

/// Atomically reads, increments, and stores the campaign counter.
/// Returns the ID to use for the *current* campaign (pre-increment value).
pub fn get_and_increment_campaign_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::CampaignCount, &(current + 1));
    current
}

pub fn set_funding_fee(env: &Env, fee: i128) {
    env.storage().instance().set(&DataKey::FundingFee, &fee);
    bump_instance(env);
}

pub fn get_funding_fee(env: &Env) -> i128 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::FundingFee)
        .unwrap_or(0)
}

pub fn set_reward_scale(env: &Env, scale: i128) {
    env.storage().instance().set(&DataKey::RewardScale, &scale);
    bump_instance(env);
}

pub fn get_reward_scale(env: &Env) -> i128 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::RewardScale)
        .unwrap_or(1)
}

pub fn get_accrued_fees(env: &Env) -> i128 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::AccruedFees)
        .unwrap_or(0)
}

/// Single atomic increment of the platform fee pool.
pub fn add_accrued_fees(env: &Env, amount: i128) {
    let total = get_accrued_fees(env) + amount;
    env.storage().instance().set(&DataKey::AccruedFees, &total);
}

pub fn clear_accrued_fees(env: &Env) {
    env.storage().instance().set(&DataKey::AccruedFees, &0i128);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Save both the immutable config and initial mutable state for a new campaign.
pub fn save_campaign(env: &Env, config: &CampaignConfig, state: &CampaignState) {
    let config_key = DataKey::Config(config.id);
    let state_key = DataKey::State(config.id);
    env.storage().persistent().set(&config_key, config);
    env.storage().persistent().set(&state_key, state);
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
}

/// Load only the immutable campaign configuration.
/// Panics with `CampaignNotFound` for an unknown ID.
pub fn load_config(env: &Env, id: u64) -> CampaignConfig {
    let key = DataKey::Config(id);
    match env.storage().persistent().get(&key) {
        Some(config) => {
            bump_persistent(env, &key);
            config
        }
        None => panic_with_error!(env, Error::CampaignNotFound),
    }
}

/// Load only the mutable campaign state.
pub fn load_state(env: &Env, id: u64) -> CampaignState {
    let key = DataKey::State(id);
    match env.storage().persistent().get(&key) {
        Some(state) => {
            bump_persistent(env, &key);
            state
        }
        None => panic_with_error!(env, Error::CampaignNotFound),
    }
}

/// Save only the mutable campaign state (the hot write path).
pub fn save_state(env: &Env, id: u64, state: &CampaignState) {
    let key = DataKey::State(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

/// Load the full `Campaign` by combining config and state.
pub fn load_campaign(env: &Env, id: u64) -> Campaign {
    let config = load_config(env, id);
    let state = load_state(env, id);
    Campaign {
        id: config.id,
        creator: config.creator,
        content_ref: config.content_ref,
        title: config.title,
        category: config.category,
        goal: config.goal,
        duration_end: config.duration_end,
        total_raised: state.total_raised,
        balance: state.balance,
        donor_count: state.donor_count,
        status: state.status,
        milestones_created: state.milestones_created,
        milestones_withdrawn: state.milestones_withdrawn,
        approved_milestones: state.approved_milestones,
        voting_period_days: state.voting_period_days,
    }
}

// ── Donors ───────────────────────────────────────────────────────────

pub fn load_donor(env: &Env, campaign_id: u64, donor: &Address) -> Option<Donor> {
    let key = DataKey::Donor(campaign_id, donor.clone());
    let entry: Option<Donor> = env.storage().persistent().get(&key);
    if entry.is_some() {
        bump_persistent(env, &key);
    }
    entry
}

pub fn save_donor(env: &Env, campaign_id: u64, donor: &Address, entry: &Donor) {
    let key = DataKey::Donor(campaign_id, donor.clone());
    env.storage().persistent().set(&key, entry);
    bump_persistent(env, &key);
}

/// Delete a donor entry on full refund.
pub fn remove_donor(env: &Env, campaign_id: u64, donor: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Donor(campaign_id, donor.clone()));
}

// ── Milestones ───────────────────────────────────────────────────────

pub fn current_milestone_id(env: &Env, campaign_id: u64) -> Option<String> {
    let key = DataKey::CurrentMilestone(campaign_id);
    let id: Option<String> = env.storage().persistent().get(&key);
    if id.is_some() {
        bump_persistent(env, &key);
    }
    id
}

pub fn set_current_milestone(env: &Env, campaign_id: u64, milestone_id: &String) {
    let key = DataKey::CurrentMilestone(campaign_id);
    env.storage().persistent().set(&key, milestone_id);
    bump_persistent(env, &key);
}

pub fn clear_current_milestone(env: &Env, campaign_id: u64) {
    env.storage()
        .persistent()
        .remove(&DataKey::CurrentMilestone(campaign_id));
}

/// Panics with `MilestoneNotFound` for an unknown milestone id.
pub fn load_milestone(env: &Env, campaign_id: u64, milestone_id: &String) -> Milestone {
    let key = DataKey::Milestone(campaign_id, milestone_id.clone());
    match env.storage().persistent().get(&key) {
        Some(milestone) => {
            bump_persistent(env, &key);
            milestone
        }
        None => panic_with_error!(env, Error::MilestoneNotFound),
    }
}

pub fn save_milestone(env: &Env, milestone: &Milestone) {
    let key = DataKey::Milestone(milestone.campaign_id, milestone.id.clone());
    env.storage().persistent().set(&key, milestone);
    bump_persistent(env, &key);
}

// ── Votes ────────────────────────────────────────────────────────────

pub fn has_voted(env: &Env, campaign_id: u64, milestone_id: &String, voter: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Vote(campaign_id, milestone_id.clone(), voter.clone()))
}

pub fn load_vote(
    env: &Env,
    campaign_id: u64,
    milestone_id: &String,
    voter: &Address,
) -> Option<VoteRecord> {
    env.storage()
        .persistent()
        .get(&DataKey::Vote(campaign_id, milestone_id.clone(), voter.clone()))
}

pub fn save_vote(env: &Env, campaign_id: u64, milestone_id: &String, record: &VoteRecord) {
    let key = DataKey::Vote(campaign_id, milestone_id.clone(), record.voter.clone());
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

// ── Reward-token ledger ──────────────────────────────────────────────

pub fn reward_balance(env: &Env, holder: &Address) -> i128 {
    let key = DataKey::RewardBalance(holder.clone());
    let balance: i128 = env.storage().persistent().get(&key).unwrap_or(0);
    if balance != 0 {
        bump_persistent(env, &key);
    }
    balance
}

pub fn set_reward_balance(env: &Env, holder: &Address, balance: i128) {
    let key = DataKey::RewardBalance(holder.clone());
    if balance == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &balance);
        bump_persistent(env, &key);
    }
}

// ── Reentrancy guard ─────────────────────────────────────────────────

/// Acquire the per-campaign transfer guard. Panics with `Reentrancy` if a
/// value-transferring call on this campaign is already in flight.
pub fn acquire_guard(env: &Env, campaign_id: u64) {
    let key = DataKey::Guard(campaign_id);
    if env.storage().temporary().has(&key) {
        panic_with_error!(env, Error::Reentrancy);
    }
    env.storage().temporary().set(&key, &true);
}

pub fn release_guard(env: &Env, campaign_id: u64) {
    env.storage().temporary().remove(&DataKey::Guard(campaign_id));
}

/// Platform-wide guard for fee withdrawal.
pub fn acquire_platform_guard(env: &Env) {
    if env.storage().temporary().has(&DataKey::PlatformGuard) {
        panic_with_error!(env, Error::Reentrancy);
    }
    env.storage().temporary().set(&DataKey::PlatformGuard, &true);
}

pub fn release_platform_guard(env: &Env) {
    env.storage().temporary().remove(&DataKey::PlatformGuard);
}
