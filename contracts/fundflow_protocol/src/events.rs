//! # Events
//!
//! Typed event payloads and publish helpers.
//!
//! This module is the authoritative contract between the core and the
//! off-chain projector (`backend/indexer`): every state change that the
//! read model needs is emitted here, atomically with the storage writes of
//! the operation that produced it. Topics carry the short event symbol and
//! the campaign id; the payload is a single `#[contracttype]` struct.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::types::MilestoneStatus;

/// Topic `created` — a campaign was created.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCreated {
    pub owner: Address,
    pub campaign_id: u64,
    pub content_ref: String,
    pub category: u32,
    pub goal: i128,
    pub duration: u64,
}

/// Topic `donated` — a donation was escrowed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonationReceived {
    pub donor: Address,
    pub amount: i128,
    pub campaign_id: u64,
    pub timestamp: u64,
}

/// Topic `refunded` — a donor reclaimed their (decayed, taxed) contribution.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonationWithdrawn {
    pub campaign_id: u64,
    pub donor: Address,
    /// Net amount paid out after the exit tax.
    pub amount_received: i128,
    /// The donor's original cumulative contribution.
    pub amount_donated: i128,
    pub timestamp: u64,
}

/// Topic `m_create` — a milestone was opened for voting.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneCreated {
    pub owner: Address,
    pub campaign_id: u64,
    pub created_at: u64,
    pub voting_deadline: u64,
    pub milestone_id: String,
}

/// Topic `voted` — a donor cast a vote.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VotedOnMilestone {
    pub voter: Address,
    pub campaign_id: u64,
    pub support: bool,
    pub weight: i128,
    pub timestamp: u64,
    pub milestone_id: String,
}

/// Topic `m_status` — a milestone was tallied.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneStatusUpdated {
    pub campaign_id: u64,
    pub status: MilestoneStatus,
    pub milestone_id: String,
    pub timestamp: u64,
}

/// Topic `m_paid` — an approved tranche was paid to the creator.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneWithdrawn {
    pub owner: Address,
    pub amount: i128,
    pub timestamp: u64,
    pub campaign_id: u64,
}

/// Topic `ended` — the campaign stopped accepting donations.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignEnded {
    pub campaign_id: u64,
    pub timestamp: u64,
}

/// Topic `fee_set` — the platform creation fee changed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundingFeeUpdated {
    pub old_fee: i128,
    pub new_fee: i128,
}

/// Topic `fees_out` — the platform fee pool was drained by the admin.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsWithdrawn {
    pub owner: Address,
    pub amount: i128,
}

pub fn campaign_created(env: &Env, event: CampaignCreated) {
    env.events()
        .publish((symbol_short!("created"), event.campaign_id), event);
}

pub fn donation_received(env: &Env, event: DonationReceived) {
    env.events()
        .publish((symbol_short!("donated"), event.campaign_id), event);
}

pub fn donation_withdrawn(env: &Env, event: DonationWithdrawn) {
    env.events()
        .publish((symbol_short!("refunded"), event.campaign_id), event);
}

pub fn milestone_created(env: &Env, event: MilestoneCreated) {
    env.events()
        .publish((symbol_short!("m_create"), event.campaign_id), event);
}

pub fn voted_on_milestone(env: &Env, event: VotedOnMilestone) {
    env.events()
        .publish((symbol_short!("voted"), event.campaign_id), event);
}

pub fn milestone_status_updated(env: &Env, event: MilestoneStatusUpdated) {
    env.events()
        .publish((symbol_short!("m_status"), event.campaign_id), event);
}

pub fn milestone_withdrawn(env: &Env, event: MilestoneWithdrawn) {
    env.events()
        .publish((symbol_short!("m_paid"), event.campaign_id), event);
}

pub fn campaign_ended(env: &Env, event: CampaignEnded) {
    env.events()
        .publish((symbol_short!("ended"), event.campaign_id), event);
}

pub fn funding_fee_updated(env: &Env, event: FundingFeeUpdated) {
    env.events().publish((symbol_short!("fee_set"),), event);
}

pub fn funds_withdrawn(env: &Env, event: FundsWithdrawn) {
    env.events().publish((symbol_short!("fees_out"),), event);
}
