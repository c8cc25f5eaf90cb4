//! Canonical event types emitted by the Fundflow protocol contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/fundflow_protocol/src/events.rs`. The topic symbols and the
//! payload field names below are the authoritative contract between the
//! on-chain core and this projector.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the Fundflow contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A campaign was created (`created` topic).
    CampaignCreated,
    /// A donation was escrowed (`donated` topic).
    DonationReceived,
    /// A donor reclaimed their contribution (`refunded` topic).
    DonationWithdrawn,
    /// A milestone was opened for voting (`m_create` topic).
    MilestoneCreated,
    /// A donor voted on a milestone (`voted` topic).
    VotedOnMilestone,
    /// A milestone was tallied (`m_status` topic).
    MilestoneStatusUpdated,
    /// An approved tranche was paid to the creator (`m_paid` topic).
    MilestoneWithdrawn,
    /// A campaign stopped accepting donations (`ended` topic).
    CampaignEnded,
    /// The platform creation fee changed (`fee_set` topic).
    FundingFeeUpdated,
    /// The platform fee pool was drained (`fees_out` topic).
    FundsWithdrawn,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "created" => Self::CampaignCreated,
            "donated" => Self::DonationReceived,
            "refunded" => Self::DonationWithdrawn,
            "m_create" => Self::MilestoneCreated,
            "voted" => Self::VotedOnMilestone,
            "m_status" => Self::MilestoneStatusUpdated,
            "m_paid" => Self::MilestoneWithdrawn,
            "ended" => Self::CampaignEnded,
            "fee_set" => Self::FundingFeeUpdated,
            "fees_out" => Self::FundsWithdrawn,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CampaignCreated => "campaign_created",
            Self::DonationReceived => "donation_received",
            Self::DonationWithdrawn => "donation_withdrawn",
            Self::MilestoneCreated => "milestone_created",
            Self::VotedOnMilestone => "voted_on_milestone",
            Self::MilestoneStatusUpdated => "milestone_status_updated",
            Self::MilestoneWithdrawn => "milestone_withdrawn",
            Self::CampaignEnded => "campaign_ended",
            Self::FundingFeeUpdated => "funding_fee_updated",
            Self::FundsWithdrawn => "funds_withdrawn",
            Self::Unknown => "unknown",
        }
    }
}

/// A fully decoded Fundflow event, ready to be stored and projected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundflowEvent {
    pub event_type: String,
    pub campaign_id: Option<String>,
    /// Donor, voter, creator or admin, depending on the event kind.
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub milestone_id: Option<String>,
    /// Vote direction for `voted_on_milestone`; tally outcome text for
    /// `milestone_status_updated`.
    pub detail: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub campaign_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub milestone_id: Option<String>,
    pub detail: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}

/// Materialized campaign view reconstructed from events.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CampaignView {
    pub campaign_id: String,
    pub owner: Option<String>,
    pub goal: Option<String>,
    pub total_donated: i64,
    pub donation_count: i64,
    pub milestone_count: i64,
    pub approved_milestones: i64,
    pub ended: i64,
    pub last_ledger: i64,
}

/// Materialized milestone view reconstructed from events.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MilestoneView {
    pub campaign_id: String,
    pub milestone_id: String,
    pub status: String,
    pub votes_for: i64,
    pub votes_against: i64,
    pub voting_deadline: Option<i64>,
    pub last_ledger: i64,
}
