//! # Fundflow Protocol Contract
//!
//! Milestone-based crowdfunding: creators raise funds toward a goal; escrowed
//! funds are released to the creator in up to three tranches, gated by
//! amount-weighted donor voting; donors may reclaim unspent contributions
//! subject to a decaying entitlement and a flat exit tax.
//!
//! One deployed contract hosts the whole platform. Campaigns are rows keyed
//! by `u64` id, each owning its donor registry, milestone slots and escrow
//! balance.
//!
//! | Phase        | Entry Point(s)                                       |
//! |--------------|------------------------------------------------------|
//! | Bootstrap    | [`FundflowProtocol::init`]                           |
//! | Admin        | `set_funding_fee`, `set_reward_scale`, `withdraw_platform_fees`, `transfer_admin`, `accept_admin` |
//! | Creation     | [`FundflowProtocol::create_campaign`]                |
//! | Funding      | [`FundflowProtocol::donate`]                         |
//! | Governance   | `create_milestone`, `vote`, `set_voting_period`      |
//! | Settlement   | `end_campaign`, `withdraw_milestone`, `refund`       |
//! | Queries      | `get_campaign`, `get_campaign_stats`, `get_milestone`, ... |
//!
//! ## Architecture
//!
//! Percentage and tranche math lives in [`math`]; the reward-token ledger in
//! [`rewards`]; storage access in [`storage`]; event payloads in [`events`].
//! This file contains only the public entry points, their guards and event
//! emissions.
//!
//! Every guard panics with a typed [`Error`] before any state is written;
//! the host reverts all storage writes and events on panic, so each entry
//! point applies all of its state changes or none. Operations that move
//! value out of the contract write their ledger state first and hold a
//! per-campaign guard flag for the duration of the call.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env, String,
};

mod events;
mod math;
mod rewards;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_milestones;

use math::{
    refund_entitlement, refund_tax, tally_approves, tranche_amount, MAX_MILESTONES,
    WITHDRAWAL_TAX_BPS,
};
use types::is_valid_category;
pub use types::{
    Campaign, CampaignConfig, CampaignState, CampaignStats, CampaignStatus, Donor, Milestone,
    MilestoneStatus, VoteRecord,
};

/// Creation-fee cap: one whole token unit (7 decimals).
pub const MAX_FUNDING_FEE: i128 = 10_000_000;

/// Canonical voting-window bounds, in days.
pub const MIN_VOTING_PERIOD_DAYS: u32 = 14;
pub const MAX_VOTING_PERIOD_DAYS: u32 = 90;
pub const DEFAULT_VOTING_PERIOD_DAYS: u32 = 14;

const SECONDS_PER_DAY: u64 = 86_400;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Authorization
    NotOwner = 1,
    Unauthorized = 2,
    AlreadyInitialized = 3,
    // State / lifecycle
    CampaignNotFound = 4,
    MilestoneNotFound = 5,
    CampaignEnded = 6,
    CampaignStillRunning = 7,
    AlreadyEnded = 8,
    PendingMilestoneExists = 9,
    MaxMilestonesReached = 10,
    MaxWithdrawalsExceeded = 11,
    MilestoneNotVotable = 12,
    // Timing
    VotingElapsed = 13,
    VotingPeriodNotElapsed = 14,
    // Validation
    InsufficientFunds = 15,
    EmptyMilestoneId = 16,
    EmptyTitle = 17,
    EmptyContentRef = 18,
    InvalidGoal = 19,
    InvalidDuration = 20,
    InvalidCategory = 21,
    InvalidFee = 22,
    InvalidScale = 23,
    FeeTooSmall = 24,
    // Eligibility
    NotADonor = 25,
    AlreadyVoted = 26,
    // Resource
    InsufficientContractBalance = 27,
    NoFundsToWithdraw = 28,
    Reentrancy = 29,
}

#[contract]
pub struct FundflowProtocol;

#[contractimpl]
impl FundflowProtocol {
    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Initialise the platform registry.
    ///
    /// Must be called exactly once after deployment; subsequent calls panic
    /// with `Error::AlreadyInitialized`.
    ///
    /// - `admin` collects platform fees and tunes global parameters.
    /// - `token` is the funding asset all campaigns escrow.
    /// - `funding_fee` is charged per campaign creation, capped at one token
    ///   unit.
    /// - `reward_scale` is the reward-token mint multiplier per unit donated.
    pub fn init(env: Env, admin: Address, token: Address, funding_fee: i128, reward_scale: i128) {
        admin.require_auth();
        if storage::is_initialized(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        if funding_fee < 0 || funding_fee > MAX_FUNDING_FEE {
            panic_with_error!(&env, Error::InvalidFee);
        }
        if reward_scale <= 0 {
            panic_with_error!(&env, Error::InvalidScale);
        }
        storage::set_admin(&env, &admin);
        storage::set_token(&env, &token);
        storage::set_funding_fee(&env, funding_fee);
        storage::set_reward_scale(&env, reward_scale);
    }

    // ─────────────────────────────────────────────────────────
    // Platform administration
    // ─────────────────────────────────────────────────────────

    /// Update the campaign creation fee. Admin-only, capped at one token unit.
    pub fn set_funding_fee(env: Env, caller: Address, new_fee: i128) {
        require_admin(&env, &caller);
        if new_fee < 0 || new_fee > MAX_FUNDING_FEE {
            panic_with_error!(&env, Error::InvalidFee);
        }
        let old_fee = storage::get_funding_fee(&env);
        storage::set_funding_fee(&env, new_fee);
        events::funding_fee_updated(&env, events::FundingFeeUpdated { old_fee, new_fee });
    }

    /// Update the global reward-token mint multiplier. Admin-only, must be
    /// positive. Takes effect for subsequent deposits; donors keep their
    /// locked-in weighted-average scale until refund.
    pub fn set_reward_scale(env: Env, caller: Address, new_scale: i128) {
        require_admin(&env, &caller);
        if new_scale <= 0 {
            panic_with_error!(&env, Error::InvalidScale);
        }
        storage::set_reward_scale(&env, new_scale);
    }

    /// Drain the platform fee pool to the admin.
    pub fn withdraw_platform_fees(env: Env, caller: Address) {
        require_admin(&env, &caller);
        let pool = storage::get_accrued_fees(&env);
        if pool == 0 {
            panic_with_error!(&env, Error::NoFundsToWithdraw);
        }
        storage::acquire_platform_guard(&env);
        // Zero the pool before the outbound transfer.
        storage::clear_accrued_fees(&env);
        let token_client = token::Client::new(&env, &storage::get_token(&env));
        token_client.transfer(&env.current_contract_address(), &caller, &pool);
        storage::release_platform_guard(&env);
        events::funds_withdrawn(
            &env,
            events::FundsWithdrawn {
                owner: caller,
                amount: pool,
            },
        );
    }

    /// Propose a new platform admin. The handover completes only when the
    /// proposed admin calls [`FundflowProtocol::accept_admin`].
    pub fn transfer_admin(env: Env, caller: Address, new_admin: Address) {
        require_admin(&env, &caller);
        storage::set_pending_admin(&env, &new_admin);
    }

    /// Accept a pending admin handover.
    pub fn accept_admin(env: Env, caller: Address) {
        caller.require_auth();
        match storage::take_pending_admin(&env) {
            Some(pending) if pending == caller => storage::set_admin(&env, &caller),
            _ => panic_with_error!(&env, Error::Unauthorized),
        }
    }

    // ─────────────────────────────────────────────────────────
    // Campaign creation
    // ─────────────────────────────────────────────────────────

    /// Create a new campaign.
    ///
    /// `fee_paid` must cover the current funding fee; any excess is accepted
    /// into the platform fee pool and not refunded. Returns the persisted
    /// campaign with a unique auto-incremented id.
    #[allow(clippy::too_many_arguments)]
    pub fn create_campaign(
        env: Env,
        creator: Address,
        content_ref: String,
        category: u32,
        title: String,
        goal: i128,
        duration: u64,
        fee_paid: i128,
    ) -> Campaign {
        creator.require_auth();

        if content_ref.is_empty() {
            panic_with_error!(&env, Error::EmptyContentRef);
        }
        if title.is_empty() {
            panic_with_error!(&env, Error::EmptyTitle);
        }
        if goal <= 0 {
            panic_with_error!(&env, Error::InvalidGoal);
        }
        if duration == 0 {
            panic_with_error!(&env, Error::InvalidDuration);
        }
        if !is_valid_category(category) {
            panic_with_error!(&env, Error::InvalidCategory);
        }
        if fee_paid < storage::get_funding_fee(&env) {
            panic_with_error!(&env, Error::FeeTooSmall);
        }

        if fee_paid > 0 {
            let token_client = token::Client::new(&env, &storage::get_token(&env));
            token_client.transfer(&creator, &env.current_contract_address(), &fee_paid);
            storage::add_accrued_fees(&env, fee_paid);
        }

        let id = storage::get_and_increment_campaign_id(&env);
        let duration_end = env.ledger().timestamp() + duration;

        let config = CampaignConfig {
            id,
            creator: creator.clone(),
            content_ref: content_ref.clone(),
            title,
            category,
            goal,
            duration_end,
        };
        let state = CampaignState {
            total_raised: 0,
            balance: 0,
            donor_count: 0,
            status: CampaignStatus::Active,
            milestones_created: 0,
            milestones_withdrawn: 0,
            approved_milestones: 0,
            voting_period_days: DEFAULT_VOTING_PERIOD_DAYS,
        };
        storage::save_campaign(&env, &config, &state);

        events::campaign_created(
            &env,
            events::CampaignCreated {
                owner: creator,
                campaign_id: id,
                content_ref,
                category,
                goal,
                duration,
            },
        );

        storage::load_campaign(&env, id)
    }

    // ─────────────────────────────────────────────────────────
    // Donor registry
    // ─────────────────────────────────────────────────────────

    /// Donate `amount` into a campaign's escrow.
    ///
    /// Mints `amount * reward_scale` reward tokens to the donor and updates
    /// the donor's locked weighted-average scale.
    pub fn donate(env: Env, campaign_id: u64, donor: Address, amount: i128) {
        donor.require_auth();

        if amount <= 0 {
            panic_with_error!(&env, Error::InsufficientFunds);
        }
        let mut state = storage::load_state(&env, campaign_id);
        if state.status != CampaignStatus::Active {
            panic_with_error!(&env, Error::CampaignEnded);
        }

        let token_client = token::Client::new(&env, &storage::get_token(&env));
        token_client.transfer(&donor, &env.current_contract_address(), &amount);

        let existing = storage::load_donor(&env, campaign_id, &donor);
        if existing.is_none() {
            state.donor_count += 1;
        }
        let scale = storage::get_reward_scale(&env);
        let entry = rewards::mint_for_deposit(&env, &donor, existing, amount, scale);
        storage::save_donor(&env, campaign_id, &donor, &entry);

        state.total_raised += amount;
        state.balance += amount;
        storage::save_state(&env, campaign_id, &state);

        events::donation_received(
            &env,
            events::DonationReceived {
                donor,
                amount,
                campaign_id,
                timestamp: env.ledger().timestamp(),
            },
        );
    }

    /// Reclaim the donor's remaining entitlement, minus the 10% exit tax.
    ///
    /// The entitlement decays with each approved milestone (100% → 66.67% →
    /// 33.33% → 0%). Because milestone tranches are computed off the live
    /// balance while the entitlement is computed off the original
    /// contribution, a late refund can find the escrow under-funded; that
    /// surfaces as `InsufficientContractBalance`, never a short payment.
    ///
    /// Returns the amount paid out.
    pub fn refund(env: Env, campaign_id: u64, donor: Address) -> i128 {
        donor.require_auth();

        let mut state = storage::load_state(&env, campaign_id);
        let entry = match storage::load_donor(&env, campaign_id, &donor) {
            Some(entry) if entry.contributed > 0 => entry,
            _ => panic_with_error!(&env, Error::NotADonor),
        };

        let entitled = refund_entitlement(entry.contributed, state.approved_milestones);
        if entitled == 0 {
            // Campaign fully disbursed: nothing left to reclaim.
            panic_with_error!(&env, Error::NoFundsToWithdraw);
        }
        if state.balance < entitled {
            panic_with_error!(&env, Error::InsufficientContractBalance);
        }

        storage::acquire_guard(&env, campaign_id);

        let tax = refund_tax(entitled);
        let payout = entitled - tax;

        // Ledger state first, transfer last.
        rewards::burn_for_refund(&env, &donor, &entry);
        storage::remove_donor(&env, campaign_id, &donor);
        state.balance -= entitled;
        // The forfeited (non-entitled) share stays in escrow, so only the
        // entitled amount leaves the raised total. Keeps balance <= total_raised.
        state.total_raised -= entitled;
        state.donor_count -= 1;
        storage::save_state(&env, campaign_id, &state);
        storage::add_accrued_fees(&env, tax);

        let token_client = token::Client::new(&env, &storage::get_token(&env));
        token_client.transfer(&env.current_contract_address(), &donor, &payout);
        storage::release_guard(&env, campaign_id);

        events::donation_withdrawn(
            &env,
            events::DonationWithdrawn {
                campaign_id,
                donor,
                amount_received: payout,
                amount_donated: entry.contributed,
                timestamp: env.ledger().timestamp(),
            },
        );

        payout
    }

    // ─────────────────────────────────────────────────────────
    // Milestone state machine
    // ─────────────────────────────────────────────────────────

    /// Open a new milestone for voting.
    ///
    /// At most one milestone may be Pending per campaign, and at most three
    /// may ever be created — declined milestones still consume their slot.
    pub fn create_milestone(env: Env, campaign_id: u64, creator: Address, milestone_id: String) {
        creator.require_auth();

        let config = storage::load_config(&env, campaign_id);
        if creator != config.creator {
            panic_with_error!(&env, Error::NotOwner);
        }
        if milestone_id.is_empty() {
            panic_with_error!(&env, Error::EmptyMilestoneId);
        }
        if storage::current_milestone_id(&env, campaign_id).is_some() {
            panic_with_error!(&env, Error::PendingMilestoneExists);
        }
        let mut state = storage::load_state(&env, campaign_id);
        if state.milestones_created >= MAX_MILESTONES {
            panic_with_error!(&env, Error::MaxMilestonesReached);
        }

        let created_at = env.ledger().timestamp();
        let voting_deadline =
            created_at + u64::from(state.voting_period_days) * SECONDS_PER_DAY;

        let milestone = Milestone {
            id: milestone_id.clone(),
            campaign_id,
            ordinal: state.milestones_created + 1,
            created_at,
            voting_deadline,
            status: MilestoneStatus::Pending,
            votes_for: 0,
            votes_against: 0,
        };
        storage::save_milestone(&env, &milestone);
        storage::set_current_milestone(&env, campaign_id, &milestone_id);

        state.milestones_created += 1;
        storage::save_state(&env, campaign_id, &state);

        events::milestone_created(
            &env,
            events::MilestoneCreated {
                owner: config.creator,
                campaign_id,
                created_at,
                voting_deadline,
                milestone_id,
            },
        );
    }

    /// Cast a vote on a Pending milestone.
    ///
    /// Weight equals the voter's current contributed amount; one vote per
    /// donor per milestone, immutable once cast.
    pub fn vote(env: Env, campaign_id: u64, milestone_id: String, voter: Address, support: bool) {
        voter.require_auth();

        let contributed = match storage::load_donor(&env, campaign_id, &voter) {
            Some(entry) if entry.contributed > 0 => entry.contributed,
            _ => panic_with_error!(&env, Error::NotADonor),
        };
        let mut milestone = storage::load_milestone(&env, campaign_id, &milestone_id);
        if milestone.status != MilestoneStatus::Pending {
            panic_with_error!(&env, Error::MilestoneNotVotable);
        }
        let now = env.ledger().timestamp();
        if now > milestone.voting_deadline {
            panic_with_error!(&env, Error::VotingElapsed);
        }
        if storage::has_voted(&env, campaign_id, &milestone_id, &voter) {
            panic_with_error!(&env, Error::AlreadyVoted);
        }

        if support {
            milestone.votes_for += contributed;
        } else {
            milestone.votes_against += contributed;
        }
        storage::save_milestone(&env, &milestone);
        storage::save_vote(
            &env,
            campaign_id,
            &milestone_id,
            &VoteRecord {
                voter: voter.clone(),
                support,
                weight: contributed,
                timestamp: now,
            },
        );

        events::voted_on_milestone(
            &env,
            events::VotedOnMilestone {
                voter,
                campaign_id,
                support,
                weight: contributed,
                timestamp: now,
                milestone_id,
            },
        );
    }

    /// Adjust the campaign's voting window. Creator-only, campaign must still
    /// be Active; canonical bounds 14–90 days.
    pub fn set_voting_period(env: Env, campaign_id: u64, creator: Address, days: u32) {
        creator.require_auth();

        let config = storage::load_config(&env, campaign_id);
        if creator != config.creator {
            panic_with_error!(&env, Error::NotOwner);
        }
        let mut state = storage::load_state(&env, campaign_id);
        if state.status != CampaignStatus::Active {
            panic_with_error!(&env, Error::CampaignEnded);
        }
        if !(MIN_VOTING_PERIOD_DAYS..=MAX_VOTING_PERIOD_DAYS).contains(&days) {
            panic_with_error!(&env, Error::InvalidDuration);
        }
        state.voting_period_days = days;
        storage::save_state(&env, campaign_id, &state);
    }

    // ─────────────────────────────────────────────────────────
    // Campaign escrow
    // ─────────────────────────────────────────────────────────

    /// Close a campaign for donations.
    ///
    /// Anyone may end a campaign whose duration has elapsed; the creator may
    /// end early at any time. Goal attainment is not required.
    pub fn end_campaign(env: Env, campaign_id: u64, caller: Address) {
        caller.require_auth();

        let config = storage::load_config(&env, campaign_id);
        let mut state = storage::load_state(&env, campaign_id);
        if state.status == CampaignStatus::Ended {
            panic_with_error!(&env, Error::AlreadyEnded);
        }
        let now = env.ledger().timestamp();
        if now < config.duration_end && caller != config.creator {
            panic_with_error!(&env, Error::NotOwner);
        }

        state.status = CampaignStatus::Ended;
        storage::save_state(&env, campaign_id, &state);

        events::campaign_ended(
            &env,
            events::CampaignEnded {
                campaign_id,
                timestamp: now,
            },
        );
    }

    /// Tally the campaign's Pending milestone and, if approved, pay the
    /// creator the tranche for its ordinal off the live balance:
    /// 1st — a third, 2nd — two thirds of the remainder, 3rd — everything.
    ///
    /// The first milestone auto-approves; later ones require the voting
    /// window to have elapsed and a 2/3 supermajority of cast weight. A
    /// declined milestone forfeits its tranche permanently and does not
    /// count as a withdrawal.
    ///
    /// Returns the amount paid (zero on decline).
    pub fn withdraw_milestone(env: Env, campaign_id: u64, creator: Address) -> i128 {
        creator.require_auth();

        let config = storage::load_config(&env, campaign_id);
        if creator != config.creator {
            panic_with_error!(&env, Error::NotOwner);
        }
        let mut state = storage::load_state(&env, campaign_id);
        if state.status != CampaignStatus::Ended {
            panic_with_error!(&env, Error::CampaignStillRunning);
        }
        let milestone_id = match storage::current_milestone_id(&env, campaign_id) {
            Some(id) => id,
            None => panic_with_error!(&env, Error::MilestoneNotFound),
        };
        if state.milestones_withdrawn >= MAX_MILESTONES {
            panic_with_error!(&env, Error::MaxWithdrawalsExceeded);
        }

        let mut milestone = storage::load_milestone(&env, campaign_id, &milestone_id);
        let now = env.ledger().timestamp();
        if milestone.ordinal > 1 && now < milestone.voting_deadline {
            panic_with_error!(&env, Error::VotingPeriodNotElapsed);
        }

        storage::acquire_guard(&env, campaign_id);

        let approved =
            milestone.ordinal == 1 || tally_approves(milestone.votes_for, milestone.votes_against);

        milestone.status = if approved {
            MilestoneStatus::Approved
        } else {
            MilestoneStatus::Declined
        };
        storage::save_milestone(&env, &milestone);
        storage::clear_current_milestone(&env, campaign_id);

        events::milestone_status_updated(
            &env,
            events::MilestoneStatusUpdated {
                campaign_id,
                status: milestone.status,
                milestone_id,
                timestamp: now,
            },
        );

        if !approved {
            storage::release_guard(&env, campaign_id);
            return 0;
        }

        let payout = tranche_amount(milestone.ordinal, state.balance);
        state.balance -= payout;
        state.milestones_withdrawn += 1;
        state.approved_milestones += 1;
        storage::save_state(&env, campaign_id, &state);

        if payout > 0 {
            let token_client = token::Client::new(&env, &storage::get_token(&env));
            token_client.transfer(&env.current_contract_address(), &creator, &payout);
        }
        storage::release_guard(&env, campaign_id);

        events::milestone_withdrawn(
            &env,
            events::MilestoneWithdrawn {
                owner: creator,
                amount: payout,
                timestamp: now,
                campaign_id,
            },
        );

        payout
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Full campaign view (config + state).
    pub fn get_campaign(env: Env, campaign_id: u64) -> Campaign {
        storage::load_campaign(&env, campaign_id)
    }

    /// Aggregate stats consumed by the frontend cards.
    pub fn get_campaign_stats(env: Env, campaign_id: u64) -> CampaignStats {
        let state = storage::load_state(&env, campaign_id);
        let config = storage::load_config(&env, campaign_id);
        CampaignStats {
            campaign_id,
            total_raised: state.total_raised,
            goal: config.goal,
            donor_count: state.donor_count,
            approved_milestones: state.approved_milestones,
            ended: state.status == CampaignStatus::Ended,
        }
    }

    pub fn get_milestone(env: Env, campaign_id: u64, milestone_id: String) -> Milestone {
        storage::load_milestone(&env, campaign_id, &milestone_id)
    }

    /// `(votes_for, votes_against)` for a milestone.
    pub fn get_milestone_votes(env: Env, campaign_id: u64, milestone_id: String) -> (i128, i128) {
        let milestone = storage::load_milestone(&env, campaign_id, &milestone_id);
        (milestone.votes_for, milestone.votes_against)
    }

    pub fn has_voted(env: Env, campaign_id: u64, milestone_id: String, voter: Address) -> bool {
        storage::has_voted(&env, campaign_id, &milestone_id, &voter)
    }

    pub fn get_vote(
        env: Env,
        campaign_id: u64,
        milestone_id: String,
        voter: Address,
    ) -> Option<VoteRecord> {
        storage::load_vote(&env, campaign_id, &milestone_id, &voter)
    }

    /// The donor's live contributed amount, zero if never donated or refunded.
    pub fn get_contribution(env: Env, campaign_id: u64, donor: Address) -> i128 {
        storage::load_donor(&env, campaign_id, &donor)
            .map(|entry| entry.contributed)
            .unwrap_or(0)
    }

    /// The donor's locked weighted-average reward scale.
    pub fn get_locked_scale(env: Env, campaign_id: u64, donor: Address) -> i128 {
        storage::load_donor(&env, campaign_id, &donor)
            .map(|entry| entry.reward_scale)
            .unwrap_or(0)
    }

    pub fn get_reward_balance(env: Env, holder: Address) -> i128 {
        storage::reward_balance(&env, &holder)
    }

    pub fn get_reward_scale(env: Env) -> i128 {
        storage::get_reward_scale(&env)
    }

    pub fn get_funding_fee(env: Env) -> i128 {
        storage::get_funding_fee(&env)
    }

    /// Flat exit tax on refund entitlements, in basis points.
    pub fn get_withdrawal_tax_bps(env: Env) -> i128 {
        let _ = env;
        WITHDRAWAL_TAX_BPS
    }

    pub fn get_voting_period(env: Env, campaign_id: u64) -> u32 {
        storage::load_state(&env, campaign_id).voting_period_days
    }

    pub fn get_accrued_fees(env: Env) -> i128 {
        storage::get_accrued_fees(&env)
    }

    pub fn get_admin(env: Env) -> Address {
        storage::get_admin(&env)
    }
}

/// Admin gate shared by the platform-configuration entry points.
fn require_admin(env: &Env, caller: &Address) {
    caller.require_auth();
    if *caller != storage::get_admin(env) {
        panic_with_error!(env, Error::Unauthorized);
    }
}
