//! # Ledger math
//!
//! Fixed-point percentage math shared by the escrow and the donor registry.
//!
//! All monetary amounts are `i128` in the smallest token unit. Percentages
//! are expressed in basis points over [`BPS_DENOM`]; every division rounds
//! toward zero, so the contract never credits more than it holds.

/// Basis-point denominator: 10_000 bps = 100%.
pub const BPS_DENOM: i128 = 10_000;

/// Flat exit tax on the entitled refund amount, routed to the platform.
pub const WITHDRAWAL_TAX_BPS: i128 = 1_000;

/// Lifetime cap on milestones per campaign.
pub const MAX_MILESTONES: u32 = 3;

/// Refund entitlement fraction, in bps, keyed by the campaign's approved
/// milestone count. A non-increasing step function: each approved tranche
/// reduces what every donor may still reclaim, regardless of when they
/// donated.
pub fn entitlement_bps(approved_milestones: u32) -> i128 {
    match approved_milestones {
        0 => 10_000,
        1 => 6_667,
        2 => 3_333,
        _ => 0,
    }
}

/// Tranche paid to the creator for the milestone at `ordinal` (1-based),
/// computed off the live escrow balance at withdrawal time:
///
/// - 1st milestone: one third of the balance.
/// - 2nd milestone: two thirds of the remaining balance.
/// - 3rd milestone: the entire remaining balance (dust included).
pub fn tranche_amount(ordinal: u32, balance: i128) -> i128 {
    match ordinal {
        1 => balance / 3,
        2 => balance * 2 / 3,
        _ => balance,
    }
}

/// Two-thirds supermajority check over amount-weighted votes.
///
/// Uses the cross-multiplied integer comparison `3*for >= 2*(for+against)`
/// so rounding never biases toward approval. Zero votes cast counts as
/// approval: no active opposition defaults to approve, mirroring the
/// first-milestone policy.
pub fn tally_approves(votes_for: i128, votes_against: i128) -> bool {
    let total = votes_for + votes_against;
    if total == 0 {
        return true;
    }
    3 * votes_for >= 2 * total
}

/// Entitled refund amount before tax.
pub fn refund_entitlement(contributed: i128, approved_milestones: u32) -> i128 {
    contributed * entitlement_bps(approved_milestones) / BPS_DENOM
}

/// Exit tax deducted from an entitled refund amount.
pub fn refund_tax(entitled: i128) -> i128 {
    entitled * WITHDRAWAL_TAX_BPS / BPS_DENOM
}

/// Contribution-weighted running average of the reward scale.
///
/// `new = (old_amount*old_scale + add_amount*current_scale) / (old_amount+add_amount)`
///
/// Round-down is deliberate: the locked average must never over-credit the
/// token burn at refund time.
pub fn weighted_avg_scale(
    old_amount: i128,
    old_scale: i128,
    add_amount: i128,
    current_scale: i128,
) -> i128 {
    (old_amount * old_scale + add_amount * current_scale) / (old_amount + add_amount)
}
