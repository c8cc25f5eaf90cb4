#![allow(dead_code)]

extern crate std;

use crate::types::{Campaign, CampaignStatus};

/// INV-1: escrowed balance never exceeds the raised total.
pub fn assert_balance_within_raised(campaign: &Campaign) {
    assert!(
        campaign.balance <= campaign.total_raised,
        "INV-1 violated: campaign {} balance {} exceeds total_raised {}",
        campaign.id,
        campaign.balance,
        campaign.total_raised
    );
}

/// INV-2: escrowed balance never goes negative.
pub fn assert_balance_non_negative(campaign: &Campaign) {
    assert!(
        campaign.balance >= 0,
        "INV-2 violated: campaign {} has negative balance ({})",
        campaign.id,
        campaign.balance
    );
}

/// INV-3: milestone counters stay within the lifetime cap of 3 and remain
/// mutually consistent (paid implies approved, approved implies created).
pub fn assert_milestone_counters(campaign: &Campaign) {
    assert!(
        campaign.milestones_created <= 3,
        "INV-3 violated: campaign {} created {} milestones",
        campaign.id,
        campaign.milestones_created
    );
    assert!(
        campaign.milestones_withdrawn <= campaign.approved_milestones,
        "INV-3 violated: campaign {} withdrew {} but approved {}",
        campaign.id,
        campaign.milestones_withdrawn,
        campaign.approved_milestones
    );
    assert!(
        campaign.approved_milestones <= campaign.milestones_created,
        "INV-3 violated: campaign {} approved {} but created {}",
        campaign.id,
        campaign.approved_milestones,
        campaign.milestones_created
    );
}

/// INV-4: withdrawal count is monotonic (caller supplies before/after).
pub fn assert_withdrawals_monotonic(before: u32, after: u32) {
    assert!(
        after >= before && after <= 3,
        "INV-4 violated: withdrawals went {before} -> {after}"
    );
}

/// INV-5: value conservation. Everything that ever left the escrow
/// (creator tranches + donor payouts + taxes) plus what remains must equal
/// what was deposited.
pub fn assert_conservation(
    deposited: i128,
    creator_paid: i128,
    donor_paid: i128,
    tax_paid: i128,
    remaining_balance: i128,
) {
    assert_eq!(
        deposited,
        creator_paid + donor_paid + tax_paid + remaining_balance,
        "INV-5 violated: {deposited} deposited but {creator_paid} + {donor_paid} + {tax_paid} + {remaining_balance} accounted"
    );
}

/// INV-6: an ended campaign stays ended.
pub fn assert_ended_is_terminal(before: &Campaign, after: &Campaign) {
    if before.status == CampaignStatus::Ended {
        assert_eq!(
            after.status,
            CampaignStatus::Ended,
            "INV-6 violated: campaign {} left the Ended state",
            after.id
        );
    }
}

/// Run all stateless campaign invariants.
pub fn assert_all_campaign_invariants(campaign: &Campaign) {
    assert_balance_within_raised(campaign);
    assert_balance_non_negative(campaign);
    assert_milestone_counters(campaign);
}
