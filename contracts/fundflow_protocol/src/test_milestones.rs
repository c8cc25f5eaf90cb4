extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env, String,
};

use crate::invariants;
use crate::{Error, FundflowProtocol, FundflowProtocolClient, MilestoneStatus};

const DAY: u64 = 86_400;
const UNIT: i128 = 10_000_000;

fn setup<'a>() -> (
    Env,
    FundflowProtocolClient<'a>,
    Address,
    token::StellarAssetClient<'a>,
) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(FundflowProtocol, ());
    let client = FundflowProtocolClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    let token_sac = token::StellarAssetClient::new(&env, &sac.address());

    client.init(&admin, &sac.address(), &0i128, &1i128);
    (env, client, admin, token_sac)
}

/// Creates a campaign, funds it with the given donor amounts and ends it.
fn funded_campaign(
    env: &Env,
    client: &FundflowProtocolClient,
    token_sac: &token::StellarAssetClient,
    creator: &Address,
    donations: &[(&Address, i128)],
) -> u64 {
    let campaign = client.create_campaign(
        creator,
        &String::from_str(env, "ar://campaign"),
        &2u32,
        &String::from_str(env, "Short film"),
        &(10 * UNIT),
        &(30 * DAY),
        &0i128,
    );
    for (donor, amount) in donations {
        token_sac.mint(donor, amount);
        client.donate(&campaign.id, donor, amount);
    }
    client.end_campaign(&campaign.id, creator);
    campaign.id
}

fn mid(env: &Env, name: &str) -> String {
    String::from_str(env, name)
}

#[test]
fn create_milestone_guards() {
    let (env, client, _admin, token_sac) = setup();
    let creator = Address::generate(&env);
    let donor = Address::generate(&env);
    let stranger = Address::generate(&env);
    let id = funded_campaign(&env, &client, &token_sac, &creator, &[(&donor, 5 * UNIT)]);

    assert_eq!(
        client.try_create_milestone(&id, &stranger, &mid(&env, "m1")),
        Err(Ok(Error::NotOwner.into()))
    );
    assert_eq!(
        client.try_create_milestone(&id, &creator, &mid(&env, "")),
        Err(Ok(Error::EmptyMilestoneId.into()))
    );

    client.create_milestone(&id, &creator, &mid(&env, "m1"));

    // Only one Pending milestone at a time.
    assert_eq!(
        client.try_create_milestone(&id, &creator, &mid(&env, "m2")),
        Err(Ok(Error::PendingMilestoneExists.into()))
    );

    let milestone = client.get_milestone(&id, &mid(&env, "m1"));
    assert_eq!(milestone.ordinal, 1);
    assert_eq!(milestone.status, MilestoneStatus::Pending);
    assert_eq!(milestone.voting_deadline, milestone.created_at + 14 * DAY);
}

#[test]
fn milestone_cap_counts_declined_slots() {
    let (env, client, _admin, token_sac) = setup();
    let creator = Address::generate(&env);
    let donor = Address::generate(&env);
    let id = funded_campaign(&env, &client, &token_sac, &creator, &[(&donor, 9 * UNIT)]);

    // Slot 1: auto-approved payout.
    client.create_milestone(&id, &creator, &mid(&env, "m1"));
    client.withdraw_milestone(&id, &creator);

    // Slot 2: unanimously declined.
    client.create_milestone(&id, &creator, &mid(&env, "m2"));
    client.vote(&id, &mid(&env, "m2"), &donor, &false);
    env.ledger().with_mut(|li| li.timestamp += 15 * DAY);
    let paid = client.withdraw_milestone(&id, &creator);
    assert_eq!(paid, 0);

    // Slot 3 is still available after the decline...
    client.create_milestone(&id, &creator, &mid(&env, "m3"));
    env.ledger().with_mut(|li| li.timestamp += 15 * DAY);
    client.withdraw_milestone(&id, &creator);

    // ...but the declined slot is spent forever: no fourth milestone.
    assert_eq!(
        client.try_create_milestone(&id, &creator, &mid(&env, "m4")),
        Err(Ok(Error::MaxMilestonesReached.into()))
    );
    // And with nothing pending there is nothing to withdraw.
    assert_eq!(
        client.try_withdraw_milestone(&id, &creator),
        Err(Ok(Error::MilestoneNotFound.into()))
    );

    let campaign = client.get_campaign(&id);
    assert_eq!(campaign.milestones_created, 3);
    assert_eq!(campaign.milestones_withdrawn, 2);
    assert_eq!(campaign.approved_milestones, 2);
    invariants::assert_all_campaign_invariants(&campaign);
}

#[test]
fn vote_requires_donor() {
    let (env, client, _admin, token_sac) = setup();
    let creator = Address::generate(&env);
    let donor = Address::generate(&env);
    let stranger = Address::generate(&env);
    let id = funded_campaign(&env, &client, &token_sac, &creator, &[(&donor, UNIT)]);
    client.create_milestone(&id, &creator, &mid(&env, "m1"));

    assert_eq!(
        client.try_vote(&id, &mid(&env, "m1"), &stranger, &true),
        Err(Ok(Error::NotADonor.into()))
    );
}

#[test]
fn vote_is_weighted_and_idempotent() {
    let (env, client, _admin, token_sac) = setup();
    let creator = Address::generate(&env);
    let donor_a = Address::generate(&env);
    let donor_b = Address::generate(&env);
    let id = funded_campaign(
        &env,
        &client,
        &token_sac,
        &creator,
        &[(&donor_a, 7 * UNIT), (&donor_b, 3 * UNIT)],
    );
    client.create_milestone(&id, &creator, &mid(&env, "m1"));

    client.vote(&id, &mid(&env, "m1"), &donor_a, &true);
    client.vote(&id, &mid(&env, "m1"), &donor_b, &false);

    let (votes_for, votes_against) = client.get_milestone_votes(&id, &mid(&env, "m1"));
    assert_eq!(votes_for, 7 * UNIT);
    assert_eq!(votes_against, 3 * UNIT);
    assert!(client.has_voted(&id, &mid(&env, "m1"), &donor_a));

    let record = client.get_vote(&id, &mid(&env, "m1"), &donor_b).unwrap();
    assert!(!record.support);
    assert_eq!(record.weight, 3 * UNIT);

    // A second vote fails and leaves the tallies untouched.
    assert_eq!(
        client.try_vote(&id, &mid(&env, "m1"), &donor_a, &false),
        Err(Ok(Error::AlreadyVoted.into()))
    );
    let (votes_for, votes_against) = client.get_milestone_votes(&id, &mid(&env, "m1"));
    assert_eq!(votes_for, 7 * UNIT);
    assert_eq!(votes_against, 3 * UNIT);
}

#[test]
fn vote_after_deadline_fails() {
    let (env, client, _admin, token_sac) = setup();
    let creator = Address::generate(&env);
    let donor = Address::generate(&env);
    let id = funded_campaign(&env, &client, &token_sac, &creator, &[(&donor, UNIT)]);
    client.create_milestone(&id, &creator, &mid(&env, "m1"));

    env.ledger().with_mut(|li| li.timestamp += 15 * DAY);
    assert_eq!(
        client.try_vote(&id, &mid(&env, "m1"), &donor, &true),
        Err(Ok(Error::VotingElapsed.into()))
    );
    let (votes_for, votes_against) = client.get_milestone_votes(&id, &mid(&env, "m1"));
    assert_eq!(votes_for, 0);
    assert_eq!(votes_against, 0);
}

#[test]
fn vote_on_settled_milestone_fails() {
    let (env, client, _admin, token_sac) = setup();
    let creator = Address::generate(&env);
    let donor = Address::generate(&env);
    let id = funded_campaign(&env, &client, &token_sac, &creator, &[(&donor, UNIT)]);
    client.create_milestone(&id, &creator, &mid(&env, "m1"));
    client.withdraw_milestone(&id, &creator);

    assert_eq!(
        client.try_vote(&id, &mid(&env, "m1"), &donor, &true),
        Err(Ok(Error::MilestoneNotVotable.into()))
    );
    assert_eq!(
        client.try_vote(&id, &mid(&env, "nope"), &donor, &true),
        Err(Ok(Error::MilestoneNotFound.into()))
    );
}

#[test]
fn withdraw_requires_ended_campaign() {
    let (env, client, _admin, token_sac) = setup();
    let creator = Address::generate(&env);
    let donor = Address::generate(&env);

    let campaign = client.create_campaign(
        &creator,
        &String::from_str(&env, "ar://campaign"),
        &2u32,
        &String::from_str(&env, "Short film"),
        &(10 * UNIT),
        &(30 * DAY),
        &0i128,
    );
    token_sac.mint(&donor, &UNIT);
    client.donate(&campaign.id, &donor, &UNIT);
    client.create_milestone(&campaign.id, &creator, &mid(&env, "m1"));

    assert_eq!(
        client.try_withdraw_milestone(&campaign.id, &creator),
        Err(Ok(Error::CampaignStillRunning.into()))
    );
}

#[test]
fn withdraw_waits_for_voting_window() {
    let (env, client, _admin, token_sac) = setup();
    let creator = Address::generate(&env);
    let donor = Address::generate(&env);
    let stranger = Address::generate(&env);
    let id = funded_campaign(&env, &client, &token_sac, &creator, &[(&donor, 6 * UNIT)]);

    assert_eq!(
        client.try_withdraw_milestone(&id, &stranger),
        Err(Ok(Error::NotOwner.into()))
    );

    // First milestone pays immediately, no window.
    client.create_milestone(&id, &creator, &mid(&env, "m1"));
    client.withdraw_milestone(&id, &creator);

    // Second milestone must wait out its voting window even with votes cast.
    client.create_milestone(&id, &creator, &mid(&env, "m2"));
    client.vote(&id, &mid(&env, "m2"), &donor, &true);
    assert_eq!(
        client.try_withdraw_milestone(&id, &creator),
        Err(Ok(Error::VotingPeriodNotElapsed.into()))
    );

    env.ledger().with_mut(|li| li.timestamp += 15 * DAY);
    let paid = client.withdraw_milestone(&id, &creator);
    assert!(paid > 0);
}

/// Support below the 2/3 threshold declines the milestone: the creator gets
/// nothing for that slot and the approved count is unchanged.
#[test]
fn minority_support_declines_milestone() {
    let (env, client, _admin, token_sac) = setup();
    let creator = Address::generate(&env);
    let donor_a = Address::generate(&env);
    let donor_b = Address::generate(&env);
    let id = funded_campaign(
        &env,
        &client,
        &token_sac,
        &creator,
        &[(&donor_a, 4 * UNIT), (&donor_b, 6 * UNIT)],
    );

    client.create_milestone(&id, &creator, &mid(&env, "m1"));
    client.withdraw_milestone(&id, &creator);
    let approved_before = client.get_campaign(&id).approved_milestones;

    // 40% support-weight < 66.67%.
    client.create_milestone(&id, &creator, &mid(&env, "m2"));
    client.vote(&id, &mid(&env, "m2"), &donor_a, &true);
    client.vote(&id, &mid(&env, "m2"), &donor_b, &false);
    env.ledger().with_mut(|li| li.timestamp += 15 * DAY);

    let balance_before = client.get_campaign(&id).balance;
    let paid = client.withdraw_milestone(&id, &creator);
    assert_eq!(paid, 0);

    let campaign = client.get_campaign(&id);
    assert_eq!(campaign.approved_milestones, approved_before);
    assert_eq!(campaign.balance, balance_before);
    assert_eq!(
        client.get_milestone(&id, &mid(&env, "m2")).status,
        MilestoneStatus::Declined
    );
}

/// With no votes cast at all, a later milestone approves by default after
/// its window elapses, mirroring the first-milestone policy.
#[test]
fn zero_votes_defaults_to_approval() {
    let (env, client, _admin, token_sac) = setup();
    let creator = Address::generate(&env);
    let donor = Address::generate(&env);
    let id = funded_campaign(&env, &client, &token_sac, &creator, &[(&donor, 3 * UNIT)]);

    client.create_milestone(&id, &creator, &mid(&env, "m1"));
    client.withdraw_milestone(&id, &creator);

    client.create_milestone(&id, &creator, &mid(&env, "m2"));
    env.ledger().with_mut(|li| li.timestamp += 15 * DAY);
    let paid = client.withdraw_milestone(&id, &creator);
    assert!(paid > 0);
    assert_eq!(
        client.get_milestone(&id, &mid(&env, "m2")).status,
        MilestoneStatus::Approved
    );
}

/// A longer configured voting period pushes the milestone deadline out.
#[test]
fn voting_period_change_applies_to_new_milestones() {
    let (env, client, _admin, token_sac) = setup();
    let creator = Address::generate(&env);
    let donor = Address::generate(&env);

    let campaign = client.create_campaign(
        &creator,
        &String::from_str(&env, "ar://campaign"),
        &3u32,
        &String::from_str(&env, "Community garden"),
        &(10 * UNIT),
        &(30 * DAY),
        &0i128,
    );
    client.set_voting_period(&campaign.id, &creator, &30u32);
    token_sac.mint(&donor, &UNIT);
    client.donate(&campaign.id, &donor, &UNIT);
    client.end_campaign(&campaign.id, &creator);

    client.create_milestone(&campaign.id, &creator, &mid(&env, "m1"));
    let milestone = client.get_milestone(&campaign.id, &mid(&env, "m1"));
    assert_eq!(milestone.voting_deadline, milestone.created_at + 30 * DAY);
}
