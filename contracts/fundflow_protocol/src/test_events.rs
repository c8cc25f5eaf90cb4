extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    token, vec, Address, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{
    CampaignCreated, CampaignEnded, DonationReceived, DonationWithdrawn, FundingFeeUpdated,
    MilestoneCreated, MilestoneStatusUpdated, MilestoneWithdrawn, VotedOnMilestone,
};
use crate::{FundflowProtocol, FundflowProtocolClient, MilestoneStatus};

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

fn funded_campaign(
    env: &Env,
    client: &FundflowProtocolClient,
    token_sac: &token::StellarAssetClient,
    creator: &Address,
    donor: &Address,
    amount: i128,
) -> u64 {
    let campaign = client.create_campaign(
        creator,
        &String::from_str(env, "ar://campaign"),
        &1u32,
        &String::from_str(env, "Solar kits"),
        &(10 * UNIT),
        &(30 * DAY),
        &0i128,
    );
    token_sac.mint(donor, &amount);
    client.donate(&campaign.id, donor, &amount);
    campaign.id
}

#[test]
fn campaign_created_event() {
    let (env, client, _admin, _sac) = setup();
    let creator = Address::generate(&env);
    let content_ref = String::from_str(&env, "ar://campaign");

    let campaign = client.create_campaign(
        &creator,
        &content_ref,
        &1u32,
        &String::from_str(&env, "Solar kits"),
        &(10 * UNIT),
        &(30 * DAY),
        &0i128,
    );

    let last_event = env.events().all().last().expect("no events");
    assert_eq!(last_event.0, client.address);
    assert_eq!(
        last_event.1,
        vec![
            &env,
            symbol_short!("created").into_val(&env),
            campaign.id.into_val(&env),
        ]
    );

    let data: CampaignCreated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        CampaignCreated {
            owner: creator,
            campaign_id: campaign.id,
            content_ref,
            category: 1,
            goal: 10 * UNIT,
            duration: 30 * DAY,
        }
    );
}

#[test]
fn donation_received_event() {
    let (env, client, _admin, token_sac) = setup();
    let creator = Address::generate(&env);
    let donor = Address::generate(&env);
    let id = funded_campaign(&env, &client, &token_sac, &creator, &donor, 2 * UNIT);

    let last_event = env.events().all().last().expect("no events");
    assert_eq!(
        last_event.1,
        vec![
            &env,
            symbol_short!("donated").into_val(&env),
            id.into_val(&env),
        ]
    );

    let data: DonationReceived = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        DonationReceived {
            donor,
            amount: 2 * UNIT,
            campaign_id: id,
            timestamp: env.ledger().timestamp(),
        }
    );
}

#[test]
fn refund_event_carries_both_amounts() {
    let (env, client, _admin, token_sac) = setup();
    let creator = Address::generate(&env);
    let donor = Address::generate(&env);
    let id = funded_campaign(&env, &client, &token_sac, &creator, &donor, UNIT);

    client.refund(&id, &donor);

    let last_event = env.events().all().last().expect("no events");
    assert_eq!(
        last_event.1,
        vec![
            &env,
            symbol_short!("refunded").into_val(&env),
            id.into_val(&env),
        ]
    );

    let data: DonationWithdrawn = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        DonationWithdrawn {
            campaign_id: id,
            donor,
            amount_received: 9 * UNIT / 10,
            amount_donated: UNIT,
            timestamp: env.ledger().timestamp(),
        }
    );
}

#[test]
fn milestone_created_and_vote_events() {
    let (env, client, _admin, token_sac) = setup();
    let creator = Address::generate(&env);
    let donor = Address::generate(&env);
    let id = funded_campaign(&env, &client, &token_sac, &creator, &donor, 5 * UNIT);
    client.end_campaign(&id, &creator);

    let milestone_id = String::from_str(&env, "ar://milestone-1");
    client.create_milestone(&id, &creator, &milestone_id);

    let last_event = env.events().all().last().expect("no events");
    assert_eq!(
        last_event.1,
        vec![
            &env,
            symbol_short!("m_create").into_val(&env),
            id.into_val(&env),
        ]
    );
    let data: MilestoneCreated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(data.owner, creator);
    assert_eq!(data.milestone_id, milestone_id);
    assert_eq!(data.voting_deadline, data.created_at + 14 * DAY);

    client.vote(&id, &milestone_id, &donor, &true);
    let last_event = env.events().all().last().expect("no events");
    assert_eq!(
        last_event.1,
        vec![
            &env,
            symbol_short!("voted").into_val(&env),
            id.into_val(&env),
        ]
    );
    let data: VotedOnMilestone = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        VotedOnMilestone {
            voter: donor,
            campaign_id: id,
            support: true,
            weight: 5 * UNIT,
            timestamp: env.ledger().timestamp(),
            milestone_id,
        }
    );
}

#[test]
fn withdrawal_emits_status_then_payout() {
    let (env, client, _admin, token_sac) = setup();
    let creator = Address::generate(&env);
    let donor = Address::generate(&env);
    let id = funded_campaign(&env, &client, &token_sac, &creator, &donor, 6 * UNIT);
    client.end_campaign(&id, &creator);

    let milestone_id = String::from_str(&env, "ar://milestone-1");
    client.create_milestone(&id, &creator, &milestone_id);
    let paid = client.withdraw_milestone(&id, &creator);

    let all_events = env.events().all();
    let payout_event = all_events.last().expect("no events");
    assert_eq!(
        payout_event.1,
        vec![
            &env,
            symbol_short!("m_paid").into_val(&env),
            id.into_val(&env),
        ]
    );
    let data: MilestoneWithdrawn = payout_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        MilestoneWithdrawn {
            owner: creator,
            amount: paid,
            timestamp: env.ledger().timestamp(),
            campaign_id: id,
        }
    );

    // The token transfer publishes its own event in between; find the
    // status event by topic rather than by position.
    let status_topics = vec![
        &env,
        symbol_short!("m_status").into_val(&env),
        id.into_val(&env),
    ];
    let status_event = all_events
        .iter()
        .find(|e| e.1 == status_topics)
        .expect("no m_status event");
    let data: MilestoneStatusUpdated = status_event.2.try_into_val(&env).unwrap();
    assert_eq!(data.status, MilestoneStatus::Approved);
    assert_eq!(data.milestone_id, milestone_id);
}

#[test]
fn campaign_ended_event() {
    let (env, client, _admin, _sac) = setup();
    let creator = Address::generate(&env);
    let campaign = client.create_campaign(
        &creator,
        &String::from_str(&env, "ar://campaign"),
        &0u32,
        &String::from_str(&env, "Title"),
        &UNIT,
        &DAY,
        &0i128,
    );

    client.end_campaign(&campaign.id, &creator);

    let last_event = env.events().all().last().expect("no events");
    assert_eq!(
        last_event.1,
        vec![
            &env,
            symbol_short!("ended").into_val(&env),
            campaign.id.into_val(&env),
        ]
    );
    let data: CampaignEnded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(data.campaign_id, campaign.id);
}

#[test]
fn fee_update_event() {
    let (env, client, admin, _sac) = setup();
    client.set_funding_fee(&admin, &(UNIT / 2));

    let last_event = env.events().all().last().expect("no events");
    assert_eq!(
        last_event.1,
        vec![&env, symbol_short!("fee_set").into_val(&env)]
    );
    let data: FundingFeeUpdated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        FundingFeeUpdated {
            old_fee: 0,
            new_fee: UNIT / 2,
        }
    );
}
