//! # Reward-token ledger
//!
//! Internal fungible receipt minted 1:`scale` with deposits and burned on
//! refund. Balances confer voting eligibility off-chain and are tracked in
//! contract storage rather than a separate token contract; each mutation is
//! a single read-modify-write inside one invocation, so the host's
//! per-invocation atomicity makes it safe.

use soroban_sdk::{Address, Env};

use crate::math::weighted_avg_scale;
use crate::storage;
use crate::types::Donor;

/// Mint `amount * current_scale` reward tokens to `donor` and return the
/// donor entry updated with the new contribution-weighted locked scale.
///
/// The locked scale guarantees that a later refund burns exactly what was
/// minted even if the global scale has since been changed by the admin.
pub fn mint_for_deposit(
    env: &Env,
    donor: &Address,
    entry: Option<Donor>,
    amount: i128,
    current_scale: i128,
) -> Donor {
    let minted = amount * current_scale;
    let balance = storage::reward_balance(env, donor);
    storage::set_reward_balance(env, donor, balance + minted);

    match entry {
        None => Donor {
            contributed: amount,
            reward_scale: current_scale,
        },
        Some(existing) => Donor {
            contributed: existing.contributed + amount,
            reward_scale: weighted_avg_scale(
                existing.contributed,
                existing.reward_scale,
                amount,
                current_scale,
            ),
        },
    }
}

/// Burn the tokens minted for `entry` across all of its deposits.
///
/// Burns `contributed * locked_scale` — decoupled from the current global
/// scale. The balance is floored at zero so rounding in the locked average
/// (which always rounds down) can never drive it negative.
pub fn burn_for_refund(env: &Env, donor: &Address, entry: &Donor) -> i128 {
    let burn = entry.contributed * entry.reward_scale;
    let balance = storage::reward_balance(env, donor);
    let remaining = if balance > burn { balance - burn } else { 0 };
    storage::set_reward_balance(env, donor, remaining);
    burn
}
