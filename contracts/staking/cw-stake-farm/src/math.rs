use std::cmp::{max, min};

use cosmwasm_std::{StdError, StdResult, Uint128, Uint256};

use crate::state::Config;
use crate::ContractError;

/// Accumulators carry reward-per-unit at 1e18 precision.
pub(crate) fn scale_factor() -> Uint256 {
    Uint256::from(10u8).pow(18)
}

/// Emission over the block range `[from, to)`, clamped to the reward
/// window: eligible block count times `reward_per_block`. A range
/// that clamps to nothing (window not yet open, already closed) is
/// zero; an inverted range is a caller error even when it would clamp
/// to nothing.
pub fn reward_multiplier(config: &Config, from: u64, to: u64) -> Result<Uint128, ContractError> {
    if from > to {
        return Err(ContractError::InvalidRange { from, to });
    }
    let lo = max(from, config.start_block);
    let hi = min(to, config.end_block);
    if hi <= lo {
        return Ok(Uint128::zero());
    }
    Ok(Uint128::from(hi - lo)
        .checked_mul(config.reward_per_block)
        .map_err(StdError::overflow)?)
}

/// The share of `multiplier` emitted to a pool holding `weight` out
/// of `total_weight`. Floor division.
pub fn pool_reward(multiplier: Uint128, weight: u64, total_weight: u64) -> StdResult<Uint128> {
    Ok(multiplier
        .checked_mul(Uint128::from(weight))?
        .checked_div(Uint128::from(total_weight))?)
}

/// Scaled accumulator growth from spreading `reward` over
/// `total_staked` units.
pub fn accumulator_delta(reward: Uint128, total_staked: Uint128) -> StdResult<Uint256> {
    Ok(Uint256::from(reward)
        .checked_mul(scale_factor())?
        .checked_div(Uint256::from(total_staked))?)
}

/// A position's lifetime reward at accumulator height
/// `acc_reward_per_unit`, truncated to whole reward units.
pub fn settled_amount(staked: Uint128, acc_reward_per_unit: Uint256) -> StdResult<Uint128> {
    let settled = Uint256::from(staked)
        .checked_mul(acc_reward_per_unit)?
        .checked_div(scale_factor())?;
    Ok(settled.try_into()?)
}
