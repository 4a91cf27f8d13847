use std::cmp::{max, min};

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    from_json, to_json_binary, Addr, BankMsg, Binary, Coin, CosmosMsg, Deps, DepsMut, Empty, Env,
    MessageInfo, Response, StdError, StdResult, Storage, Uint128, Uint256, WasmMsg,
};
use cw2::set_contract_version;
use cw20::{Cw20ReceiveMsg, Denom};
use cw_utils::{may_pay, must_pay};

use crate::math;
use crate::msg::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, NumPoolsResponse, PendingRewardResponse, QueryMsg,
    ReceiveMsg, RewardMultiplierResponse, StakedBalanceResponse, WithdrawAmountResponse,
};
use crate::state::{
    Config, PauseInfo, PoolInfo, Position, UnstakeEntry, CONFIG, MAX_UNSTAKE_ENTRIES, PAUSE,
    POOLS, POOL_COUNT, POSITIONS, TOTAL_WEIGHT,
};
use crate::ContractError;

pub(crate) const CONTRACT_NAME: &str = "crates.io:cw-stake-farm";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Pool 0 stakes the native asset and is the only pool reachable
/// through `DepositNative`.
pub const NATIVE_POOL_ID: u64 = 0;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response<Empty>, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    cw_ownable::initialize_owner(deps.storage, deps.api, msg.owner.as_deref())?;

    if msg.start_block >= msg.end_block || msg.end_block <= env.block.height {
        return Err(ContractError::InvalidRewardWindow {
            start: msg.start_block,
            end: msg.end_block,
        });
    }

    let reward_token = match msg.reward_token {
        Denom::Native(denom) => Denom::Native(denom),
        Denom::Cw20(addr) => Denom::Cw20(deps.api.addr_validate(addr.as_ref())?),
    };

    let config = Config {
        reward_token,
        reward_per_block: msg.reward_per_block,
        start_block: msg.start_block,
        end_block: msg.end_block,
    };
    CONFIG.save(deps.storage, &config)?;
    PAUSE.save(deps.storage, &PauseInfo::default())?;

    // Initialize state to zero. We do this instead of using
    // `unwrap_or_default` where these are read as it protects us
    // against a scenario where state is cleared by a bad actor and
    // `unwrap_or_default` carries on.
    TOTAL_WEIGHT.save(deps.storage, &0)?;
    POOL_COUNT.save(deps.storage, &0)?;

    Ok(Response::new()
        .add_attribute("owner", msg.owner.unwrap_or_else(|| "None".to_string()))
        .add_attribute(
            "reward_token",
            match config.reward_token {
                Denom::Native(denom) => denom,
                Denom::Cw20(addr) => addr.into_string(),
            },
        )
        .add_attribute("reward_per_block", config.reward_per_block)
        .add_attribute("start_block", config.start_block.to_string())
        .add_attribute("end_block", config.end_block.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response<Empty>, ContractError> {
    match msg {
        ExecuteMsg::Receive(msg) => execute_receive(deps, env, info, msg),
        ExecuteMsg::DepositNative {} => execute_deposit_native(deps, env, info),
        ExecuteMsg::Unstake { pool_id, amount } => {
            execute_unstake(deps, env, info, pool_id, amount)
        }
        ExecuteMsg::Withdraw { pool_id } => execute_withdraw(deps, env, info, pool_id),
        ExecuteMsg::Claim { pool_id } => execute_claim(deps, env, info, pool_id),
        ExecuteMsg::Fund {} => execute_fund_native(deps, info),
        ExecuteMsg::UpdatePools {} => execute_update_pools(deps, env),
        ExecuteMsg::AddPool {
            asset,
            weight,
            min_deposit,
            unstake_lock_blocks,
            with_update,
        } => execute_add_pool(
            deps,
            env,
            info,
            asset,
            weight,
            min_deposit,
            unstake_lock_blocks,
            with_update,
        ),
        ExecuteMsg::SetPoolWeight {
            pool_id,
            weight,
            with_update,
        } => execute_set_pool_weight(deps, env, info, pool_id, weight, with_update),
        ExecuteMsg::SetRewardPerBlock { reward_per_block } => {
            execute_set_reward_per_block(deps, env, info, reward_per_block)
        }
        ExecuteMsg::SetRewardWindow {
            start_block,
            end_block,
        } => execute_set_reward_window(deps, env, info, start_block, end_block),
        ExecuteMsg::SetPaused { withdraw, claim } => {
            execute_set_paused(deps, info, withdraw, claim)
        }
        ExecuteMsg::UpdateOwnership(action) => execute_update_owner(deps, info, env, action),
    }
}

pub fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    wrapper: Cw20ReceiveMsg,
) -> Result<Response<Empty>, ContractError> {
    let msg: ReceiveMsg = from_json(&wrapper.msg)?;
    let sender = deps.api.addr_validate(&wrapper.sender)?;
    match msg {
        ReceiveMsg::Deposit { pool_id } => {
            execute_deposit_cw20(deps, env, info, sender, pool_id, wrapper.amount)
        }
        ReceiveMsg::Fund {} => execute_fund_cw20(deps, info, sender, wrapper.amount),
    }
}

pub fn execute_deposit_cw20(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    sender: Addr,
    pool_id: u64,
    amount: Uint128,
) -> Result<Response<Empty>, ContractError> {
    let pool = load_pool(deps.storage, pool_id)?;
    let expected = match pool.asset {
        Denom::Cw20(ref addr) => addr.clone(),
        Denom::Native(_) => return Err(ContractError::InvalidStakingAsset {}),
    };
    if info.sender != expected {
        return Err(ContractError::InvalidToken {
            received: info.sender,
            expected,
        });
    }
    // Depositing exactly the minimum is rejected on the token path
    // (but allowed on the native path).
    if amount <= pool.min_deposit {
        return Err(ContractError::InvalidAmount {
            min_deposit: pool.min_deposit,
        });
    }
    apply_deposit(deps, env, sender, pool_id, amount)
}

pub fn execute_deposit_native(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response<Empty>, ContractError> {
    let pool = load_pool(deps.storage, NATIVE_POOL_ID)?;
    let denom = match pool.asset {
        Denom::Native(ref denom) => denom.clone(),
        Denom::Cw20(_) => return Err(ContractError::InvalidStakingAsset {}),
    };
    // `may_pay` rather than `must_pay`: the funds are already in hand
    // by the time this runs, so a zero deposit is structurally legal
    // and settles the position when the pool minimum allows it.
    let amount = may_pay(&info, &denom)?;
    if amount < pool.min_deposit {
        return Err(ContractError::InvalidAmount {
            min_deposit: pool.min_deposit,
        });
    }
    apply_deposit(deps, env, info.sender, NATIVE_POOL_ID, amount)
}

fn apply_deposit(
    deps: DepsMut,
    env: Env,
    sender: Addr,
    pool_id: u64,
    amount: Uint128,
) -> Result<Response<Empty>, ContractError> {
    let pool_reward = accrue_pool(deps.storage, env.block.height, pool_id)?;
    let mut pool = load_pool(deps.storage, pool_id)?;
    let mut position = POSITIONS
        .may_load(deps.storage, (pool_id, &sender))?
        .unwrap_or_default();

    settle_position(&pool, &mut position)?;
    position.staked = position
        .staked
        .checked_add(amount)
        .map_err(StdError::overflow)?;
    position.reward_debt = math::settled_amount(position.staked, pool.acc_reward_per_unit)?;
    pool.total_staked = pool
        .total_staked
        .checked_add(amount)
        .map_err(StdError::overflow)?;

    POOLS.save(deps.storage, pool_id, &pool)?;
    POSITIONS.save(deps.storage, (pool_id, &sender), &position)?;

    Ok(Response::new()
        .add_attribute("action", "deposit")
        .add_attribute("pool_id", pool_id.to_string())
        .add_attribute("from", sender)
        .add_attribute("amount", amount)
        .add_attribute("pool_reward", pool_reward))
}

pub fn execute_unstake(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    pool_id: u64,
    amount: Uint128,
) -> Result<Response<Empty>, ContractError> {
    if PAUSE.load(deps.storage)?.withdraw_paused {
        return Err(ContractError::WithdrawPaused {});
    }
    let pool_reward = accrue_pool(deps.storage, env.block.height, pool_id)?;
    let mut pool = load_pool(deps.storage, pool_id)?;
    let mut position = POSITIONS
        .may_load(deps.storage, (pool_id, &info.sender))?
        .unwrap_or_default();
    if amount > position.staked {
        return Err(ContractError::InsufficientStake {});
    }

    settle_position(&pool, &mut position)?;
    position.staked = position
        .staked
        .checked_sub(amount)
        .map_err(StdError::overflow)?;
    position.reward_debt = math::settled_amount(position.staked, pool.acc_reward_per_unit)?;
    pool.total_staked = pool
        .total_staked
        .checked_sub(amount)
        .map_err(StdError::overflow)?;

    let mut response = Response::new()
        .add_attribute("action", "unstake")
        .add_attribute("pool_id", pool_id.to_string())
        .add_attribute("from", info.sender.clone())
        .add_attribute("amount", amount)
        .add_attribute("pool_reward", pool_reward);

    // A zero amount only settles; it does not occupy a queue slot.
    if !amount.is_zero() {
        if position.unstake_queue.len() >= MAX_UNSTAKE_ENTRIES {
            return Err(ContractError::TooManyUnstakeEntries {});
        }
        let unlock_block = env.block.height + pool.unstake_lock_blocks;
        position.unstake_queue.push(UnstakeEntry {
            amount,
            unlock_block,
        });
        response = response.add_attribute("unlock_block", unlock_block.to_string());
    }

    POOLS.save(deps.storage, pool_id, &pool)?;
    POSITIONS.save(deps.storage, (pool_id, &info.sender), &position)?;

    Ok(response)
}

pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    pool_id: u64,
) -> Result<Response<Empty>, ContractError> {
    if PAUSE.load(deps.storage)?.withdraw_paused {
        return Err(ContractError::WithdrawPaused {});
    }
    let pool = load_pool(deps.storage, pool_id)?;
    let mut position = POSITIONS
        .may_load(deps.storage, (pool_id, &info.sender))?
        .unwrap_or_default();

    let released = drain_unlocked(&mut position, env.block.height)?;
    POSITIONS.save(deps.storage, (pool_id, &info.sender), &position)?;

    let mut response = Response::new()
        .add_attribute("action", "withdraw")
        .add_attribute("pool_id", pool_id.to_string())
        .add_attribute("from", info.sender.clone())
        .add_attribute("amount", released)
        .add_attribute("height", env.block.height.to_string());
    // Principal payouts are not best effort: if this message fails
    // the whole withdrawal aborts and the queue entries survive.
    if !released.is_zero() {
        response = response.add_message(get_transfer_msg(info.sender, released, pool.asset)?);
    }
    Ok(response)
}

pub fn execute_claim(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    pool_id: u64,
) -> Result<Response<Empty>, ContractError> {
    if PAUSE.load(deps.storage)?.claim_paused {
        return Err(ContractError::ClaimPaused {});
    }
    let pool_reward = accrue_pool(deps.storage, env.block.height, pool_id)?;
    let pool = load_pool(deps.storage, pool_id)?;
    let mut position = POSITIONS
        .may_load(deps.storage, (pool_id, &info.sender))?
        .unwrap_or_default();

    settle_position(&pool, &mut position)?;
    let pending = position.pending_reward;
    position.pending_reward = Uint128::zero();
    POSITIONS.save(deps.storage, (pool_id, &info.sender), &position)?;

    // Pay out at most what the contract holds. A shortfall shrinks
    // the payout instead of failing the claim, so reward accounting
    // never blocks on liquidity.
    let config = CONFIG.load(deps.storage)?;
    let available = query_reward_balance(deps.as_ref(), &env, &config.reward_token)?;
    let payout = min(pending, available);

    let mut response = Response::new()
        .add_attribute("action", "claim")
        .add_attribute("pool_id", pool_id.to_string())
        .add_attribute("from", info.sender.clone())
        .add_attribute("amount", pending)
        .add_attribute("pool_reward", pool_reward);
    if !payout.is_zero() {
        response = response.add_message(get_transfer_msg(info.sender, payout, config.reward_token)?);
    }
    Ok(response)
}

pub fn execute_fund_native(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response<Empty>, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    match config.reward_token {
        Denom::Native(denom) => {
            let amount = must_pay(&info, &denom).map_err(|_| ContractError::InvalidFunds {})?;
            Ok(Response::new()
                .add_attribute("action", "fund")
                .add_attribute("from", info.sender)
                .add_attribute("amount", amount))
        }
        Denom::Cw20(_) => Err(ContractError::InvalidFunds {}),
    }
}

pub fn execute_fund_cw20(
    deps: DepsMut,
    info: MessageInfo,
    sender: Addr,
    amount: Uint128,
) -> Result<Response<Empty>, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.reward_token != Denom::Cw20(info.sender) {
        return Err(ContractError::InvalidFunds {});
    }
    Ok(Response::new()
        .add_attribute("action", "fund")
        .add_attribute("from", sender)
        .add_attribute("amount", amount))
}

pub fn execute_update_pools(deps: DepsMut, env: Env) -> Result<Response<Empty>, ContractError> {
    accrue_all(deps.storage, env.block.height)?;
    let count = POOL_COUNT.load(deps.storage)?;
    Ok(Response::new()
        .add_attribute("action", "update_pools")
        .add_attribute("pools", count.to_string()))
}

#[allow(clippy::too_many_arguments)]
pub fn execute_add_pool(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: Denom,
    weight: u64,
    min_deposit: Uint128,
    unstake_lock_blocks: u64,
    with_update: bool,
) -> Result<Response<Empty>, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    let config = CONFIG.load(deps.storage)?;
    if env.block.height >= config.end_block {
        return Err(ContractError::AlreadyEnded {});
    }
    if unstake_lock_blocks == 0 {
        return Err(ContractError::InvalidLockBlocks {});
    }

    let pool_id = POOL_COUNT.load(deps.storage)?;
    let asset = match (pool_id, asset) {
        (NATIVE_POOL_ID, Denom::Native(denom)) => Denom::Native(denom),
        (_, Denom::Cw20(addr)) if pool_id != NATIVE_POOL_ID => {
            Denom::Cw20(deps.api.addr_validate(addr.as_ref())?)
        }
        _ => return Err(ContractError::InvalidStakingAsset {}),
    };

    if with_update {
        accrue_all(deps.storage, env.block.height)?;
    }

    let total_weight = TOTAL_WEIGHT.load(deps.storage)?;
    TOTAL_WEIGHT.save(deps.storage, &(total_weight + weight))?;

    let pool = PoolInfo {
        asset,
        weight,
        last_accrual_block: max(env.block.height, config.start_block),
        acc_reward_per_unit: Uint256::zero(),
        total_staked: Uint128::zero(),
        min_deposit,
        unstake_lock_blocks,
    };
    POOLS.save(deps.storage, pool_id, &pool)?;
    POOL_COUNT.save(deps.storage, &(pool_id + 1))?;

    Ok(Response::new()
        .add_attribute("action", "add_pool")
        .add_attribute("pool_id", pool_id.to_string())
        .add_attribute(
            "asset",
            match &pool.asset {
                Denom::Native(denom) => denom.clone(),
                Denom::Cw20(addr) => addr.to_string(),
            },
        )
        .add_attribute("weight", weight.to_string()))
}

pub fn execute_set_pool_weight(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    pool_id: u64,
    weight: u64,
    with_update: bool,
) -> Result<Response<Empty>, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    if weight == 0 {
        return Err(ContractError::InvalidWeight {});
    }
    // Probe before accruing so an unknown pool fails with the right
    // error.
    load_pool(deps.storage, pool_id)?;

    if with_update {
        accrue_all(deps.storage, env.block.height)?;
    }

    let mut pool = load_pool(deps.storage, pool_id)?;
    let total_weight = TOTAL_WEIGHT.load(deps.storage)?;
    TOTAL_WEIGHT.save(deps.storage, &(total_weight - pool.weight + weight))?;
    let old_weight = pool.weight;
    pool.weight = weight;
    POOLS.save(deps.storage, pool_id, &pool)?;

    Ok(Response::new()
        .add_attribute("action", "set_pool_weight")
        .add_attribute("pool_id", pool_id.to_string())
        .add_attribute("old_weight", old_weight.to_string())
        .add_attribute("weight", weight.to_string()))
}

pub fn execute_set_reward_per_block(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    reward_per_block: Uint128,
) -> Result<Response<Empty>, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    // Settle every pool under the old rate first so the change only
    // applies going forward.
    accrue_all(deps.storage, env.block.height)?;

    let mut config = CONFIG.load(deps.storage)?;
    let old = config.reward_per_block;
    config.reward_per_block = reward_per_block;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_reward_per_block")
        .add_attribute("old_reward_per_block", old)
        .add_attribute("reward_per_block", reward_per_block))
}

pub fn execute_set_reward_window(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    start_block: u64,
    end_block: u64,
) -> Result<Response<Empty>, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    if start_block >= end_block || end_block <= env.block.height {
        return Err(ContractError::InvalidRewardWindow {
            start: start_block,
            end: end_block,
        });
    }

    // Settle every pool under the old window first so the change only
    // applies going forward.
    accrue_all(deps.storage, env.block.height)?;

    let mut config = CONFIG.load(deps.storage)?;
    config.start_block = start_block;
    config.end_block = end_block;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_reward_window")
        .add_attribute("start_block", start_block.to_string())
        .add_attribute("end_block", end_block.to_string()))
}

pub fn execute_set_paused(
    deps: DepsMut,
    info: MessageInfo,
    withdraw: Option<bool>,
    claim: Option<bool>,
) -> Result<Response<Empty>, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    let mut pause = PAUSE.load(deps.storage)?;
    if let Some(withdraw) = withdraw {
        pause.withdraw_paused = withdraw;
    }
    if let Some(claim) = claim {
        pause.claim_paused = claim;
    }
    PAUSE.save(deps.storage, &pause)?;

    Ok(Response::new()
        .add_attribute("action", "set_paused")
        .add_attribute("withdraw_paused", pause.withdraw_paused.to_string())
        .add_attribute("claim_paused", pause.claim_paused.to_string()))
}

pub fn execute_update_owner(
    deps: DepsMut,
    info: MessageInfo,
    env: Env,
    action: cw_ownable::Action,
) -> Result<Response<Empty>, ContractError> {
    let ownership = cw_ownable::update_ownership(deps, &env.block, &info.sender, action)?;
    Ok(Response::default().add_attributes(ownership.into_attributes()))
}

fn load_pool(storage: &dyn Storage, pool_id: u64) -> Result<PoolInfo, ContractError> {
    POOLS
        .may_load(storage, pool_id)?
        .ok_or(ContractError::UnknownPool { pool_id })
}

/// Brings a pool's accumulator current and returns the reward emitted
/// to it since the last accrual (zero when already current). The
/// emission for any interval where nothing was staked is forfeited:
/// `last_accrual_block` still advances but the accumulator does not.
fn accrue_pool(
    storage: &mut dyn Storage,
    height: u64,
    pool_id: u64,
) -> Result<Uint128, ContractError> {
    let mut pool = load_pool(storage, pool_id)?;
    if height <= pool.last_accrual_block {
        return Ok(Uint128::zero());
    }
    let config = CONFIG.load(storage)?;
    let total_weight = TOTAL_WEIGHT.load(storage)?;
    let multiplier = math::reward_multiplier(&config, pool.last_accrual_block, height)?;
    let reward = math::pool_reward(multiplier, pool.weight, total_weight)?;
    if !pool.total_staked.is_zero() {
        let delta = math::accumulator_delta(reward, pool.total_staked)?;
        pool.acc_reward_per_unit = pool
            .acc_reward_per_unit
            .checked_add(delta)
            .map_err(StdError::overflow)?;
    }
    pool.last_accrual_block = height;
    POOLS.save(storage, pool_id, &pool)?;
    Ok(reward)
}

fn accrue_all(storage: &mut dyn Storage, height: u64) -> Result<(), ContractError> {
    let count = POOL_COUNT.load(storage)?;
    for pool_id in 0..count {
        accrue_pool(storage, height, pool_id)?;
    }
    Ok(())
}

/// Folds accumulator growth since the position's last checkpoint into
/// its pending reward. The owning pool must already be accrued to the
/// current block.
fn settle_position(pool: &PoolInfo, position: &mut Position) -> StdResult<()> {
    let settled = math::settled_amount(position.staked, pool.acc_reward_per_unit)?;
    let accrued = settled.checked_sub(position.reward_debt)?;
    position.pending_reward = position.pending_reward.checked_add(accrued)?;
    position.reward_debt = settled;
    Ok(())
}

/// Removes the run of unlocked entries at the head of the queue and
/// returns their sum. Later entries keep their order.
fn drain_unlocked(position: &mut Position, height: u64) -> StdResult<Uint128> {
    let unlocked = position
        .unstake_queue
        .iter()
        .take_while(|entry| entry.unlock_block <= height)
        .count();
    let mut released = Uint128::zero();
    for entry in position.unstake_queue.drain(..unlocked) {
        released = released.checked_add(entry.amount)?;
    }
    Ok(released)
}

pub fn get_transfer_msg(recipient: Addr, amount: Uint128, denom: Denom) -> StdResult<CosmosMsg> {
    match denom {
        Denom::Native(denom) => Ok(BankMsg::Send {
            to_address: recipient.into_string(),
            amount: vec![Coin { denom, amount }],
        }
        .into()),
        Denom::Cw20(addr) => {
            let cw20_msg = to_json_binary(&cw20::Cw20ExecuteMsg::Transfer {
                recipient: recipient.into_string(),
                amount,
            })?;
            Ok(WasmMsg::Execute {
                contract_addr: addr.into_string(),
                msg: cw20_msg,
                funds: vec![],
            }
            .into())
        }
    }
}

fn query_reward_balance(deps: Deps, env: &Env, denom: &Denom) -> StdResult<Uint128> {
    match denom {
        Denom::Native(denom) => Ok(deps
            .querier
            .query_balance(&env.contract.address, denom)?
            .amount),
        Denom::Cw20(addr) => {
            let resp: cw20::BalanceResponse = deps.querier.query_wasm_smart(
                addr,
                &cw20::Cw20QueryMsg::Balance {
                    address: env.contract.address.to_string(),
                },
            )?;
            Ok(resp.balance)
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::NumPools {} => to_json_binary(&query_num_pools(deps)?),
        QueryMsg::Pool { pool_id } => to_json_binary(&POOLS.load(deps.storage, pool_id)?),
        QueryMsg::PendingReward {
            pool_id,
            address,
            block,
        } => to_json_binary(&query_pending_reward(deps, env, pool_id, address, block)?),
        QueryMsg::StakedBalance { pool_id, address } => {
            to_json_binary(&query_staked_balance(deps, pool_id, address)?)
        }
        QueryMsg::WithdrawAmount { pool_id, address } => {
            to_json_binary(&query_withdraw_amount(deps, env, pool_id, address)?)
        }
        QueryMsg::RewardMultiplier { from, to } => {
            to_json_binary(&query_reward_multiplier(deps, from, to)?)
        }
        QueryMsg::Ownership {} => to_json_binary(&cw_ownable::get_ownership(deps.storage)?),
    }
}

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    let pause = PAUSE.load(deps.storage)?;
    Ok(ConfigResponse {
        config,
        total_weight: TOTAL_WEIGHT.load(deps.storage)?,
        withdraw_paused: pause.withdraw_paused,
        claim_paused: pause.claim_paused,
    })
}

pub fn query_num_pools(deps: Deps) -> StdResult<NumPoolsResponse> {
    Ok(NumPoolsResponse {
        count: POOL_COUNT.load(deps.storage)?,
    })
}

pub fn query_pending_reward(
    deps: Deps,
    env: Env,
    pool_id: u64,
    address: String,
    block: Option<u64>,
) -> StdResult<PendingRewardResponse> {
    let address = deps.api.addr_validate(&address)?;
    let pool = POOLS.load(deps.storage, pool_id)?;
    let position = POSITIONS
        .may_load(deps.storage, (pool_id, &address))?
        .unwrap_or_default();

    let block = block.unwrap_or(env.block.height);
    let acc_reward_per_unit = simulate_accrual(deps, &pool, block)?;
    let settled = math::settled_amount(position.staked, acc_reward_per_unit)?;
    let accrued = settled.checked_sub(position.reward_debt)?;
    let pending_reward = position.pending_reward.checked_add(accrued)?;

    Ok(PendingRewardResponse {
        address: address.into_string(),
        pool_id,
        pending_reward,
        block,
    })
}

/// The accumulator value a real accrual at `height` would produce,
/// without persisting it. Follows the same operation order as
/// `accrue_pool` so the two agree bit for bit.
fn simulate_accrual(deps: Deps, pool: &PoolInfo, height: u64) -> StdResult<Uint256> {
    if height <= pool.last_accrual_block || pool.total_staked.is_zero() {
        return Ok(pool.acc_reward_per_unit);
    }
    let config = CONFIG.load(deps.storage)?;
    let total_weight = TOTAL_WEIGHT.load(deps.storage)?;
    let multiplier = math::reward_multiplier(&config, pool.last_accrual_block, height)
        .map_err(|err| StdError::generic_err(err.to_string()))?;
    let reward = math::pool_reward(multiplier, pool.weight, total_weight)?;
    let delta = math::accumulator_delta(reward, pool.total_staked)?;
    Ok(pool.acc_reward_per_unit.checked_add(delta)?)
}

pub fn query_staked_balance(
    deps: Deps,
    pool_id: u64,
    address: String,
) -> StdResult<StakedBalanceResponse> {
    let address = deps.api.addr_validate(&address)?;
    let position = POSITIONS
        .may_load(deps.storage, (pool_id, &address))?
        .unwrap_or_default();
    Ok(StakedBalanceResponse {
        balance: position.staked,
    })
}

pub fn query_withdraw_amount(
    deps: Deps,
    env: Env,
    pool_id: u64,
    address: String,
) -> StdResult<WithdrawAmountResponse> {
    let address = deps.api.addr_validate(&address)?;
    let position = POSITIONS
        .may_load(deps.storage, (pool_id, &address))?
        .unwrap_or_default();
    let mut queued = Uint128::zero();
    let mut unlocked = Uint128::zero();
    for entry in &position.unstake_queue {
        queued = queued.checked_add(entry.amount)?;
        if entry.unlock_block <= env.block.height {
            unlocked = unlocked.checked_add(entry.amount)?;
        }
    }
    Ok(WithdrawAmountResponse { queued, unlocked })
}

pub fn query_reward_multiplier(
    deps: Deps,
    from: u64,
    to: u64,
) -> StdResult<RewardMultiplierResponse> {
    let config = CONFIG.load(deps.storage)?;
    let multiplier = math::reward_multiplier(&config, from, to)
        .map_err(|err| StdError::generic_err(err.to_string()))?;
    Ok(RewardMultiplierResponse { multiplier })
}
