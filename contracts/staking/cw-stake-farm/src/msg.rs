use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;
use cw20::{Cw20ReceiveMsg, Denom};

use crate::state::Config;

// so that consumers don't need a cw_ownable dependency to consume
// this contract's queries.
pub use cw_ownable::Ownership;

use cw_ownable::cw_ownable_execute;

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: Option<String>,
    pub reward_token: Denom,
    pub reward_per_block: Uint128,
    /// First block of the emission window (inclusive).
    pub start_block: u64,
    /// End of the emission window (exclusive). Must be in the future
    /// and after `start_block`.
    pub end_block: u64,
}

#[cw_ownable_execute]
#[cw_serde]
pub enum ExecuteMsg {
    /// cw20 entry point. Deposits into a token pool or funds the
    /// reward balance depending on the embedded `ReceiveMsg`.
    Receive(Cw20ReceiveMsg),
    /// Stakes the attached native funds into pool 0.
    DepositNative {},
    /// Moves `amount` out of the earning set and into the unstake
    /// queue, withdrawable `unstake_lock_blocks` from now. A zero
    /// amount only settles the position.
    Unstake { pool_id: u64, amount: Uint128 },
    /// Pays out every queue entry whose lock has elapsed.
    Withdraw { pool_id: u64 },
    /// Pays out the position's pending reward, capped at the reward
    /// balance the contract holds.
    Claim { pool_id: u64 },
    /// Tops up the contract's native reward balance.
    Fund {},
    /// Brings every pool's accumulator current. Permissionless.
    UpdatePools {},
    /// Adds a pool. The first pool must stake the native asset, every
    /// later one a cw20 token. Owner only.
    AddPool {
        asset: Denom,
        weight: u64,
        min_deposit: Uint128,
        unstake_lock_blocks: u64,
        /// Accrue all pools before the total weight changes.
        with_update: bool,
    },
    /// Owner only.
    SetPoolWeight {
        pool_id: u64,
        weight: u64,
        /// Accrue all pools before the total weight changes.
        with_update: bool,
    },
    /// Owner only. Settles every pool under the old rate first.
    SetRewardPerBlock { reward_per_block: Uint128 },
    /// Owner only. Settles every pool under the old window first.
    SetRewardWindow { start_block: u64, end_block: u64 },
    /// Owner only. `None` leaves a flag unchanged.
    SetPaused {
        withdraw: Option<bool>,
        claim: Option<bool>,
    },
}

#[cw_serde]
pub enum ReceiveMsg {
    Deposit { pool_id: u64 },
    Fund {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    #[returns(NumPoolsResponse)]
    NumPools {},
    #[returns(crate::state::PoolInfo)]
    Pool { pool_id: u64 },
    /// The reward the position would be owed after an accrual and
    /// settlement at `block` (current block if `None`).
    #[returns(PendingRewardResponse)]
    PendingReward {
        pool_id: u64,
        address: String,
        block: Option<u64>,
    },
    #[returns(StakedBalanceResponse)]
    StakedBalance { pool_id: u64, address: String },
    /// Queued and currently unlocked unstake totals.
    #[returns(WithdrawAmountResponse)]
    WithdrawAmount { pool_id: u64, address: String },
    /// Emission over an arbitrary block range, clamped to the reward
    /// window.
    #[returns(RewardMultiplierResponse)]
    RewardMultiplier { from: u64, to: u64 },
    #[returns(::cw_ownable::Ownership<::cosmwasm_std::Addr>)]
    Ownership {},
}

#[cw_serde]
pub struct ConfigResponse {
    pub config: Config,
    pub total_weight: u64,
    pub withdraw_paused: bool,
    pub claim_paused: bool,
}

#[cw_serde]
pub struct NumPoolsResponse {
    pub count: u64,
}

#[cw_serde]
pub struct PendingRewardResponse {
    pub address: String,
    pub pool_id: u64,
    pub pending_reward: Uint128,
    pub block: u64,
}

#[cw_serde]
pub struct StakedBalanceResponse {
    pub balance: Uint128,
}

#[cw_serde]
pub struct WithdrawAmountResponse {
    /// Everything sitting in the unstake queue.
    pub queued: Uint128,
    /// The part of `queued` whose lock has elapsed.
    pub unlocked: Uint128,
}

#[cw_serde]
pub struct RewardMultiplierResponse {
    pub multiplier: Uint128,
}
