use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128, Uint256};
use cw20::Denom;
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// Asset the reward emission is paid in.
    pub reward_token: Denom,
    /// Emission per block, split across pools by weight.
    pub reward_per_block: Uint128,
    /// First block of the emission window (inclusive).
    pub start_block: u64,
    /// End of the emission window (exclusive).
    pub end_block: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");

#[cw_serde]
pub struct PauseInfo {
    pub withdraw_paused: bool,
    pub claim_paused: bool,
}

impl Default for PauseInfo {
    fn default() -> Self {
        Self {
            withdraw_paused: false,
            claim_paused: false,
        }
    }
}

pub const PAUSE: Item<PauseInfo> = Item::new("pause_info");

// Initialized to zero during instantiate. We do this instead of using
// `unwrap_or_default` where these are read as it protects us against
// a scenario where state is cleared by a bad actor and
// `unwrap_or_default` carries on.
pub const TOTAL_WEIGHT: Item<u64> = Item::new("total_weight");

pub const POOL_COUNT: Item<u64> = Item::new("pool_count");

#[cw_serde]
pub struct PoolInfo {
    /// Staked asset. `Native` for pool 0, `Cw20` for every other pool.
    pub asset: Denom,
    /// This pool's share of the emission, relative to `TOTAL_WEIGHT`.
    pub weight: u64,
    /// Block the accumulator was last brought current at.
    pub last_accrual_block: u64,
    /// Cumulative reward per staked unit since pool creation, scaled
    /// by 1e18. Monotonically non-decreasing.
    pub acc_reward_per_unit: Uint256,
    /// Sum of all positions' staked amounts in this pool. Excludes
    /// amounts sitting in unstake queues.
    pub total_staked: Uint128,
    pub min_deposit: Uint128,
    /// Blocks an unstake request waits before it becomes withdrawable.
    pub unstake_lock_blocks: u64,
}

pub const POOLS: Map<u64, PoolInfo> = Map::new("pools");

#[cw_serde]
pub struct UnstakeEntry {
    pub amount: Uint128,
    pub unlock_block: u64,
}

#[cw_serde]
pub struct Position {
    /// Currently earning balance.
    pub staked: Uint128,
    /// Accumulator baseline at the last settlement, as a reward
    /// amount (`staked * acc_reward_per_unit / 1e18` at that point).
    pub reward_debt: Uint128,
    /// Settled but unclaimed reward.
    pub pending_reward: Uint128,
    /// FIFO by unlock block: appended at the tail, drained from the
    /// head. Unlock blocks are monotone because a pool's lock
    /// duration never changes for entries already queued.
    pub unstake_queue: Vec<UnstakeEntry>,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            staked: Uint128::zero(),
            reward_debt: Uint128::zero(),
            pending_reward: Uint128::zero(),
            unstake_queue: vec![],
        }
    }
}

/// The maximum number of unstake requests that may be outstanding on
/// one position.
pub const MAX_UNSTAKE_ENTRIES: usize = 100;

pub const POSITIONS: Map<(u64, &Addr), Position> = Map::new("positions");
