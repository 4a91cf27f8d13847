use cosmwasm_std::{Addr, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    Ownable(#[from] cw_ownable::OwnershipError),

    #[error(transparent)]
    Payment(#[from] cw_utils::PaymentError),

    #[error("no pool with id {pool_id}")]
    UnknownPool { pool_id: u64 },

    #[error("pool 0 must stake the native asset and every later pool a cw20 token")]
    InvalidStakingAsset {},

    #[error("invalid token")]
    InvalidToken { received: Addr, expected: Addr },

    #[error("unstake lock duration can not be zero blocks")]
    InvalidLockBlocks {},

    #[error("pool weight can not be zero")]
    InvalidWeight {},

    #[error("deposit does not meet the pool minimum of {min_deposit}")]
    InvalidAmount { min_deposit: Uint128 },

    #[error("can not unstake more than has been staked")]
    InsufficientStake {},

    #[error("reward emission has already ended")]
    AlreadyEnded {},

    #[error("invalid block range [{from}, {to})")]
    InvalidRange { from: u64, to: u64 },

    #[error("invalid reward window [{start}, {end})")]
    InvalidRewardWindow { start: u64, end: u64 },

    #[error("withdrawals are paused")]
    WithdrawPaused {},

    #[error("claims are paused")]
    ClaimPaused {},

    #[error("invalid funds")]
    InvalidFunds {},

    #[error("too many outstanding unstake requests. Withdraw some before unstaking more.")]
    TooManyUnstakeEntries {},
}
