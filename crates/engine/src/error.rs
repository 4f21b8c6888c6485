use csmm_domain::DomainError;
use csmm_domain::currency::Address;
use csmm_domain::pool::PoolId;
use csmm_hook::{HookError, Rejection};
use csmm_ledger::LedgerError;
use thiserror::Error;

/// Errors returned by the pool manager.
///
/// Every error aborts its operation with no ledger or counter change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("pool {0} is not initialized")]
    PoolNotInitialized(PoolId),

    #[error("pool {0} is already initialized")]
    PoolAlreadyInitialized(PoolId),

    #[error("pool key names hook {expected:#x} but this engine serves {actual:#x}")]
    HookAddressMismatch { expected: Address, actual: Address },

    #[error("operation rejected by hook: {0}")]
    Rejected(Rejection),

    #[error("hook returned a swap delta without the before_swap_return_delta permission")]
    InvalidHookResponse,

    #[error("insufficient liquidity in pool {0}")]
    InsufficientLiquidity(PoolId),

    #[error("pool {0} has no generic liquidity curve")]
    GenericLiquidityUnsupported(PoolId),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Hook(#[from] HookError),
}
