use csmm_domain::DomainError;
use csmm_domain::currency::Address;
use csmm_domain::pool::PoolId;
use csmm_ledger::LedgerError;
use thiserror::Error;

/// Errors raised by the hook components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("deposit amount must be positive")]
    ZeroDeposit,

    #[error("pool {pool} is not served by hook {hook:#x}")]
    PoolMismatch { pool: PoolId, hook: Address },
}
