pub mod delta;
pub mod liquidity;
pub mod swap;

pub use delta::{BalanceDelta, BeforeSwapDelta};
pub use liquidity::{LiquidityChange, ModifyLiquidityParams};
pub use swap::SwapParams;
