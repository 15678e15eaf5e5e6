pub mod address;
pub mod amount;
pub mod percentage;
pub mod tick_range;

pub use address::Address;
pub use amount::{AmountPair, DepositAmounts, TokenAmount};
pub use percentage::{SlippageTolerance, WithdrawalPercent};
pub use tick_range::TickRange;
