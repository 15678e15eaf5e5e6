pub mod pair;
pub mod position;
pub mod token;

// Re-export for easier access
pub use pair::{Pair, PairRecord};
pub use position::{Position, PositionRecord};
pub use token::TokenInfo;
