pub mod interval;
pub mod symbol;

pub use interval::KlineInterval;
pub use symbol::Symbol;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid kline interval: {0}")]
    IntervalError(String),

    #[error("Invalid symbol: {0}")]
    SymbolError(String),
}
