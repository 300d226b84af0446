//! Ledger errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("offer not found")]
    NotFound,

    #[error("stock cap cannot cover the requested quantity")]
    StockExceeded,

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
