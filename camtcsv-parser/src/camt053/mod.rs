//! Модуль парсинга формата CAMT.053 (ISO 20022).

pub mod parser;

pub use parser::{
    Camt053AppHdr, Camt053Balance, Camt053Entry, Camt053Message, Camt053Stmt, Camt053TxDetails,
};
