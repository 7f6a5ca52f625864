//! # CamtCSV Parser
//!
//! Библиотека для преобразования банковских выписок CAMT.053
//! (ISO 20022, BankToCustomerStatement, версия 001.08) в плоский
//! pipe-delimited CSV-отчет.
//!
//! ## Схема работы
//!
//! 1. **Парсер** (`camt053`) читает XML и строит типизированный граф сообщения.
//! 2. **Экстрактор** (`report::extract`) сводит граф к нормализованной
//!    выписке [`StatementRecord`] с парой балансов OPBD/CLBD и списком
//!    транзакций.
//! 3. **Writer** (`report::ReportWriter`) проецирует выписку в строки
//!    отчета: одна строка баланса и по одной строке на транзакцию.
//!
//! ## Пример использования
//!
//! ```rust,ignore
//! use camtcsv_parser::{extract, Camt053Message, ReportWriter};
//! use std::fs::File;
//!
//! let mut file = File::open("statement.xml")?;
//! let message = Camt053Message::from_read(&mut file)?;
//! let record = extract(&message)?;
//! let rows = ReportWriter::project(&record);
//! ```

pub mod camt053;
pub mod error;
pub mod report;
pub mod types;

pub use camt053::Camt053Message;
pub use error::{Error, Result};
pub use report::{extract, ReportWriter};
pub use types::*;

/// Преобразует текст документа CAMT.053 в строки отчета.
pub fn convert_to_report(content: &str) -> Result<Vec<String>> {
    let message = Camt053Message::parse(content)?;
    let record = extract(&message)?;
    Ok(ReportWriter::project(&record))
}
