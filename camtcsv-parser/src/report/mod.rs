//! Модуль построения pipe-delimited отчета по выписке.

pub mod extractor;
pub mod writer;

pub use extractor::extract;
pub use writer::ReportWriter;
