//! Проекция нормализованной выписки в строки pipe-delimited отчета.

use crate::error::Result;
use crate::types::{Date, EntryRecord, StatementRecord};
use rust_decimal::Decimal;
use std::io::Write;

const PIPE: &str = "|";
const EMPTY: &str = "";

/// Writer для pipe-delimited отчета.
pub struct ReportWriter;

impl ReportWriter {
    /// Проецирует выписку в строки отчета: одна строка баланса,
    /// затем по одной строке на каждую транзакцию в исходном порядке.
    pub fn project(record: &StatementRecord) -> Vec<String> {
        let mut rows = Vec::with_capacity(1 + record.entries.len());

        rows.push(Self::balance_row(record));

        for entry in &record.entries {
            rows.push(Self::entry_row(record, entry));
        }

        rows
    }

    /// Записывает отчет в любой приемник, реализующий трейт Write.
    pub fn write_to<W: Write>(record: &StatementRecord, writer: &mut W) -> Result<()> {
        for row in Self::project(record) {
            writeln!(writer, "{}", row)?;
        }

        Ok(())
    }

    /// Строка баланса (Bal|...).
    fn balance_row(record: &StatementRecord) -> String {
        let opening = record.opening_balance.as_ref();
        let closing = record.closing_balance.as_ref();

        RowBuilder::new()
            .add("Bal")                                            // Тип строки
            .add(record.statement_id.as_str())                     // Идентификатор выписки
            .add_opt(record.sequence_number.as_deref())            // Электронный порядковый номер
            .add_opt(record.page_number.as_deref())                // Номер страницы
            .add(EMPTY)                                            // Неизвестное поле
            .add(Self::format_date(closing.map(|b| &b.date)))      // Дата конечного баланса
            .add(record.currency.as_str())                         // Валюта
            .add(Self::format_amount(closing.map(|b| b.amount)))   // Конечный баланс (CLBD)
            .add(Self::format_amount(opening.map(|b| b.amount)))   // Начальный баланс (OPBD)
            .add(Self::format_amount(Some(record.net_movement()))) // Чистое движение
            .add(EMPTY)                                            // Неизвестное поле
            .add_opt(closing.map(|b| b.credit_debit.as_code()))    // Индикатор кредит/дебет (CLBD)
            .add(EMPTY)                                            // Неизвестное поле
            .add(EMPTY)                                            // Неизвестное поле
            .add(EMPTY)                                            // Неизвестное поле
            .add(EMPTY)                                            // Неизвестное поле
            .add(record.from_bic.as_str())                         // BIC отправителя
            .add(record.to_bic.as_str())                           // BIC получателя
            .add(record.account_id.as_str())                       // Идентификатор счета
            .add(Self::format_bool(record.is_last_page))           // Признак последней страницы
            .add(record.message_id.as_str())                       // Идентификатор сообщения
            .build()
    }

    /// Строка транзакции (Trx|...).
    fn entry_row(record: &StatementRecord, entry: &EntryRecord) -> String {
        RowBuilder::new()
            .add("Trx")                                            // Тип строки
            .add(record.message_id.as_str())                       // Идентификатор сообщения
            .add_opt(record.sequence_number.as_deref())            // Электронный порядковый номер
            .add_opt(record.page_number.as_deref())                // Номер страницы
            .add("X")                                              // Неизвестное поле ("X" в образце)
            .add(Self::format_date(entry.booking_date.as_ref()))   // Дата проводки
            .add(record.currency.as_str())                         // Валюта
            .add(Self::format_amount(Some(entry.amount)))          // Сумма
            .add_opt(entry.status.as_deref())                      // Статус (например, BOOK)
            .add(EMPTY)                                            // Неизвестное поле
            .add_opt(entry.account_servicer_ref.as_deref())        // Референс от банка
            .add(entry.credit_debit.as_code())                     // Индикатор уровня записи
            .add(Self::format_amount(Some(entry.signed_amount()))) // Сумма со знаком
            .add(entry.transaction_credit_debit.as_code())         // Индикатор уровня транзакции
            .add(EMPTY)                                            // Неизвестное поле
            .add(EMPTY)                                            // Неизвестное поле
            .add(record.from_bic.as_str())                         // BIC отправителя
            .add(record.to_bic.as_str())                           // BIC получателя
            .add(record.account_id.as_str())                       // Идентификатор счета
            .add(Self::format_bool(record.is_last_page))           // Признак последней страницы
            .add(record.statement_id.as_str())                     // Идентификатор выписки
            .build()
    }

    /// Форматирует сумму без хвостовых нулей и без десятичной точки
    /// в конце: 20.00 -> "20", 1.50 -> "1.5", -0.00 -> "0".
    fn format_amount(amount: Option<Decimal>) -> String {
        amount
            .map(|a| a.normalize().to_string())
            .unwrap_or_default()
    }

    /// Форматирует дату в виде YYYY-MM-DD; отсутствие даты дает пустую строку.
    fn format_date(date: Option<&Date>) -> String {
        date.map(|d| d.to_string()).unwrap_or_default()
    }

    fn format_bool(value: bool) -> String {
        value.to_string()
    }
}

/// Построитель одной строки отчета с разделителем `|`.
///
/// Экранирование не выполняется: разделитель внутри значения
/// поля испортит строку.
struct RowBuilder {
    fields: Vec<String>,
}

impl RowBuilder {
    fn new() -> Self {
        Self { fields: Vec::new() }
    }

    fn add(mut self, value: impl Into<String>) -> Self {
        self.fields.push(value.into());
        self
    }

    fn add_opt(self, value: Option<&str>) -> Self {
        self.add(value.unwrap_or(EMPTY))
    }

    fn build(self) -> String {
        self.fields.join(PIPE)
    }
}

impl StatementRecord {
    /// Записывает отчет по выписке в любой приемник, реализующий трейт Write.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        ReportWriter::write_to(self, writer)
    }
}
