//! Извлечение нормализованной выписки из графа сообщения CAMT.053.

use crate::camt053::{Camt053Balance, Camt053Entry, Camt053Message};
use crate::error::{Error, Result};
use crate::types::{
    BalanceRecord, CreditDebit, EntryRecord, StatementRecord, BALANCE_TYPE_CLOSING,
    BALANCE_TYPE_OPENING,
};
use rust_decimal::Decimal;

/// Строит нормализованную выписку из графа сообщения.
///
/// Обрабатывается только первая выписка сообщения; остальные игнорируются.
/// Возвращает `Error::MissingField`, если отсутствует обязательное поле,
/// и `Error::MalformedAmount`, если сумма не является десятичным числом.
pub fn extract(message: &Camt053Message) -> Result<StatementRecord> {
    let message_id = required(&message.app_hdr.biz_msg_idr, "BizMsgIdr")?;
    let from_bic = required(&message.app_hdr.from_bic, "Fr/BICFI")?;
    let to_bic = required(&message.app_hdr.to_bic, "To/BICFI")?;

    let stmt = message
        .statements
        .first()
        .ok_or_else(|| Error::InvalidFormat("Сообщение не содержит выписок".to_string()))?;

    let statement_id = required(&stmt.id, "Stmt/Id")?;
    let currency = required(&stmt.currency, "Acct/Ccy")?;
    let account_id = required(&stmt.account_id, "Acct/Id/Othr/Id")?;

    let mut opening_balance = None;
    let mut closing_balance = None;

    // При дублировании типа баланса сохраняется последнее вхождение
    for balance in &stmt.balances {
        match balance.balance_type.as_str() {
            BALANCE_TYPE_OPENING => opening_balance = Some(extract_balance(balance)?),
            BALANCE_TYPE_CLOSING => closing_balance = Some(extract_balance(balance)?),
            other => {
                tracing::debug!("Пропущен баланс неподдерживаемого типа: {}", other);
            }
        }
    }

    let entries = stmt
        .entries
        .iter()
        .map(extract_entry)
        .collect::<Result<Vec<_>>>()?;

    Ok(StatementRecord {
        statement_id,
        sequence_number: stmt.sequence_number.clone(),
        page_number: stmt.page_number.clone(),
        is_last_page: stmt.last_page.unwrap_or(false),
        currency,
        account_id,
        from_bic,
        to_bic,
        message_id,
        opening_balance,
        closing_balance,
        entries,
    })
}

fn required(value: &Option<String>, field: &str) -> Result<String> {
    value
        .clone()
        .ok_or_else(|| Error::MissingField(field.to_string()))
}

fn extract_balance(balance: &Camt053Balance) -> Result<BalanceRecord> {
    Ok(BalanceRecord {
        amount: parse_decimal(&balance.amount)?,
        credit_debit: CreditDebit::from_code(&balance.credit_debit),
        date: balance.date.clone(),
    })
}

fn extract_entry(entry: &Camt053Entry) -> Result<EntryRecord> {
    let credit_debit = CreditDebit::from_code(&entry.credit_debit);

    // Индикатор уровня транзакции берется только из первых деталей;
    // при их отсутствии наследуется индикатор уровня записи
    let transaction_credit_debit = entry
        .details
        .first()
        .and_then(|details| details.credit_debit.as_deref())
        .map(CreditDebit::from_code)
        .unwrap_or(credit_debit);

    Ok(EntryRecord {
        amount: parse_decimal(&entry.amount)?,
        booking_date: entry.booking_date.clone(),
        status: entry.status.clone(),
        account_servicer_ref: entry.account_servicer_ref.clone(),
        credit_debit,
        transaction_credit_debit,
    })
}

fn parse_decimal(text: &str) -> Result<Decimal> {
    Decimal::from_str_exact(text.trim()).map_err(|_| Error::MalformedAmount(text.to_string()))
}
