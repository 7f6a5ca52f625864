//! Базовые типы данных для представления выписки и строк отчета.

use rust_decimal::Decimal;

// =============================================================================
// Константы для CAMT.053 формата
// =============================================================================

/// Тип баланса: начальный (Opening Booked).
pub const BALANCE_TYPE_OPENING: &str = "OPBD";
/// Тип баланса: конечный (Closing Booked).
pub const BALANCE_TYPE_CLOSING: &str = "CLBD";

/// Индикатор кредита (поступление).
pub const CREDIT_INDICATOR: &str = "CRDT";
/// Индикатор дебета (списание).
pub const DEBIT_INDICATOR: &str = "DBIT";

// =============================================================================
// Структуры данных
// =============================================================================

/// Дата в формате год-месяц-день.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Date {
    /// Год (например, 2025).
    pub year: u16,
    /// Месяц (1-12).
    pub month: u8,
    /// День месяца (1-31).
    pub day: u8,
}

impl Date {
    /// Создает новую дату.
    pub fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Индикатор кредит/дебет.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditDebit {
    /// Поступление (CRDT).
    Credit,
    /// Списание (DBIT).
    Debit,
}

impl CreditDebit {
    /// Создает индикатор из кода CAMT.053. Неизвестный код считается кредитом.
    pub fn from_code(code: &str) -> Self {
        if code.trim() == DEBIT_INDICATOR {
            CreditDebit::Debit
        } else {
            CreditDebit::Credit
        }
    }

    /// Возвращает код индикатора (CRDT или DBIT).
    pub fn as_code(&self) -> &'static str {
        match self {
            CreditDebit::Credit => CREDIT_INDICATOR,
            CreditDebit::Debit => DEBIT_INDICATOR,
        }
    }

    /// true, если индикатор обозначает поступление.
    pub fn is_credit(&self) -> bool {
        matches!(self, CreditDebit::Credit)
    }
}

/// Баланс счета (начальный или конечный).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceRecord {
    /// Сумма баланса (точное десятичное число).
    pub amount: Decimal,
    /// Индикатор кредит/дебет.
    pub credit_debit: CreditDebit,
    /// Дата баланса.
    pub date: Date,
}

/// Запись о транзакции (Ntry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    /// Сумма транзакции, всегда неотрицательная.
    pub amount: Decimal,
    /// Дата проводки.
    pub booking_date: Option<Date>,
    /// Статус записи (например, BOOK).
    pub status: Option<String>,
    /// Референс от банка (AcctSvcrRef).
    pub account_servicer_ref: Option<String>,
    /// Индикатор кредит/дебет на уровне записи.
    pub credit_debit: CreditDebit,
    /// Индикатор кредит/дебет на уровне деталей транзакции.
    pub transaction_credit_debit: CreditDebit,
}

impl EntryRecord {
    /// Сумма со знаком: отрицательная для дебета, положительная для кредита.
    ///
    /// Знак определяется только индикатором уровня записи.
    pub fn signed_amount(&self) -> Decimal {
        match self.credit_debit {
            CreditDebit::Debit => -self.amount,
            CreditDebit::Credit => self.amount,
        }
    }
}

/// Нормализованная банковская выписка (одна на сообщение).
#[derive(Debug, Clone)]
pub struct StatementRecord {
    /// Идентификатор выписки (Stmt/Id).
    pub statement_id: String,
    /// Электронный порядковый номер (ElctrncSeqNb).
    pub sequence_number: Option<String>,
    /// Номер страницы (StmtPgntn/PgNb).
    pub page_number: Option<String>,
    /// Признак последней страницы (StmtPgntn/LastPgInd).
    pub is_last_page: bool,
    /// Код валюты счета.
    pub currency: String,
    /// Идентификатор счета (Acct/Id/Othr/Id).
    pub account_id: String,
    /// BIC банка-отправителя (из заголовка AppHdr).
    pub from_bic: String,
    /// BIC банка-получателя (из заголовка AppHdr).
    pub to_bic: String,
    /// Бизнес-идентификатор сообщения (BizMsgIdr).
    pub message_id: String,
    /// Начальный баланс (OPBD), если присутствует.
    pub opening_balance: Option<BalanceRecord>,
    /// Конечный баланс (CLBD), если присутствует.
    pub closing_balance: Option<BalanceRecord>,
    /// Список транзакций в порядке исходного документа.
    pub entries: Vec<EntryRecord>,
}

impl StatementRecord {
    /// Чистое движение средств: конечный баланс минус начальный.
    ///
    /// Если один из балансов отсутствует, возвращает ноль.
    pub fn net_movement(&self) -> Decimal {
        match (&self.opening_balance, &self.closing_balance) {
            (Some(opening), Some(closing)) => closing.amount - opening.amount,
            _ => Decimal::ZERO,
        }
    }
}
