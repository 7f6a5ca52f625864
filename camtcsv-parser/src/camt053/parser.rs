//! Парсер формата CAMT.053.001.08 (ISO 20022 XML).
//!
//! Строит типизированный граф сообщения без валидации по XSD-схеме.
//! Суммы сохраняются сырым текстом, их разбирает экстрактор отчета.

use crate::error::{Error, Result};
use crate::types::Date;
use std::io::Read;

/// Сообщение BankToCustomerStatement вместе с заголовком AppHdr.
#[derive(Debug, Clone)]
pub struct Camt053Message {
    /// Заголовок приложения (AppHdr).
    pub app_hdr: Camt053AppHdr,
    /// Список выписок (Stmt) в порядке документа.
    pub statements: Vec<Camt053Stmt>,
}

/// Заголовок AppHdr конверта CBPR+.
#[derive(Debug, Clone, Default)]
pub struct Camt053AppHdr {
    /// Бизнес-идентификатор сообщения (BizMsgIdr).
    pub biz_msg_idr: Option<String>,
    /// BIC банка-отправителя (Fr/FIId/FinInstnId/BICFI).
    pub from_bic: Option<String>,
    /// BIC банка-получателя (To/FIId/FinInstnId/BICFI).
    pub to_bic: Option<String>,
}

/// Выписка (Stmt) в формате CAMT.053.
#[derive(Debug, Clone)]
pub struct Camt053Stmt {
    /// Идентификатор выписки (Id).
    pub id: Option<String>,
    /// Электронный порядковый номер (ElctrncSeqNb).
    pub sequence_number: Option<String>,
    /// Номер страницы (StmtPgntn/PgNb).
    pub page_number: Option<String>,
    /// Признак последней страницы (StmtPgntn/LastPgInd).
    pub last_page: Option<bool>,
    /// Код валюты счета (Acct/Ccy).
    pub currency: Option<String>,
    /// Идентификатор счета (Acct/Id/Othr/Id).
    pub account_id: Option<String>,
    /// Список балансов (Bal).
    pub balances: Vec<Camt053Balance>,
    /// Список записей (Ntry).
    pub entries: Vec<Camt053Entry>,
}

/// Баланс (Bal) в формате CAMT.053.
#[derive(Debug, Clone)]
pub struct Camt053Balance {
    /// Код типа баланса (Tp/CdOrPrtry/Cd): OPBD, CLBD, CLAV и др.
    pub balance_type: String,
    /// Сырой текст суммы из элемента Amt.
    pub amount: String,
    /// Индикатор кредит/дебет (CdtDbtInd).
    pub credit_debit: String,
    /// Дата баланса.
    pub date: Date,
}

/// Запись (Ntry) в формате CAMT.053.
#[derive(Debug, Clone)]
pub struct Camt053Entry {
    /// Сырой текст суммы из элемента Amt.
    pub amount: String,
    /// Индикатор кредит/дебет на уровне записи (CdtDbtInd).
    pub credit_debit: String,
    /// Статус записи (Sts/Cd).
    pub status: Option<String>,
    /// Дата проводки (BookgDt).
    pub booking_date: Option<Date>,
    /// Референс от банка (AcctSvcrRef).
    pub account_servicer_ref: Option<String>,
    /// Детали транзакций (NtryDtls/TxDtls).
    pub details: Vec<Camt053TxDetails>,
}

/// Детали транзакции (TxDtls).
#[derive(Debug, Clone)]
pub struct Camt053TxDetails {
    /// Индикатор кредит/дебет на уровне деталей (CdtDbtInd).
    pub credit_debit: Option<String>,
}

impl Camt053Message {
    /// Парсит CAMT.053 из любого источника, реализующего трейт Read.
    pub fn from_read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::parse(&content)
    }

    /// Парсит CAMT.053 из строки.
    pub fn parse(content: &str) -> Result<Self> {
        let content = content.trim();

        if !content.contains("<BkToCstmrStmt>") {
            return Err(Error::InvalidFormat(
                "Не найден элемент BkToCstmrStmt".to_string(),
            ));
        }

        let app_hdr = Self::parse_app_hdr(content);
        let statements = Self::parse_statements(content)?;

        if statements.is_empty() {
            return Err(Error::InvalidFormat("Не найден элемент Stmt".to_string()));
        }

        Ok(Camt053Message {
            app_hdr,
            statements,
        })
    }

    fn extract_element_value(content: &str, tag: &str) -> Option<String> {
        let open_tag = format!("<{}>", tag);
        let close_tag = format!("</{}>", tag);

        let start = content.find(&open_tag)?;
        let value_start = start + open_tag.len();
        let end = content[value_start..].find(&close_tag)?;

        Some(content[value_start..value_start + end].trim().to_string())
    }

    /// Возвращает окно содержимого между открывающим и закрывающим тегами.
    /// Открывающий тег может нести атрибуты (например, AppHdr с xmlns).
    fn extract_section<'a>(content: &'a str, tag: &str) -> Option<&'a str> {
        let open_tag = format!("<{}", tag);
        let close_tag = format!("</{}>", tag);

        let start = content.find(&open_tag)?;
        let body_start = start + content[start..].find('>')? + 1;
        let end = content[body_start..].find(&close_tag)?;

        Some(&content[body_start..body_start + end])
    }

    fn parse_app_hdr(content: &str) -> Camt053AppHdr {
        let hdr_content = match Self::extract_section(content, "AppHdr") {
            Some(section) => section,
            None => return Camt053AppHdr::default(),
        };

        let biz_msg_idr = Self::extract_element_value(hdr_content, "BizMsgIdr");
        let from_bic = Self::extract_section(hdr_content, "Fr")
            .and_then(|fr| Self::extract_element_value(fr, "BICFI"));
        let to_bic = Self::extract_section(hdr_content, "To")
            .and_then(|to| Self::extract_element_value(to, "BICFI"));

        Camt053AppHdr {
            biz_msg_idr,
            from_bic,
            to_bic,
        }
    }

    fn parse_statements(content: &str) -> Result<Vec<Camt053Stmt>> {
        let mut statements = Vec::new();
        let mut pos = 0;

        while let Some(stmt_start) = content[pos..].find("<Stmt>") {
            let abs_start = pos + stmt_start;
            let stmt_end = content[abs_start..].find("</Stmt>").ok_or_else(|| {
                Error::InvalidFormat("Не найден закрывающий тег Stmt".to_string())
            })?;
            let stmt_content = &content[abs_start..abs_start + stmt_end + 7];

            statements.push(Self::parse_statement(stmt_content)?);

            pos = abs_start + stmt_end + 7;
        }

        Ok(statements)
    }

    fn parse_statement(content: &str) -> Result<Camt053Stmt> {
        // Stmt/Id ищем до блока Acct, чтобы при его отсутствии
        // не подхватить Acct/Id/Othr/Id
        let id_window = match content.find("<Acct") {
            Some(acct_start) => &content[..acct_start],
            None => content,
        };
        let id = Self::extract_element_value(id_window, "Id");
        let sequence_number = Self::extract_element_value(content, "ElctrncSeqNb");

        let (page_number, last_page) = match Self::extract_section(content, "StmtPgntn") {
            Some(pgntn) => {
                let page = Self::extract_element_value(pgntn, "PgNb");
                let last = Self::extract_element_value(pgntn, "LastPgInd")
                    .and_then(|v| match v.as_str() {
                        "true" | "1" => Some(true),
                        "false" | "0" => Some(false),
                        _ => None,
                    });
                (page, last)
            }
            None => (None, None),
        };

        let (currency, account_id) = match Self::extract_section(content, "Acct") {
            Some(acct) => {
                let currency = Self::extract_element_value(acct, "Ccy");
                let account_id = Self::extract_section(acct, "Othr")
                    .and_then(|othr| Self::extract_element_value(othr, "Id"));
                (currency, account_id)
            }
            None => (None, None),
        };

        let balances = Self::parse_balances(content)?;
        let entries = Self::parse_entries(content)?;

        Ok(Camt053Stmt {
            id,
            sequence_number,
            page_number,
            last_page,
            currency,
            account_id,
            balances,
            entries,
        })
    }

    fn parse_balances(content: &str) -> Result<Vec<Camt053Balance>> {
        let mut balances = Vec::new();
        let mut pos = 0;

        while let Some(bal_start) = content[pos..].find("<Bal>") {
            let abs_start = pos + bal_start;
            let bal_end = match content[abs_start..].find("</Bal>") {
                Some(end) => end,
                None => {
                    tracing::warn!("Не найден закрывающий тег Bal");
                    break;
                }
            };
            let bal_content = &content[abs_start..abs_start + bal_end + 6];

            match Self::parse_single_balance(bal_content) {
                Ok(balance) => balances.push(balance),
                Err(e) => {
                    tracing::warn!("Не удалось распарсить баланс: {}", e);
                }
            }

            pos = abs_start + bal_end + 6;
        }

        Ok(balances)
    }

    fn parse_single_balance(content: &str) -> Result<Camt053Balance> {
        let balance_type = Self::extract_element_value(content, "Cd").unwrap_or_default();
        let amount = Self::extract_amount_text(content)?;
        let credit_debit =
            Self::extract_element_value(content, "CdtDbtInd").unwrap_or_default();
        let date = Self::parse_date_element(content)?;

        Ok(Camt053Balance {
            balance_type,
            amount,
            credit_debit,
            date,
        })
    }

    /// Извлекает сырой текст суммы из элемента Amt (с атрибутом Ccy или без).
    fn extract_amount_text(content: &str) -> Result<String> {
        let start = content
            .find("<Amt")
            .ok_or_else(|| Error::MissingField("Не найден элемент Amt".to_string()))?;

        let tag_end = content[start..]
            .find('>')
            .ok_or_else(|| Error::Parse("Некорректный XML".to_string()))?;

        let value_start = start + tag_end + 1;
        let value_end = content[value_start..]
            .find("</Amt>")
            .ok_or_else(|| Error::Parse("Не найден закрывающий тег Amt".to_string()))?;

        Ok(content[value_start..value_start + value_end].trim().to_string())
    }

    fn parse_date_element(content: &str) -> Result<Date> {
        // Ищем самый внутренний <Dt> элемент, который содержит только дату
        let mut date_str = Self::extract_element_value(content, "Dt").ok_or_else(|| {
            Error::MissingField("Не найден элемент Dt".to_string())
        })?;

        // Если внутри есть вложенный <Dt>, извлекаем его рекурсивно
        while date_str.contains("<Dt>") {
            if let Some(inner) = Self::extract_element_value(&date_str, "Dt") {
                date_str = inner;
            } else {
                // Закрывающий тег остался за пределами окна, берем значение
                // после <Dt> до следующего тега или конца строки
                if let Some(start) = date_str.find("<Dt>") {
                    let value_start = start + 4;
                    if let Some(end) = date_str[value_start..].find('<') {
                        date_str = date_str[value_start..value_start + end].trim().to_string();
                    } else {
                        date_str = date_str[value_start..].trim().to_string();
                    }
                }
                break;
            }
        }

        Self::parse_iso_date(&date_str)
    }

    fn parse_iso_date(date_str: &str) -> Result<Date> {
        let date_str = date_str.trim();

        let parts: Vec<&str> = date_str.split('-').collect();
        if parts.len() != 3 {
            return Err(Error::Parse(format!(
                "Некорректный формат даты: {}",
                date_str
            )));
        }

        let year: u16 = parts[0]
            .parse()
            .map_err(|_| Error::Parse(format!("Некорректный год: {}", parts[0])))?;

        let month: u8 = parts[1]
            .parse()
            .map_err(|_| Error::Parse(format!("Некорректный месяц: {}", parts[1])))?;

        let day: u8 = parts[2]
            .parse()
            .map_err(|_| Error::Parse(format!("Некорректный день: {}", parts[2])))?;

        Ok(Date::new(year, month, day))
    }

    fn parse_entries(content: &str) -> Result<Vec<Camt053Entry>> {
        let mut entries = Vec::new();
        let mut pos = 0;

        while let Some(ntry_start) = content[pos..].find("<Ntry>") {
            let abs_start = pos + ntry_start;
            let ntry_end = match content[abs_start..].find("</Ntry>") {
                Some(end) => end,
                None => {
                    tracing::warn!("Не найден закрывающий тег Ntry");
                    break;
                }
            };
            let ntry_content = &content[abs_start..abs_start + ntry_end + 7];

            match Self::parse_single_entry(ntry_content) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!("Не удалось распарсить запись: {}", e);
                }
            }

            pos = abs_start + ntry_end + 7;
        }

        Ok(entries)
    }

    fn parse_single_entry(content: &str) -> Result<Camt053Entry> {
        let amount = Self::extract_amount_text(content)?;
        let credit_debit =
            Self::extract_element_value(content, "CdtDbtInd").unwrap_or_default();

        // Статус: в версии 001.08 это Sts/Cd, в ранних версиях просто текст Sts
        let status = Self::extract_section(content, "Sts").map(|sts| {
            Self::extract_element_value(sts, "Cd").unwrap_or_else(|| sts.trim().to_string())
        });

        let booking_date = Self::extract_section(content, "BookgDt")
            .and_then(|bookg| Self::parse_date_element(bookg).ok());

        let account_servicer_ref = Self::extract_element_value(content, "AcctSvcrRef");
        let details = Self::parse_tx_details(content);

        Ok(Camt053Entry {
            amount,
            credit_debit,
            status,
            booking_date,
            account_servicer_ref,
            details,
        })
    }

    fn parse_tx_details(content: &str) -> Vec<Camt053TxDetails> {
        let mut details = Vec::new();
        let mut pos = 0;

        while let Some(tx_start) = content[pos..].find("<TxDtls>") {
            let abs_start = pos + tx_start;
            let tx_end = match content[abs_start..].find("</TxDtls>") {
                Some(end) => end,
                None => break,
            };
            let tx_content = &content[abs_start..abs_start + tx_end + 9];

            details.push(Camt053TxDetails {
                credit_debit: Self::extract_element_value(tx_content, "CdtDbtInd"),
            });

            pos = abs_start + tx_end + 9;
        }

        details
    }
}
