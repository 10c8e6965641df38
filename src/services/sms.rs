//! Bank SMS ingestion
//!
//! Recognises the notification texts Brazilian banks send for card purchases
//! and incoming PIX transfers, and turns them into records. Patterns are tried
//! in order; the first one whose fields all read wins.

use chrono::NaiveDateTime;
use regex::{Captures, Regex};
use serde::Serialize;
use tracing::debug;

use crate::error::{SaldoError, SaldoResult};
use crate::models::{Expense, Income};

/// Layout of the date and time fields in every supported message
const SMS_DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Layout used when storing the parsed timestamp (backend `LocalDateTime`)
const RECORD_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// City names Bradesco appends to the merchant name
const CITY_SUFFIXES: [&str; 17] = [
    "SAO PAULO",
    "SP",
    "CAMPINAS",
    "RJ",
    "RIO DE JANEIRO",
    "MG",
    "MINAS GERAIS",
    "BH",
    "BELO HORIZONTE",
    "RS",
    "RIO GRANDE DO SUL",
    "CURITIBA",
    "PR",
    "OSASCO",
    "CARAPICUIBA",
    "SANTANA DE P",
    "BARUERI",
];

// "... EM 14/07/2025 14:19. VALOR DE R$ 205.05 FLEXPAG*ENELSP SAO PAULO."
const BRADESCO_CARD: &str =
    r"EM (\d{2}/\d{2}/\d{4}) (\d{2}:\d{2})\. VALOR DE R\$ ([\d.,]+)(?: EM \d+ X)? (.+)";

// "Compra de R$ 75,90 em MERCADO X em 20/07/2025 as 15:30h."
const SANTANDER_CARD: &str =
    r"Compra de R\$ ([\d.,]+) em (.+?) em (\d{2}/\d{2}/\d{4}) as (\d{2}:\d{2})h";

// "PIX recebido de FULANO, CPF final 123. Valor R$ 50,00 em 20/07/2025 as 11:00h."
const PIX_RECEIVED: &str = r"PIX recebido de (.+?), CPF final \w+\. Valor R\$ ([\d.,]+) em (\d{2}/\d{2}/\d{4}) as (\d{2}:\d{2})h";

/// Which notification a message was recognised as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SmsKind {
    BradescoCard,
    SantanderCard,
    PixReceived,
}

impl SmsKind {
    /// Category stored on the resulting record
    pub fn category(&self) -> &'static str {
        match self {
            Self::BradescoCard => "Cartão de Crédito - Bradesco",
            Self::SantanderCard => "Cartão de Crédito - Santander",
            Self::PixReceived => "PIX - Recebido",
        }
    }

    /// Money coming in rather than going out
    pub fn is_income(&self) -> bool {
        matches!(self, Self::PixReceived)
    }
}

/// The fields read out of one notification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSms {
    pub kind: SmsKind,
    pub amount: f64,
    pub timestamp: NaiveDateTime,
    /// Merchant for purchases, payer for transfers
    pub counterparty: String,
    pub sender: Option<String>,
    pub message: String,
}

impl ParsedSms {
    fn stamp(&self) -> String {
        self.timestamp.format(RECORD_DATETIME_FORMAT).to_string()
    }

    /// Expense record carrying the original message
    pub fn to_expense(&self, id: i64) -> Expense {
        let mut expense = Expense::new(id, self.amount, self.stamp(), Some(self.kind.category()))
            .with_establishment(self.counterparty.as_str());
        if let Some(sender) = &self.sender {
            expense = expense.with_description(format!("SMS de {}", sender));
        }
        expense.raw_source = Some(self.message.clone());
        expense
    }

    /// Income record carrying the original message
    pub fn to_income(&self, id: i64) -> Income {
        let mut income = Income::new(id, self.amount, self.stamp(), Some(self.kind.category()))
            .with_source(self.counterparty.as_str());
        if let Some(sender) = &self.sender {
            income.description = Some(format!("SMS de {}", sender));
        }
        income.raw_source = Some(self.message.clone());
        income
    }
}

/// Read a Brazilian currency amount
///
/// With a comma present the comma is the decimal mark and dots group
/// thousands ("1.234,56"). Without one, a single dot is the decimal mark
/// ("205.05") and several dots group thousands ("1.234.567").
pub fn parse_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim().trim_end_matches('.');
    let normalized = if raw.contains(',') {
        raw.replace('.', "").replace(',', ".")
    } else if raw.matches('.').count() > 1 {
        raw.replace('.', "")
    } else {
        raw.to_string()
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read the "dd/mm/yyyy" and "hh:mm" fields of a message
pub fn parse_sms_datetime(date: &str, time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&format!("{} {}", date, time), SMS_DATETIME_FORMAT).ok()
}

/// Drop a trailing period and one known city name from a merchant name
pub fn trim_city_suffix(raw: &str) -> String {
    let name = raw.trim();
    let name = name.strip_suffix('.').unwrap_or(name);
    let upper = name.to_ascii_uppercase();

    for city in CITY_SUFFIXES {
        let suffix = format!(" {}", city);
        if upper.ends_with(&suffix) {
            return name[..name.len() - suffix.len()].trim().to_string();
        }
    }

    name.to_string()
}

/// Compiled notification patterns
pub struct SmsParser {
    bradesco_card: Regex,
    santander_card: Regex,
    pix_received: Regex,
}

impl SmsParser {
    pub fn new() -> SaldoResult<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| SaldoError::Config(format!("Invalid SMS pattern: {}", e)))
        };

        Ok(Self {
            bradesco_card: compile(BRADESCO_CARD)?,
            santander_card: compile(SANTANDER_CARD)?,
            pix_received: compile(PIX_RECEIVED)?,
        })
    }

    /// Recognise `message`, or `None` when no pattern reads it
    pub fn parse(&self, sender: Option<&str>, message: &str) -> Option<ParsedSms> {
        let attempts: [(SmsKind, &Regex); 3] = [
            (SmsKind::BradescoCard, &self.bradesco_card),
            (SmsKind::SantanderCard, &self.santander_card),
            (SmsKind::PixReceived, &self.pix_received),
        ];

        attempts.into_iter().find_map(|(kind, pattern)| {
            let caps = pattern.captures(message)?;
            let parsed = extract(kind, &caps);
            if parsed.is_none() {
                debug!(?kind, "message matched but its fields could not be read");
            }
            parsed.map(|(amount, timestamp, counterparty)| ParsedSms {
                kind,
                amount,
                timestamp,
                counterparty,
                sender: sender.map(str::to_string),
                message: message.to_string(),
            })
        })
    }
}

fn extract(kind: SmsKind, caps: &Captures<'_>) -> Option<(f64, NaiveDateTime, String)> {
    let group = |i: usize| caps.get(i).map(|m| m.as_str());

    match kind {
        SmsKind::BradescoCard => Some((
            parse_amount(group(3)?)?,
            parse_sms_datetime(group(1)?, group(2)?)?,
            trim_city_suffix(group(4)?),
        )),
        SmsKind::SantanderCard => Some((
            parse_amount(group(1)?)?,
            parse_sms_datetime(group(3)?, group(4)?)?,
            group(2)?.trim().to_string(),
        )),
        SmsKind::PixReceived => Some((
            parse_amount(group(2)?)?,
            parse_sms_datetime(group(3)?, group(4)?)?,
            group(1)?.trim().to_string(),
        )),
    }
}
