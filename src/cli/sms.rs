//! CLI command turning a bank SMS into a record

use std::io::Read;

use clap::Args;
use serde_json::Value;

use crate::config::paths::SaldoPaths;
use crate::error::{SaldoError, SaldoResult};
use crate::services::{ParsedSms, SmsParser};
use crate::snapshot::{append_record, next_id};

/// Arguments for `saldo parse-sms`
#[derive(Args, Debug)]
pub struct ParseSmsArgs {
    /// Message text; read from stdin when omitted
    pub message: Option<String>,

    /// Number or name the message came from
    #[arg(long)]
    pub sender: Option<String>,

    /// Append the record to gastos.json (or receitas.json for transfers received)
    #[arg(long)]
    pub save: bool,
}

/// The record for `sms`, with the next id of the file it belongs in
fn record_json(paths: &SaldoPaths, sms: &ParsedSms) -> SaldoResult<Value> {
    let value = if sms.kind.is_income() {
        let id = next_id(paths.incomes_file())?;
        serde_json::to_value(sms.to_income(id))?
    } else {
        let id = next_id(paths.expenses_file())?;
        serde_json::to_value(sms.to_expense(id))?
    };
    Ok(value)
}

/// Handle the parse-sms command
pub fn handle_parse_sms_command(paths: &SaldoPaths, args: ParseSmsArgs) -> SaldoResult<()> {
    let message = match args.message {
        Some(message) => message,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let message = message.trim();

    let parser = SmsParser::new()?;
    let sms = parser
        .parse(args.sender.as_deref(), message)
        .ok_or_else(|| SaldoError::Validation("Unrecognized SMS format".into()))?;

    let record = record_json(paths, &sms)?;

    if args.save {
        paths.ensure_directories()?;
        let target = if sms.kind.is_income() {
            paths.incomes_file()
        } else {
            paths.expenses_file()
        };
        append_record(&target, &record)?;
        eprintln!("Record appended to: {}", target.display());
    }

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_record_id_follows_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SaldoPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.expenses_file(), r#"[{"id": 41, "valor": 1}]"#).unwrap();

        let parser = SmsParser::new().unwrap();
        let card = parser
            .parse(None, "Compra de R$ 9,99 em BANCA em 01/02/2025 as 07:45h")
            .unwrap();
        let record = record_json(&paths, &card).unwrap();
        assert_eq!(record["id"], 42);
        assert_eq!(record["valor"], 9.99);
        assert_eq!(record["dataHora"], "2025-02-01T07:45:00");

        let pix = parser
            .parse(None, "PIX recebido de ANA, CPF final 1. Valor R$ 3,00 em 01/02/2025 as 08:00h.")
            .unwrap();
        let record = record_json(&paths, &pix).unwrap();
        assert_eq!(record["id"], 1);
        assert_eq!(record["fonte"], "ANA");
    }
}
