use std::num::IntErrorKind;
use std::str::FromStr;

use crate::commands::CommandError;
use crate::config::CapTable;
use crate::models::TransactionType;
use crate::reports::ReportKind;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Command {
    /// `income|expense|reimbursement <category>:<amount>`
    Record {
        transaction_type: TransactionType,
        category: String,
        amount: i64
    },
    /// `report [expenses|reimbursements]`
    Report(ReportKind),
    Help
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        // Chat platforms send "/gasto@some_bot" in group chats.
        let word = word.trim_start_matches('/');
        let word = word.split('@').next().unwrap_or(word).to_lowercase();

        match word.as_str() {
            "" => Err(CommandError::Empty),
            "income" | "ingreso" => parse_record(TransactionType::Income, rest, "income <category>:<amount>"),
            "expense" | "gasto" => parse_record(TransactionType::Expense, rest, "expense <category>:<amount>"),
            "reimbursement" | "reintegro" => parse_record(TransactionType::Reimbursement, rest, "reimbursement <category>:<amount>"),
            "report" | "informe" => parse_report(rest),
            "help" | "ayuda" | "start" => Ok(Command::Help),
            _ => Err(CommandError::Unknown { command: word.clone() })
        }
    }
}

fn parse_record(transaction_type: TransactionType, argument: &str, usage: &'static str) -> Result<Command, CommandError> {
    let Some((category, amount)) = argument.split_once(':') else {
        return Err(CommandError::BadFormat { usage });
    };

    let category = category.trim();
    let amount = amount.trim();

    if category.is_empty() || amount.is_empty() {
        return Err(CommandError::BadFormat { usage });
    }

    let amount = amount.parse::<i64>()
        .map_err(|error| match error.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => CommandError::AmountOutOfRange { value: amount.to_string() },
            _ => CommandError::InvalidAmount { value: amount.to_string() }
        })?;

    Ok(Command::Record {
        transaction_type,
        category: category.to_string(),
        amount
    })
}

fn parse_report(argument: &str) -> Result<Command, CommandError> {
    match argument.trim().to_lowercase().as_str() {
        "" => Ok(Command::Report(ReportKind::General)),
        "expenses" | "gastos" => Ok(Command::Report(ReportKind::Expenses)),
        "reimbursements" | "reintegros" => Ok(Command::Report(ReportKind::Reimbursements)),
        _ => Err(CommandError::UnknownReport { kind: argument.trim().to_string() })
    }
}

/// Reply to `help`: the command list and the categories that can be reimbursed.
pub fn usage(caps: &CapTable) -> String {
    let categories = caps.names().collect::<Vec<_>>().join(", ");

    format!(
        "Commands:\n  \
         income <category>:<amount>\n  \
         expense <category>:<amount>\n  \
         reimbursement <category>:<amount>\n  \
         report [expenses|reimbursements]\n\
         Reimbursable categories: {categories}"
    )
}
