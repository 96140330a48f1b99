use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum CommandError {
    #[error("Empty command. Send 'help' for the list of commands")]
    Empty,
    #[error("Unknown command [{command}]. Send 'help' for the list of commands")]
    Unknown {
        command: String
    },
    #[error("Wrong format. Use: {usage}")]
    BadFormat {
        usage: &'static str
    },
    #[error("Amount must be a whole number, got [{value}]")]
    InvalidAmount {
        value: String
    },
    #[error("Amount [{value}] is too large to record")]
    AmountOutOfRange {
        value: String
    },
    #[error("Unknown report [{kind}]. Use: report [expenses|reimbursements]")]
    UnknownReport {
        kind: String
    }
}
