use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use anyhow::{anyhow, Result};
use tempfile::tempdir;

fn run(ledger: &Path, command: &[&str]) -> Result<String> {
    let binary_path = env!("CARGO_BIN_EXE_ledger-assistant");

    let output = Command::new(binary_path)
        .arg("--ledger")
        .arg(ledger)
        .arg("--config")
        .arg(Path::new("samples").join("caps.toml"))
        .args(command)
        .output()?;

    stdout_of(output)
}

fn stdout_of(output: Output) -> Result<String> {
    if !output.status.success() {
        return Err(anyhow!("binary failed: {}", String::from_utf8_lossy(&output.stderr)));
    }

    Ok(String::from_utf8(output.stdout)?)
}

#[test]
fn test_cli_reports_sample_ledger_skipping_malformed_rows() -> Result<()> {
    let sample_path = Path::new("samples").join("ledger.csv");

    let stdout = run(&sample_path, &["report"])?;
    let mut lines = stdout.lines();

    assert_eq!(lines.next(), Some("Balance: 402800"));
    assert!(stdout.contains("Expense:\n  Supermercado: 100000\n  Luz: 30000\n  Farmacia: 12000\n  Total: 142000"));
    assert!(stdout.contains("Reimbursement:\n  Supermercado: 40000\n  Farmacia: 4800\n  Total: 44800"));

    Ok(())
}

#[test]
fn test_cli_expense_then_reimbursement_then_exhausted() -> Result<()> {
    let directory = tempdir()?;
    let ledger = directory.path().join("ledger.csv");

    let expense = run(&ledger, &["expense", "Supermercado:100000"])?;

    assert!(expense.contains("Expense recorded: Supermercado 100000."));
    assert!(expense.contains("Reimbursement credited: Supermercado 40000, 360000 left this month."));

    let partial = run(&ledger, &["/reintegro", "Supermercado:", "400000"])?;

    assert!(partial.contains("Supermercado 360000 of 400000 requested"));

    let exhausted = run(&ledger, &["reimbursement", "Supermercado:1"])?;

    assert!(exhausted.contains("already used up"));

    let invalid = run(&ledger, &["reimbursement", "Bebidas:1"])?;

    assert!(invalid.contains("Valid categories: Supermercado, Farmacia"));

    let report = run(&ledger, &["report", "reimbursements"])?;

    assert!(report.contains("Supermercado: 0 of 400000 left, spend up to 0"));
    assert!(report.contains("Farmacia: 150000 of 150000 left, spend up to 375000"));

    Ok(())
}

#[test]
fn test_cli_reads_commands_from_stdin() -> Result<()> {
    let directory = tempdir()?;
    let ledger = directory.path().join("ledger.csv");
    let binary_path = env!("CARGO_BIN_EXE_ledger-assistant");

    let mut child = Command::new(binary_path)
        .arg("--ledger")
        .arg(&ledger)
        .arg("--config")
        .arg(Path::new("samples").join("caps.toml"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    {
        let mut stdin = child.stdin.take().ok_or_else(|| anyhow!("stdin not captured"))?;
        writeln!(stdin, "income Sueldo:500000")?;
        writeln!(stdin)?;
        writeln!(stdin, "expense Luz:0")?;
        writeln!(stdin, "expense Luz:abc")?;
        writeln!(stdin, "report expenses")?;
    }

    let stdout = stdout_of(child.wait_with_output()?)?;

    assert!(stdout.contains("Income recorded: Sueldo 500000.\nBalance: 500000"));
    assert!(stdout.contains("Invalid amount for Expense [Luz]"));
    assert!(stdout.contains("Amount must be a whole number, got [abc]"));
    assert!(stdout.contains("Expenses:\n  Total: 0"));

    Ok(())
}
