use bank_statement_ingest::errors::StatementParseError;
use bank_statement_ingest::{ParserBuilder, Transaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::env;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct LedgerEntry {
    date: NaiveDate,
    amount: Decimal,
    payee: String,
    category: String,
}

impl TryFrom<Transaction> for LedgerEntry {
    type Error = StatementParseError;

    fn try_from(txn: Transaction) -> Result<Self, Self::Error> {
        let category = match txn.kind.as_deref() {
            Some("DEBIT") => "Expense",
            Some("CREDIT") => "Income",
            _ if txn.amount.is_sign_negative() => "Expense",
            _ => "Income",
        };

        Ok(LedgerEntry {
            date: txn.date,
            amount: txn.amount.abs(),
            payee: txn.description,
            category: category.to_string(),
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    let file_path = if args.len() > 1 {
        &args[1]
    } else {
        println!("Using example OFX data from demos/sample.ofx\n");
        "demos/sample.ofx"
    };

    let entries: Vec<LedgerEntry> = ParserBuilder::new().filepath(file_path).parse_into()?;

    println!("Found {} ledger entries\n", entries.len());

    for (i, entry) in entries.iter().enumerate() {
        println!("Entry {}:", i + 1);
        println!("  Date: {}", entry.date);
        println!("  Amount: ${:.2}", entry.amount);
        println!("  Payee: {}", entry.payee);
        println!("  Category: {}", entry.category);
        println!();
    }

    Ok(())
}
