use bank_statement_ingest::ParserBuilder;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    let file_path = if args.len() > 1 {
        &args[1]
    } else {
        println!("Using example CSV data from demos/sample.csv\n");
        "demos/sample.csv"
    };

    let report = ParserBuilder::new().filepath(file_path).parse()?;

    println!("Found {} transactions ({})\n", report.count, report.format);

    for (i, tx) in report.transactions.iter().take(10).enumerate() {
        println!("Transaction {}:", i + 1);
        println!("  Date: {}", tx.date);
        println!("  Amount: {}", tx.amount);
        println!("  Description: {}", tx.description);
        println!("  Type: {}", tx.kind.as_deref().unwrap_or("N/A"));
        println!();
    }

    if report.count > 10 {
        println!("... and {} more transactions", report.count - 10);
    }

    Ok(())
}
