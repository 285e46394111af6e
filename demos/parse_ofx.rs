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
        println!("Using example OFX data from demos/sample.ofx\n");
        "demos/sample.ofx"
    };

    // Upload-style input: raw bytes plus the original file name.
    let bytes = std::fs::read(file_path)?;
    let report = ParserBuilder::new()
        .bytes(&bytes)
        .filename(file_path)
        .parse()?;

    println!("{}", report.to_json()?);

    Ok(())
}
