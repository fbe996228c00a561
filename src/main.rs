use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

mod cli;

use cli::get_args;
use swat_ingest::config::SwatConfig;
use swat_ingest::reader::ingest_output_hru;

fn main() -> Result<()> {
    let (output_file, db_path, config_path) = get_args();

    let config = SwatConfig::from_file(&config_path)?;

    let mut conn = rusqlite::Connection::open(&db_path)
        .with_context(|| format!("Failed to open database: {:?}", db_path))?;

    println!(
        "Ingesting {:?} ({:?} print mode, {})...",
        output_file,
        config.print_mode,
        if config.use_calendar_date_format {
            "calendar dates"
        } else {
            "julian days"
        }
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {pos} rows")?);

    let inserted = ingest_output_hru(&mut conn, &config, &output_file, &pb)?;
    pb.finish_and_clear();

    println!("Inserted {} records into OutputHru", inserted);
    Ok(())
}
