use clap::Parser;
use std::path::PathBuf;

/// Load a SWAT output.hru file into the check database
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the output.hru file written by swat.exe
    output_file: PathBuf,

    /// SQLite database holding the OutputHru table
    database: PathBuf,

    /// JSON file with the simulation run settings
    #[arg(short, long, default_value = "swat_run.json")]
    config: PathBuf,
}

pub fn get_args() -> (PathBuf, PathBuf, PathBuf) {
    let args = Args::parse();
    (args.output_file, args.database, args.config)
}
