use anyhow::Result;
use clap::Parser;
use console::style;
use log::info;
use media_arranger::cli::Cli;
use media_arranger::component::MediaArranger;
use media_arranger::config::Config;
use media_arranger::init;
use media_arranger::signal::setup_shutdown_signal;
use media_arranger::tools::{ExifToolScanner, validate_directory_exists};
use std::process;

fn main() {
    let cli = Cli::parse();
    init::init(cli.debug);

    // 來源與目的地必須是既有資料夾，否則在掃描前結束
    for path in [&cli.target_path, &cli.dest_path] {
        if let Err(e) = validate_directory_exists(path) {
            eprintln!("{} {}", style("錯誤:").red().bold(), e);
            process::exit(2);
        }
    }

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", style("錯誤:").red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::new();
    let options = cli.into_options(&config.settings);
    let shutdown_signal = setup_shutdown_signal()?;

    let scanner = ExifToolScanner::new(
        options.exiftool_path.clone(),
        Some(options.metadata_dump_file.clone()),
    );
    let version = scanner.version()?;
    info!("exiftool 版本: {version}");

    let arranger = MediaArranger::new(options, scanner, shutdown_signal);
    arranger.run()?;

    info!("Program exited normally");
    Ok(())
}
