use std::fs::File;

use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode, WriteLogger};
use smartwatch3d::{app, config::create_clap_command, Config, WatchError};

fn init_logging(config: &Config) -> Result<(), WatchError> {
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(log::LevelFilter::Error)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        config.log_level,
        log_config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = &config.log_file {
        loggers.push(WriteLogger::new(config.log_level, log_config, File::create(path)?));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}

fn main() -> Result<(), WatchError> {
    let matches = create_clap_command().get_matches();
    let config = Config::from_matches(&matches);
    init_logging(&config)?;
    log::debug!("{config:?}");

    app::run(&config).inspect_err(|e| log::error!("{e}"))
}
