use std::{
    env,
    fs::{read_to_string, File},
    io::{BufWriter, Error, ErrorKind, Result, Write},
};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use jpsth::{
    analysis::JointPeriStimulusTimeHistogram,
    config::AnalysisConfig,
    error::JpsthError,
    source::{read_train, TextTimestampSource},
};


fn to_io_error(e: JpsthError) -> Error {
    match e {
        JpsthError::Io(e) => e,
        e => Error::new(ErrorKind::InvalidInput, e.to_string()),
    }
}

fn init_logging(log_level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::new(ErrorKind::Other, e.to_string()))
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Requires .toml argument file");
        return Err(Error::new(ErrorKind::InvalidInput, "Requires .toml argument file"));
    }

    let toml_content = read_to_string(&args[1])?;
    let config = AnalysisConfig::from_toml_str(&toml_content).map_err(to_io_error)?;

    init_logging(config.log_level)?;

    info!("tag: {}", config.tag);
    info!(
        "window: [{}, {}) by {} ({} bins, {})",
        config.window.x_min(), config.window.x_max(), config.window.bin_size(),
        config.window.bin_count(), config.window.boundary(),
    );
    info!("normalization: {}, strategy: {}, parallel: {}", config.normalization, config.strategy, config.parallel);

    let reference = read_train("reference", &TextTimestampSource::new(&config.reference))
        .map_err(to_io_error)?;
    let select = read_train("select", &TextTimestampSource::new(&config.select))
        .map_err(to_io_error)?;
    let bottom = read_train("bottom", &TextTimestampSource::new(&config.bottom))
        .map_err(to_io_error)?;

    let jpsth = JointPeriStimulusTimeHistogram::with_settings(
        &reference, &select, &bottom, &config.window, config.settings()
    ).map_err(to_io_error)?;
    let processed = jpsth.get_processed(config.normalization).map_err(to_io_error)?;

    if !processed.degenerate().is_empty() {
        warn!(
            "{} of {} cells are undefined (no variability across trials)",
            processed.degenerate().len(), processed.bin_count() * processed.bin_count(),
        );
    }

    let mut jpsth_file = BufWriter::new(File::create(format!("{}_jpsth.txt", config.tag))?);
    processed.write_to(&mut jpsth_file)?;
    jpsth_file.flush()?;

    let mut axis_file = BufWriter::new(File::create(format!("{}_axis.txt", config.tag))?);
    for edge in processed.axis().iter() {
        writeln!(axis_file, "{}", edge)?;
    }
    axis_file.flush()?;

    info!(
        "finished {}: {} trials, {} select spikes and {} bottom spikes counted, total {}",
        config.tag,
        jpsth.trials(),
        jpsth.select_psth().total(),
        jpsth.bottom_psth().total(),
        processed.defined_total(),
    );

    Ok(())
}
