use log::LevelFilter;

/// Console logging through a single fern dispatch.
pub fn setup(verbose: bool) -> Result<(), fern::InitError> {
    let workspace_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ));
        })
        .level(LevelFilter::Warn)
        .level_for("tickerscape", workspace_level)
        .level_for("tickerscape_data", workspace_level)
        .level_for("tickerscape_feed", workspace_level)
        .chain(std::io::stdout())
        .apply()?;

    Ok(())
}
