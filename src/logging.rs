use log::LevelFilter;

/// Initializes the logger of the command line tool
///
/// Logs at `Debug` level if `debug_enabled` is true, `Info` otherwise. `RUST_LOG` overrides both when set.
pub fn init_logger(debug_enabled: bool)
{
    let level = if debug_enabled { LevelFilter::Debug } else { LevelFilter::Info };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(filters) = std::env::var("RUST_LOG")
    {
        builder.parse_filters(&filters);
    }

    // a logger may already be installed (tests, embedding applications)
    if builder.try_init().is_ok()
    {
        log::debug!("logger initialized at {level:?} level");
    }
}
