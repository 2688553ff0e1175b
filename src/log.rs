use log::LevelFilter;

pub fn setup_logging(level: u8) {
    fn set_log_level(local_level: LevelFilter, dep_level: LevelFilter) {
        let mut builder = env_logger::builder();
        builder
            .filter_level(dep_level)
            .filter_module(env!("CARGO_CRATE_NAME"), local_level);

        // Binary crates log under their own module name, not the lib's.
        let bin_name = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()));
        if let Some(bin_name) = bin_name {
            builder.filter_module(&bin_name.replace('-', "_"), local_level);
        }

        builder.init();
        log::debug!(
            "Logging filter level: {} ({} for dependencies)",
            local_level,
            dep_level
        );
    }

    match level {
        0 => set_log_level(LevelFilter::Warn, LevelFilter::Warn),
        1 => set_log_level(LevelFilter::Info, LevelFilter::Warn),
        2 => set_log_level(LevelFilter::Debug, LevelFilter::Warn),
        _ => set_log_level(LevelFilter::Trace, LevelFilter::Info),
    };
}
