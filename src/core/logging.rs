//! Logging initialization

/// Install the env_logger backend with millisecond timestamps.
///
/// The default filter is `info`; `RUST_LOG` overrides it. Returns false if a
/// logger was already installed, in which case the call has no effect.
///
/// # Example
/// ```
/// tussock::core::logging::init();
/// log::info!("Field started");
/// ```
pub fn init() -> bool {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .format_timestamp_millis()
    .try_init()
    .is_ok()
}
