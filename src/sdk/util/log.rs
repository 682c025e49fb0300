use env_logger::{Builder, Env};

/// `RUST_LOG` wins; otherwise `info`, or `debug` when `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .format_module_path(false)
        .init();
}
