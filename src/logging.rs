use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Initialise logging. With `debug` set the default level is `debug` and
/// `RUST_LOG` may override it; otherwise the level is pinned to `info`.
/// When `log_file` is given, output goes to that file instead of stderr.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let file_writer = log_file.as_ref().and_then(|path| {
        let file_name = path.file_name()?.to_os_string();
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Some(tracing_appender::rolling::never(dir, file_name))
    });

    let _ = match file_writer {
        Some(writer) => builder.with_ansi(false).with_writer(writer).try_init(),
        None => builder.try_init(),
    };
}
