use std::panic;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

pub const LOG_DIR_ENV: &str = "SM_LOG_DIR";
pub const LOG_BACKTRACE_ENV: &str = "SM_LOG_INCLUDE_BACKTRACE";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Where logs go and how panics are reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingOptions {
    /// Daily-rotated `<dir>/<app>.log` when set, stderr otherwise.
    pub log_dir: Option<PathBuf>,
    /// Also run the default panic hook (message plus backtrace on stderr).
    pub include_backtrace: bool,
}

impl LoggingOptions {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_dir = lookup(LOG_DIR_ENV)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);
        let include_backtrace = lookup(LOG_BACKTRACE_ENV)
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Self {
            log_dir,
            include_backtrace,
        }
    }
}

/// Routes panics through `tracing` with thread and location. Only the first
/// call installs the hook.
pub fn install_tracing_panic_hook(app_name: &'static str, options: &LoggingOptions) {
    static INSTALLED: OnceLock<()> = OnceLock::new();
    let include_backtrace = options.include_backtrace;

    INSTALLED.get_or_init(|| {
        let default_hook = panic::take_hook();

        panic::set_hook(Box::new(move |info| {
            let thread = std::thread::current();
            let thread_name = thread.name().unwrap_or("unknown");

            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()));
            let message = info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".into());

            tracing::error!(
                application = app_name,
                %thread_name,
                location = location.as_deref().unwrap_or("unknown"),
                panic_message = %message,
                "panic captured"
            );

            if include_backtrace {
                default_hook(info);
            }
        }));
    });
}

fn rotating_file_writer(app_name: &'static str, dir: &Path) -> Option<BoxMakeWriter> {
    if let Err(err) = std::fs::create_dir_all(dir) {
        eprintln!("failed to create {LOG_DIR_ENV} {}: {err}; logging to stderr", dir.display());
        return None;
    }

    let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    Some(BoxMakeWriter::new(non_blocking))
}

/// Installs the global subscriber. `RUST_LOG` filters, defaulting to `info`.
///
/// Console output goes to stderr so command output on stdout stays clean.
/// A second call is a no-op.
pub fn init_tracing_subscriber(app_name: &'static str, options: &LoggingOptions) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    let file_writer = options
        .log_dir
        .as_ref()
        .and_then(|dir| rotating_file_writer(app_name, dir));

    match file_writer {
        Some(writer) => {
            let _ = builder.with_ansi(false).with_writer(writer).try_init();
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }
}
