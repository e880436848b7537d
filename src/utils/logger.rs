use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt};

pub struct LoggerUtils {}

impl LoggerUtils {
    /// `RUST_LOG` wins when set; otherwise `verbosity` picks info, debug or trace.
    pub fn init(verbosity: u8) {
        let default_level = match verbosity {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };

        fmt()
            .with_env_filter(
                EnvFilter::builder()
                    .with_default_directive(default_level.into())
                    .from_env_lossy(),
            )
            .with_target(false)
            .with_level(true)
            .compact()
            .init();
    }
}
