//! Tracing/logging setup shared by the availability binaries.

/// Initialize process-wide tracing in `format` with `info` as the default
/// filter (`RUST_LOG` overrides it).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format, "info");
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::LogFormat;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_accepts_either_format_repeatedly() {
        init(LogFormat::Json);
        init(LogFormat::Pretty);
        ::tracing::info!("logging after repeated init");
    }
}
