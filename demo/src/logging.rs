use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

/// Destination for demo log output: stdout, teed into an append-only file when
/// `--log` is given.
pub(crate) struct LogTarget {
    pub(crate) writer: BoxMakeWriter,
    /// Color escapes are kept out of log files.
    pub(crate) ansi: bool,
}

/// Build the log destination, creating missing parent directories of `path`.
pub(crate) fn log_target(path: Option<&Path>) -> io::Result<LogTarget> {
    let Some(path) = path else {
        return Ok(LogTarget {
            writer: BoxMakeWriter::new(io::stdout),
            ansi: true,
        });
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(LogTarget {
        writer: BoxMakeWriter::new(io::stdout.and(Arc::new(file))),
        ansi: false,
    })
}
