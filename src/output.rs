use crate::config::TextEncoding;
use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Create the output directory (and parents) if it doesn't exist yet.
pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        info!("Creating output directory: {}", dir.display());
    }
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
}

/// Write `lines` to `dir/file_name`, one per line with a trailing newline.
/// An existing file of the same name is truncated.
pub(crate) fn write_lines<I>(
    dir: &Path,
    file_name: &str,
    lines: I,
    encoding: TextEncoding,
) -> Result<usize>
where
    I: IntoIterator<Item = String>,
{
    let path = dir.join(file_name);
    let file = File::create(&path).map_err(|e| Error::io(&path, e))?;
    let mut writer = BufWriter::new(file);

    let mut count = 0;
    for line in lines {
        let bytes = encoding.encode(&line, file_name)?;
        writer
            .write_all(&bytes)
            .and_then(|_| writer.write_all(b"\n"))
            .map_err(|e| Error::io(&path, e))?;
        count += 1;
    }
    writer.flush().map_err(|e| Error::io(&path, e))?;

    debug!("Wrote {} lines to {}", count, path.display());
    Ok(count)
}
