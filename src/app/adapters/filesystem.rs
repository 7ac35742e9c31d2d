//! Filesystem access for catalog input
//!
//! Opens MPCORB catalogs as buffered line readers. Gzip-compressed files
//! (the MPC distributes `MPCORB.DAT.gz`) are detected by their magic bytes
//! and decompressed on the fly.

use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

use crate::constants::{GZIP_EXTENSION, GZIP_MAGIC};
use crate::{Error, Result};

/// Path that selects standard input instead of a file
pub const STDIN_PATH: &str = "-";

/// Open a catalog for line-by-line reading
///
/// `-` reads standard input. Compression is detected from content, not name.
pub fn open_catalog(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    if path.as_os_str() == STDIN_PATH {
        debug!("Reading catalog from standard input");
        return from_reader(io::stdin());
    }

    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let file = File::open(path)
        .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
    let (head, gzip) = sniff_gzip(file)?;

    let named_gz = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(GZIP_EXTENSION));
    if named_gz && !gzip {
        warn!(
            "{} has a .{} extension but no gzip header; reading as plain text",
            path.display(),
            GZIP_EXTENSION
        );
    }

    debug!("Opened {} (gzip: {})", path.display(), gzip);
    Ok(wrap(head, gzip))
}

/// Wrap any reader, transparently decompressing gzip content
pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Result<Box<dyn BufRead + Send>> {
    let (head, gzip) = sniff_gzip(reader)?;
    Ok(wrap(head, gzip))
}

type Sniffed<R> = io::Chain<io::Cursor<Vec<u8>>, R>;

fn wrap<R: Read + Send + 'static>(reader: Sniffed<R>, gzip: bool) -> Box<dyn BufRead + Send> {
    if gzip {
        Box::new(BufReader::new(MultiGzDecoder::new(reader)))
    } else {
        Box::new(BufReader::new(reader))
    }
}

/// Read up to the length of the gzip magic number and put it back in front
///
/// Pipes may deliver fewer bytes per read than the magic needs, so this
/// keeps reading until the magic length or end of input is reached.
fn sniff_gzip<R: Read>(mut reader: R) -> Result<(Sniffed<R>, bool)> {
    let mut head = Vec::with_capacity(GZIP_MAGIC.len());
    reader
        .by_ref()
        .take(GZIP_MAGIC.len() as u64)
        .read_to_end(&mut head)
        .map_err(|e| Error::io("Failed to read catalog header", e))?;

    let gzip = head.starts_with(&GZIP_MAGIC);
    Ok((io::Cursor::new(head).chain(reader), gzip))
}
