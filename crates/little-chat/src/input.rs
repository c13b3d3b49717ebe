//! Line input for the terminal front-end.

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

/// Reads lines typed by the user.
///
/// One reader must be kept for the whole session: it buffers ahead, so
/// lines already piped in would be lost with a fresh reader per prompt.
pub struct LineReader<R> {
    lines: Lines<R>,
}

impl LineReader<BufReader<Stdin>> {
    /// Creates a reader over the standard input.
    #[inline]
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    /// Creates a reader over any buffered source.
    #[inline]
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Returns the next line without its line ending, or `None` at the end
    /// of input or on a read error.
    pub async fn next_line(&mut self) -> Option<String> {
        match self.lines.next_line().await {
            Ok(line) => line,
            Err(err) => {
                error!("error reading input: {err}");
                None
            }
        }
    }
}
