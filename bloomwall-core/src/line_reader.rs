//! Framing and normalisation of `\n`-delimited input lines.
//!
//! Bytes accumulate in a growable buffer with a consume-from-front
//! pattern — no prepend is needed here, unlike the `roff`/`woff`
//! cursor buffer of the implementation this was distilled from, since
//! the detector never needs to push data back onto the front.

use crate::error::DetectError;

/// Maximum line length, excluding the `\n` delimiter. Exceeding this
/// is always fatal, matching the "malformed input is a bug, not a
/// runtime condition" stance of the rest of the crate.
pub const MAX_LINELEN: usize = 4096;

/// Accumulates bytes from an input stream and yields complete,
/// normalised lines as soon as they're fully buffered.
#[derive(Debug, Default)]
pub struct LineReader {
    buf: Vec<u8>,
}

impl LineReader {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Appends newly-read bytes to the internal buffer.
    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Pops and normalises the next complete line, if one is buffered.
    ///
    /// Call this in a loop after every `push`: multiple lines may
    /// already be available, and each call only returns one.
    pub fn next_line(&mut self) -> Result<Option<Vec<u8>>, DetectError> {
        let Some(nl) = self.buf.iter().position(|&b| b == b'\n') else {
            if self.buf.len() > MAX_LINELEN {
                return Err(DetectError::line_too_long(self.buf.len()));
            }
            return Ok(None);
        };

        if nl > MAX_LINELEN {
            return Err(DetectError::line_too_long(nl));
        }

        let raw: Vec<u8> = self.buf.drain(..=nl).collect();
        let line = &raw[..raw.len() - 1]; // drop the trailing '\n'
        normalise(line).map(Some)
    }
}

/// Splits `line` at the first run of space/tab into `id` and `rest`,
/// trims leading whitespace from `rest`, and rejoins them separated by
/// exactly one space. Fatal if either half is empty.
fn normalise(line: &[u8]) -> Result<Vec<u8>, DetectError> {
    let Some(split) = line.iter().position(|&b| b == b' ' || b == b'\t') else {
        return Err(DetectError::malformed_line());
    };

    let id = &line[..split];
    let mut rest = &line[split..];
    while matches!(rest.first(), Some(b' ') | Some(b'\t')) {
        rest = &rest[1..];
    }

    if id.is_empty() || rest.is_empty() {
        return Err(DetectError::malformed_line());
    }

    let mut out = Vec::with_capacity(id.len() + 1 + rest.len());
    out.extend_from_slice(id);
    out.push(b' ');
    out.extend_from_slice(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(reader: &mut LineReader, s: &str) -> Result<Option<String>, DetectError> {
        reader.push(s.as_bytes());
        reader
            .next_line()
            .map(|opt| opt.map(|v| String::from_utf8(v).unwrap()))
    }

    #[test]
    fn returns_none_until_newline_arrives() {
        let mut r = LineReader::new();
        assert_eq!(feed(&mut r, "host1 G").unwrap(), None);
        assert_eq!(feed(&mut r, "ET /\n").unwrap(), Some("host1 GET /".into()));
    }

    #[test]
    fn drains_multiple_buffered_lines_one_at_a_time() {
        let mut r = LineReader::new();
        r.push(b"a x\nb y\nc z\n");
        assert_eq!(r.next_line().unwrap(), Some(b"a x".to_vec()));
        assert_eq!(r.next_line().unwrap(), Some(b"b y".to_vec()));
        assert_eq!(r.next_line().unwrap(), Some(b"c z".to_vec()));
        assert_eq!(r.next_line().unwrap(), None);
    }

    #[test]
    fn tab_run_normalises_to_single_space() {
        // §8 scenario 4.
        let mut r = LineReader::new();
        assert_eq!(
            feed(&mut r, "host1\t\tGET /\n").unwrap(),
            Some("host1 GET /".into())
        );
    }

    #[test]
    fn normalising_an_already_normalised_line_is_idempotent() {
        let mut r = LineReader::new();
        let first = feed(&mut r, "a b c\n").unwrap().unwrap();
        assert_eq!(first, "a b c");

        let mut r2 = LineReader::new();
        let second = feed(&mut r2, &format!("{first}\n")).unwrap().unwrap();
        assert_eq!(second, first);
    }

    #[test]
    fn oversized_unterminated_line_is_fatal() {
        // §8 scenario 5.
        let mut r = LineReader::new();
        r.push(&vec![b'x'; MAX_LINELEN + 1]);
        assert!(r.next_line().is_err());
    }

    #[test]
    fn empty_line_is_malformed() {
        // §8 scenario 6.
        let mut r = LineReader::new();
        r.push(b"\n");
        assert!(r.next_line().is_err());
    }

    #[test]
    fn id_without_payload_is_malformed() {
        // §8 scenario 6.
        let mut r = LineReader::new();
        r.push(b"onlyid\n");
        assert!(r.next_line().is_err());
    }

    #[test]
    fn id_followed_by_only_whitespace_is_malformed() {
        let mut r = LineReader::new();
        r.push(b"host1\t\t\n");
        assert!(r.next_line().is_err());
    }
}
