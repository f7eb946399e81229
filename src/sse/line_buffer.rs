//! Incremental line splitting for event-stream bodies.
//!
//! Network chunks carry no alignment with lines, so bytes are held back until
//! a terminator (`\n`, `\r\n` or a lone `\r`) is observed. Buffering raw bytes
//! rather than decoded text keeps multi-byte UTF-8 sequences intact when a
//! chunk boundary falls inside one.

const BOM: char = '\u{feff}';

/// Accumulates bytes that have not yet formed a complete line.
#[derive(Debug)]
pub struct LineBuffer {
    pending: Vec<u8>,
    /// The previous chunk ended in `\r`; a leading `\n` belongs to it.
    skip_lf: bool,
    at_stream_start: bool,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            skip_lf: false,
            at_stream_start: true,
        }
    }

    /// Append a chunk and return every line it completed, terminators removed.
    ///
    /// A trailing partial line stays buffered for the next call.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        let mut rest = chunk;

        if self.skip_lf && !rest.is_empty() {
            self.skip_lf = false;
            if let Some(stripped) = rest.strip_prefix(b"\n") {
                rest = stripped;
            }
        }

        while let Some(pos) = rest.iter().position(|&b| b == b'\n' || b == b'\r') {
            self.pending.extend_from_slice(&rest[..pos]);
            lines.push(self.take_line());

            let terminator = rest[pos];
            rest = &rest[pos + 1..];
            if terminator == b'\r' {
                match rest.first() {
                    Some(b'\n') => rest = &rest[1..],
                    Some(_) => {}
                    None => self.skip_lf = true,
                }
            }
        }

        self.pending.extend_from_slice(rest);
        lines
    }

    /// Number of buffered bytes not yet terminated.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop any buffered partial line.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.skip_lf = false;
    }

    fn take_line(&mut self) -> String {
        let mut line = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();

        if self.at_stream_start {
            self.at_stream_start = false;
            if line.starts_with(BOM) {
                line.drain(..BOM.len_utf8());
            }
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_all(chunks: &[&[u8]]) -> Vec<String> {
        let mut buffer = LineBuffer::new();
        chunks.iter().flat_map(|c| buffer.push(c)).collect()
    }

    #[test]
    fn test_lf_lines() {
        assert_eq!(split_all(&[b"a\nb\n\n"]), vec!["a", "b", ""]);
    }

    #[test]
    fn test_partial_line_is_held_back() {
        let mut buffer = LineBuffer::new();
        assert!(buffer.push(b"data: hel").is_empty());
        assert_eq!(buffer.pending_len(), 9);
        assert_eq!(buffer.push(b"lo\n"), vec!["data: hello"]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_crlf_and_lone_cr() {
        assert_eq!(split_all(&[b"a\r\nb\rc\n"]), vec!["a", "b", "c"]);
        assert_eq!(split_all(&[b"a\r\r\n"]), vec!["a", ""]);
    }

    #[test]
    fn test_crlf_split_across_chunks() {
        assert_eq!(split_all(&[b"a\r", b"\nb\r\n"]), vec!["a", "b"]);
        assert_eq!(split_all(&[b"a\r", b"b\n"]), vec!["a", "b"]);
        assert_eq!(split_all(&[b"a\r", b"", b"\n"]), vec!["a"]);
    }

    #[test]
    fn test_utf8_split_across_chunks() {
        let text = "data: héllo ✓\n".as_bytes();
        // Split inside the three-byte check mark
        let cut = text.len() - 3;
        assert_eq!(split_all(&[&text[..cut], &text[cut..]]), vec!["data: héllo ✓"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        assert_eq!(split_all(&[b"a\xffb\n"]), vec!["a\u{fffd}b"]);
    }

    #[test]
    fn test_bom_only_stripped_at_stream_start() {
        let mut buffer = LineBuffer::new();
        assert_eq!(
            buffer.push("\u{feff}data: x\n\u{feff}y\n".as_bytes()),
            vec!["data: x", "\u{feff}y"]
        );
    }

    #[test]
    fn test_clear_drops_partial() {
        let mut buffer = LineBuffer::new();
        buffer.push(b"data: partial");
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.push(b"next\n"), vec!["next"]);
    }

    #[test]
    fn test_byte_at_a_time_matches_single_chunk() {
        let body = b"event: status\r\ndata: {\"a\":1}\r\n\r\n: ping\ndata: x\n\n";
        let whole = split_all(&[&body[..]]);
        let bytes: Vec<&[u8]> = body.chunks(1).collect();
        assert_eq!(split_all(&bytes), whole);
    }
}
