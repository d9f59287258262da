// Stdio transport
// One JSON message per line in each direction

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

pub struct StdioTransport<R, W> {
    reader: R,
    writer: W,
}

impl StdioTransport<BufReader<Stdin>, Stdout> {
    /// Transport over the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdioTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Next non-blank line, or `None` at end of input
    pub fn read_message(&mut self) -> io::Result<Option<String>> {
        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let line = line.trim();
            if !line.is_empty() {
                return Ok(Some(line.to_string()));
            }
        }
    }

    /// Write one message and flush so the client sees it immediately
    pub fn write_message(&mut self, message: &str) -> io::Result<()> {
        self.writer.write_all(message.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_lines_and_skips_blanks() {
        let input = Cursor::new("{\"a\":1}\n\n  \r\n{\"b\":2}\r\n");
        let mut transport = StdioTransport::new(input, Vec::new());

        assert_eq!(transport.read_message().unwrap().as_deref(), Some("{\"a\":1}"));
        assert_eq!(transport.read_message().unwrap().as_deref(), Some("{\"b\":2}"));
        assert_eq!(transport.read_message().unwrap(), None);
    }

    #[test]
    fn test_writes_newline_delimited() {
        let mut transport = StdioTransport::new(Cursor::new(""), Vec::new());
        transport.write_message("{}").unwrap();
        transport.write_message("[]").unwrap();
        assert_eq!(transport.into_writer(), b"{}\n[]\n");
    }
}
