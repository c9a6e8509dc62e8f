use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use log::{debug, trace};

use crate::{
    document::Document,
    error::{IniError, LineFault, ParseError, Result},
    line::{classify, Line},
};

/// State threaded through a single scan. Nothing survives past one parse.
#[derive(Debug, Default)]
struct Scan {
    doc: Document,
    current_section: Option<String>,
    section_count: usize,
    line_number: usize,
}

impl Scan {
    fn feed_bytes(&mut self, bytes: &[u8]) -> std::result::Result<(), ParseError> {
        match std::str::from_utf8(bytes) {
            Ok(line) => self.feed(line),
            Err(_) => {
                self.line_number += 1;
                let text = String::from_utf8_lossy(bytes);
                Err(self.fail(&text, LineFault::InvalidUtf8))
            }
        }
    }

    fn feed(&mut self, line: &str) -> std::result::Result<(), ParseError> {
        self.line_number += 1;
        let line = line.strip_suffix('\r').unwrap_or(line);

        let classified = match classify(line) {
            Ok(classified) => classified,
            Err(fault) => return Err(self.fail(line, fault)),
        };
        trace!("line {}: {:?}", self.line_number, classified);

        match classified {
            Line::Blank | Line::Comment => {}
            Line::Section(name) => {
                self.section_count += 1;
                self.doc.insert_section(name);
                self.current_section = Some(name.to_string());
            }
            Line::Parameter(key, value) => {
                let params = match self.current_section.as_deref() {
                    Some(section) => self.doc.section_mut(section),
                    None => None,
                };
                match params {
                    Some(params) => {
                        params.insert(key.to_string(), value.to_string());
                    }
                    None => return Err(self.fail(line, LineFault::ParameterOutsideSection)),
                }
            }
        }
        Ok(())
    }

    fn fail(&mut self, line: &str, fault: LineFault) -> ParseError {
        ParseError::new(
            self.line_number,
            line,
            fault,
            std::mem::take(&mut self.doc),
        )
    }

    fn finish(self) -> Document {
        debug!(
            "Parsed {} line(s), {} section header(s), {} distinct section(s)",
            self.line_number,
            self.section_count,
            self.doc.len()
        );
        self.doc
    }
}

impl Document {
    /// Reads and parses the INI file at `path`.
    ///
    /// I/O failures carry the path and never yield a document. Format failures are
    /// reported as [`IniError::Parse`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading INI file {}", path.display());

        let load_err = |source: io::Error| IniError::Load {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(load_err)?;

        match Self::from_reader(BufReader::new(file)) {
            Err(IniError::Read(source)) => Err(load_err(source)),
            other => other,
        }
    }

    /// Parses INI text from any buffered reader, one line at a time.
    ///
    /// Only failed reads are [`IniError::Read`]; a line that is not UTF-8 is a
    /// [`LineFault::InvalidUtf8`] parse error.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut scan = Scan::default();
        for line in reader.split(b'\n') {
            let line = line.map_err(IniError::Read)?;
            scan.feed_bytes(&line)?;
        }
        Ok(scan.finish())
    }
}

impl FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut scan = Scan::default();
        for line in s.lines() {
            scan.feed(line)?;
        }
        Ok(scan.finish())
    }
}
