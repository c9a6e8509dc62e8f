use std::{
    fmt,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use log::debug;

use crate::{
    document::Document,
    error::{IniError, Result},
};

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (section_name, section) in self {
            // Names are lower-cased on write only; parsing preserves case.
            writeln!(f, "[{}]", section_name.to_lowercase())?;
            for (key, value) in section {
                writeln!(f, "{key}={value}")?;
            }
        }
        Ok(())
    }
}

impl Document {
    /// Writes the document as INI text: a `[name]` header per section followed by one
    /// `key=value` line per parameter. Values are not escaped.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "{self}").map_err(IniError::Write)?;
        writer.flush().map_err(IniError::Write)
    }

    /// Creates or truncates `path` and writes the document to it.
    ///
    /// A failed write is returned as is; whatever reached the file stays there.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let save_err = |source: io::Error| IniError::Save {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(save_err)?;
        match self.write_to(BufWriter::new(file)) {
            Err(IniError::Write(source)) => Err(save_err(source)),
            other => other,
        }?;

        debug!("Saved {} section(s) to {}", self.len(), path.display());
        Ok(())
    }
}
