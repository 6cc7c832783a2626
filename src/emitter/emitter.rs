use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use log::debug;

/// Two-region text accumulator for the generated program.
///
/// The parser only ever appends to it. Nothing is written to disk until
/// [`Emitter::write_file`] is called.
#[derive(Debug, Default)]
pub struct Emitter {
    /// Destination of [`Emitter::write_file`]; `None` for in-memory use
    path: Option<PathBuf>,
    header: String,
    code: String,
}

impl Emitter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Emitter {
            path: Some(path.as_ref().to_path_buf()),
            ..Default::default()
        }
    }

    pub fn in_memory() -> Self {
        Emitter::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Appends to the body without a line break.
    pub fn emit(&mut self, code: &str) {
        self.code.push_str(code);
    }

    pub fn emit_line(&mut self, code: &str) {
        self.code.push_str(code);
        self.code.push('\n');
    }

    pub fn header_line(&mut self, code: &str) {
        self.header.push_str(code);
        self.header.push('\n');
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn body(&self) -> &str {
        &self.code
    }

    /// Header followed by body.
    pub fn output(&self) -> String {
        format!("{}{}", self.header, self.code)
    }

    pub fn write_file(&self) -> io::Result<()> {
        let Some(path) = &self.path else {
            return Err(io::Error::new(
                ErrorKind::Other,
                "emitter has no output path",
            ));
        };

        fs::write(path, self.output())?;
        debug!(
            "wrote {} bytes to {}",
            self.header.len() + self.code.len(),
            path.display()
        );

        Ok(())
    }
}
