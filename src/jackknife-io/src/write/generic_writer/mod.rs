use std::{fs::File, fmt::Display, io::{Write, BufWriter}, path::Path};

use lazy_static::lazy_static;
use located_error::prelude::*;
use log::debug;
use regex::Regex;

mod error;
pub use error::WriterError;

/// Field separator of every file written by a `GenericWriter`.
pub const WRITER_SEPARATOR: &str = "\t";

lazy_static! {
    // Pretty-print separator of `Display` implementors: any run of spaces around a single dash.
    static ref PRETTY_SEPARATOR: Regex = Regex::new(r"[ ]+-[ ]+").expect("Invalid pretty-print separator regex");
}

/// Line-oriented writer, targeting either a file or the standard output.
/// - source: Boxed `BufWriter`.
/// - tabulate: whether pretty-print separators should be replaced with `WRITER_SEPARATOR`.
pub struct GenericWriter<'a> {
    source  : BufWriter<Box<dyn Write + 'a>>,
    tabulate: bool,
}

impl<'a> GenericWriter<'a> {
    /// Instantiate a new `GenericWriter`, targeting `path`, or stdout when `path` is `None`.
    ///
    /// Files are written in tab-separated form. Stdout keeps the pretty-printed form of each item.
    ///
    /// # Errors
    /// if `path` is an invalid location, or the user does not have the proper UNIX permissions
    /// to write at this location.
    pub fn new(path: Option<impl AsRef<Path>>) -> Result<GenericWriter<'a>> {
        use WriterError::CreateFile;
        match path {
            Some(path) => {
                let path = path.as_ref();
                debug!("Creating {}", path.display());
                let file = File::create(path)
                    .map_err(|e| CreateFile(path.display().to_string(), e))
                    .loc("While creating a new GenericWriter")?;
                Ok(Self::from_writer(file, true))
            },
            None => Ok(Self::from_writer(std::io::stdout(), false)),
        }
    }

    /// Wrap any writer.
    pub fn from_writer(writer: impl Write + 'a, tabulate: bool) -> Self {
        Self{source: BufWriter::new(Box::new(writer)), tabulate}
    }

    /// Write the contents of an iterator, one item per line, then flush the buffer.
    ///
    /// When tabulating, every match of `[ ]+-[ ]+` is replaced with `WRITER_SEPARATOR`, thereby
    /// removing the pretty-print padding of each item.
    ///
    /// # Errors
    /// - If any item fails to get written, or if the underlying buffer cannot be flushed.
    pub fn write_iter<T, I>(&mut self, iter: T) -> Result<()>
    where   T: IntoIterator<Item = I>,
            I: Display,
    {
        use WriterError::{WriteLine, Flush};
        let loc_msg = "While writing contents with a GenericWriter";
        for (i, item) in iter.into_iter().enumerate() {
            let line = format!("{item}");
            let line = match self.tabulate {
                true  => PRETTY_SEPARATOR.replace_all(line.trim_end(), WRITER_SEPARATOR),
                false => line.as_str().into(),
            };
            writeln!(self.source, "{line}").map_err(|source| WriteLine{line: i + 1, source}).loc(loc_msg)?;
        }
        self.source.flush().map_err(Flush).loc(loc_msg)
    }
}
