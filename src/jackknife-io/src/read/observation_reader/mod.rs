use std::{collections::HashSet, fs::File, io::{self, BufRead, BufReader, Read}, path::Path, str::FromStr};

use located_error::prelude::*;
use log::{debug, info, warn};
use lazy_static::lazy_static;
use regex::Regex;

mod error;
pub use error::ObservationReaderError;

pub const OBSERVATION_READER_VALID_FILE_FORMATS: [&str; 4] = ["csv", "tsv", "txt", "dat"];

lazy_static! {
    /// Characters of a header field that cannot appear within a column name: whitespace, and path separators.
    static ref INVALID_NAME_CHARS: Regex = Regex::new(r"[\s/\\]+").expect("Invalid column name regex");
}

/// Column name derived from a header `field`. Whitespace and path separators are replaced with '_', so that
/// names remain a single field of tabulated outputs, and a valid filename component.
fn column_name(field: &str, column: usize) -> String {
    match field.is_empty() {
        true  => format!("column-{column}"),
        false => INVALID_NAME_CHARS.replace_all(field, "_").into_owned(),
    }
}

/// Ensure every column carries a distinct name, by appending the column index to any repeated name.
fn deduplicate_names(observations: &mut [Observations]) {
    let mut seen = HashSet::with_capacity(observations.len());
    for entry in observations {
        while !seen.insert(entry.name.clone()) {
            let renamed = format!("{}-{}", entry.name, entry.column);
            warn!("Column name '{}' is used more than once. Renaming column {} to '{renamed}'", entry.name, entry.column);
            entry.name = renamed;
        }
    }
}

/// Field separator of an observation file.
///
/// ## Accepted file formats:
///    EXT   NAME                 SEP
/// - .csv   comma separated      ","
/// - .tsv   tab separated        "\t"
/// - .txt   whitespace separated " " (any run of whitespace)
/// - .dat   whitespace separated " " (any run of whitespace)
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ObservationFormat {Csv, Tsv, Txt, Dat}

impl FromStr for ObservationFormat {
    type Err = ObservationReaderError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "txt" => Ok(Self::Txt),
            "dat" => Ok(Self::Dat),
            other => Err(Self::Err::InvalidFileFormat(other.to_string()))
        }
    }
}

impl ObservationFormat {
    /// Infer the format of an observation file from its extension.
    ///
    /// # Errors
    ///  - `MissingExtension` if `path` does not carry a file extension
    ///  - `InvalidFileFormat` if `path` carries an unsupported file extension.
    pub fn from_path(path: &Path) -> Result<Self, ObservationReaderError> {
        let ext = path.extension()
            .and_then(std::ffi::OsStr::to_str)
            .ok_or(ObservationReaderError::MissingExtension)?;
        Self::from_str(ext)
    }

    /// Split a line into trimmed fields.
    fn split<'l>(self, line: &'l str) -> Vec<&'l str> {
        match self {
            Self::Csv => line.split(',').map(str::trim).collect(),
            Self::Tsv => line.split('\t').map(str::trim).collect(),
            Self::Txt | Self::Dat => line.split_whitespace().collect(),
        }
    }
}

/// A single column of observations.
/// - `column`: 0-based index of the column within the input.
/// - `name`  : column name, taken from the header if any, or `column-{index}` otherwise. Unique among the
///   columns of a single read.
/// - `values`: observations, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Observations {
    pub column : usize,
    pub name   : String,
    pub values : Vec<f64>,
}

/// Generic reader for delimited observation files.
/// - source : `BufReader`, either over a file or stdin.
/// - format : the expected field separator.
/// - header : whether the first non-comment line holds column names.
///
/// Blank lines, and lines starting with `#` are skipped.
///
/// # Traits : `Read` and `BufRead`.
pub struct ObservationReader<'a> {
    source: Box<dyn BufRead + 'a>,
    format: ObservationFormat,
    header: bool,
}

impl Read for ObservationReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.source.read(buf)
    }
}

impl BufRead for ObservationReader<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.source.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.source.consume(amt);
    }
}

impl<'a> ObservationReader<'a> {
    /// Instantiate a new `ObservationReader`, targeting either a file or the standard input.
    ///
    /// When `format` is not provided, it is inferred from the extension of `path`. Stdin is read as a
    /// whitespace-separated stream by default.
    ///
    /// # Errors
    /// - if `path` targets an invalid location (`FileNotFound` or `PermissionDenied`)
    /// - if the format cannot be inferred, or is invalid.
    pub fn new(path: Option<&Path>, format: Option<&str>, header: bool) -> Result<ObservationReader<'a>> {
        use ObservationReaderError::OpenFile;
        let loc_msg = "While attempting to create a new ObservationReader";
        let format = match (format, path) {
            (Some(format), _)  => ObservationFormat::from_str(format).loc(loc_msg)?,
            (None, Some(path)) => ObservationFormat::from_path(path).loc(loc_msg)?,
            (None, None)       => ObservationFormat::Txt,
        };
        debug!("Observation format: {format:?}");

        let source: Box<dyn BufRead + 'a> = match path {
            Some(path) => {
                info!("Opening {}...", path.display());
                let file = File::open(path).map_err(|e| OpenFile(path.display().to_string(), e)).loc(loc_msg)?;
                Box::new(BufReader::new(file))
            },
            None => {
                info!("Reading observations from the standard input...");
                Box::new(BufReader::new(io::stdin()))
            },
        };
        Ok(Self{source, format, header})
    }

    /// Wrap any buffered source of observations.
    pub fn from_reader(source: impl BufRead + 'a, format: ObservationFormat, header: bool) -> Self {
        Self{source: Box::new(source), format, header}
    }

    /// Parse the requested `columns` into vectors of observations, in file order.
    ///
    /// # Errors
    /// - `NoColumnRequested` if `columns` is empty.
    /// - `ReadLine` if any line fails to get read.
    /// - `MissingColumn` if a line holds less fields than required.
    /// - `ParseValue` if any requested field cannot be parsed as a floating point value.
    pub fn read_columns(self, columns: &[usize]) -> Result<Vec<Observations>> {
        use ObservationReaderError::{NoColumnRequested, ReadLine, MissingColumn, ParseValue};
        let loc_msg = "While reading observations";
        if columns.is_empty() {
            return Err(NoColumnRequested).loc(loc_msg)
        }

        let mut observations: Vec<Observations> = columns.iter()
            .map(|&column| Observations{column, name: format!("column-{column}"), values: Vec::new()})
            .collect();

        let mut header_pending = self.header;
        for (i, line) in self.source.lines().enumerate() {
            let line_number = i + 1;
            let line = line.map_err(|source| ReadLine{line: line_number, source}).loc(loc_msg)?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue
            }

            let fields = self.format.split(line);
            for entry in &mut observations {
                let field = fields.get(entry.column)
                    .ok_or(MissingColumn{line: line_number, column: entry.column})
                    .loc(loc_msg)?;

                if header_pending {
                    entry.name = column_name(field, entry.column);
                    continue
                }

                let value = field.parse::<f64>()
                    .map_err(|_| ParseValue{line: line_number, column: entry.column, value: (*field).to_string()})
                    .loc(loc_msg)?;
                entry.values.push(value);
            }
            header_pending = false;
        }

        deduplicate_names(&mut observations);
        for entry in &observations {
            debug!("Column {} ('{}'): {} observations", entry.column, entry.name, entry.values.len());
        }
        Ok(observations)
    }
}
