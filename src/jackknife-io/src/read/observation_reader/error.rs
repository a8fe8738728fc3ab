use thiserror::Error;

use super::OBSERVATION_READER_VALID_FILE_FORMATS;

fn common_help_msg() -> String {
    format!("Please provide '--input' with either one of the accepted file formats: {OBSERVATION_READER_VALID_FILE_FORMATS:?}, or specify '--format'")
}

#[derive(Error, Debug)]
pub enum ObservationReaderError {
    #[error("Cannot handle observation file format: {0}. {}", common_help_msg())]
    InvalidFileFormat(String),

    #[error("The provided observation file is missing a file extension. {}", common_help_msg())]
    MissingExtension,

    #[error("Failed to open file {0}")]
    OpenFile(String, #[source] std::io::Error),

    #[error("Failed to read line {line} of the observation file")]
    ReadLine{line: usize, #[source] source: std::io::Error},

    #[error("Line {line}: failed to parse '{value}' (column {column}) into a floating point value")]
    ParseValue{line: usize, column: usize, value: String},

    #[error("Line {line}: column {column} is missing")]
    MissingColumn{line: usize, column: usize},

    #[error("At least one column must be requested")]
    NoColumnRequested,
}
