use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriterError {
    #[error("Failed to create output file '{0}'")]
    CreateFile(String, #[source] std::io::Error),

    #[error("Failed to write line {line} into the output")]
    WriteLine{line: usize, #[source] source: std::io::Error},

    #[error("Failed to flush the contents of the output buffer")]
    Flush(#[source] std::io::Error),
}
