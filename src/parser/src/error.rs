use thiserror::Error;
use crate::FileEntity;

#[derive(Error, Debug)]
pub enum ParserError{
    #[error("Invalid slice or value format for --{arg}. [{err}]")]
    ParseArg{arg: String, err: String},

    #[error("Neither --input, nor the stdin buffer are being sollicited.")]
    MissingInput,

    #[error("{0} {1} does not exist")]
    MissingFileEntity(FileEntity, String),

    #[error("{1} is not a {0}")]
    InvalidFileEntity(FileEntity, String),

    #[error("Failed to generate an output file prefix. Note that file prefixes are generated from the input filestem")]
    ParseOutputPrefix,

    #[error("Failed to serialize command line arguments")]
    SerializeArgs(#[source] serde_yaml::Error),

    #[error("Unable to write command line arguments into {0}")]
    WriteArgs(String, #[source] std::io::Error),

    #[error("Unable to deserialize arguments from {0}")]
    DeserializeArgs(String, #[source] serde_yaml::Error),

    #[error("{0} requests another 'from-yaml' replay. Only 'run' arguments may be replayed")]
    NestedFromYaml(String),

    #[error("Unable to open {0}")]
    OpenYaml(String, #[source] std::io::Error),
}
