mod observation_reader;
pub use observation_reader::{
    ObservationReader,
    ObservationReaderError,
    ObservationFormat,
    Observations,
    OBSERVATION_READER_VALID_FILE_FORMATS,
};
