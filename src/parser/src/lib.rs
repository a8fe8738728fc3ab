use std::{
    fs::File,
    io::IsTerminal,
    path::{Path, PathBuf},
    str::FromStr,
    ops::{Add, Range},
    fmt::{self, Display, Formatter}, ffi::OsStr
};

use located_error::prelude::*;

use clap::{Parser, Subcommand};
use serde::{Serialize, Deserialize};
use log::debug;
use num::One;

pub use statistics::Statistic;

mod error;
pub use error::ParserError;

/// Default prefix of output files, when observations are read from the standard input.
pub const DEFAULT_FILE_PREFIX: &str = "jackknife-output";

#[derive(Parser, Debug, Serialize, Deserialize)]
#[clap(name="jackknife-rs", author, version, about, long_about = None)]
#[clap(propagate_version = true)]
/// jackknife-rs: Jackknife resampling estimates of bias and variance
pub struct Cli {
    ///Set the verbosity level (-v -vv -vvv)
    ///
    /// Set the verbosity level of this program. Multiple levels allowed {n}
    ///
    /// -v: Info  |  -vv: Debug  | -vvv: Trace {n}
    ///
    /// Note that the program will still output warnings by default, even when this flag is off.
    /// Use The --quiet/-q to disable them
    #[clap(short='v', long, parse(from_occurrences), global=true)]
    pub verbose: u8,

    /// Disable warnings.
    ///
    /// By default, warnings are emmited and redirected to the console, even when verbose mode is off.
    /// Use this argument to disable this. Only errors will be displayed.
    #[clap(short='q', long, global=true)]
    pub quiet: bool,

    #[clap(subcommand)]
    pub commands: Commands,
}

impl Cli {
    /// Serialize command line arguments within a `.yaml` file.
    ///
    /// # Behavior
    /// - File naming follows the convention '{current time}-jackknife.yaml'. current time follows the format
    ///   `YYYY`-`MM`-`DD`T`hhmmss`
    /// - File is written at the root of the user-provided `--output-dir` folder.
    /// - `from-yaml` runs are not serialized again.
    ///
    /// # Errors
    /// - `SerializeArgs` if `serde_yaml` fails to parse `Self` to a string.
    /// - `WriteArgs` if the file cannot be written within `--output-dir`.
    pub fn serialize(&self) -> Result<Option<PathBuf>> {
        use ParserError::{SerializeArgs, WriteArgs};
        let loc_msg = "While serializing command line arguments";
        let Commands::Run{common, ..} = &self.commands else {
            return Ok(None)
        };

        let serialized = serde_yaml::to_string(&self).map_err(SerializeArgs).loc(loc_msg)?;
        debug!("\n---- Command line args ----\n{}\n---", serialized);

        let current_time = chrono::offset::Local::now().format("%Y-%m-%dT%H%M%S").to_string();
        let output_file  = common.output_dir.join(format!("{current_time}-jackknife.yaml"));
        std::fs::write(&output_file, serialized)
            .map_err(|e| WriteArgs(output_file.display().to_string(), e))
            .loc(loc_msg)?;
        Ok(Some(output_file))
    }

    /// Deserialize a `.yaml` file into Command line arguments.
    ///
    /// # Errors
    /// - `OpenYaml` if the provided `.yaml` is invalid, or does not carry read permissions
    /// - `DeserializeArgs` if `serde_yaml` fails to parse the provided file to `Self`.
    /// - `NestedFromYaml` if the file itself requests a `from-yaml` replay.
    pub fn deserialize(yaml: &Path) -> Result<Self> {
        use ParserError::{OpenYaml, DeserializeArgs, NestedFromYaml};
        let loc_msg = || format!("While deserializing command line arguments from {}", yaml.display());
        let file = File::open(yaml).map_err(|e| OpenYaml(yaml.display().to_string(), e)).with_loc(loc_msg)?;
        let cli: Self = serde_yaml::from_reader(file).map_err(|e| DeserializeArgs(yaml.display().to_string(), e)).with_loc(loc_msg)?;
        if let Commands::FromYaml{..} = cli.commands {
            return Err(NestedFromYaml(yaml.display().to_string())).with_loc(loc_msg)
        }
        Ok(cli)
    }
}

#[derive(Subcommand, Debug, Serialize, Deserialize)]
pub enum Commands {
    /// Compute jackknife estimates of bias and variance for one or more columns of observations.
    ///
    /// For each requested column, the selected estimator is applied on the full sample, and on every
    /// leave-one-out (or leave-one-block-out) subsample. Results are printed on the console, and written
    /// within '{output-dir}/{input-stem}.jackknife'
    Run {
        #[clap(flatten)]
        common: Common,
        #[clap(flatten)]
        resampling: Resampling,
    },

    /// Run jackknife-rs using a previously generated .yaml configuration file.
    ///
    /// This allows users to easily re-apply a jackknife-rs command using the exact same parameters
    /// and arguments.
    FromYaml {
        yaml: PathBuf,
    },
}

#[derive(Parser, Debug, Serialize, Deserialize)]
pub struct Common {
    /// Input observation file.
    ///
    /// Note that in the absence of an '--input' argument, the program may accept a data stream from the standard input,
    /// e.g. 'cat observations.txt | jackknife-rs run [...]'{n}
    ///
    /// Accepted file formats:{n}
    ///   '.csv' : comma-separated{n}
    ///   '.tsv' : tab-separated{n}
    ///   '.txt' : whitespace-separated{n}
    ///   '.dat' : whitespace-separated{n}
    #[clap(short, long, required(false), parse(try_from_os_str=valid_input_file))]
    pub input: Option<PathBuf>,

    /// Explicitly set the format of the input.
    ///
    /// By default, the format is inferred from the extension of '--input'. Standard input is considered
    /// whitespace-separated, unless specified otherwise.
    #[clap(short='F', long, required(false))]
    pub format: Option<String>,

    /// Use the first non-comment line of the input as column names.
    #[clap(short='H', long)]
    pub header: bool,

    /// Columns of the input to resample (0-based).
    ///
    /// Argument may accept slices (inclusive) such as '--columns 0-2' and/or discrete integers such as '--columns 0 4 7'.{n}
    /// Example:{n}
    ///   specifying          : '--columns 0-2 5 '{n}
    ///   ...will be parsed as: [0, 1, 2, 5]
    #[clap(short, long, multiple_values(true), default_value("0"))]
    pub columns: Vec<String>,

    /// Output directory where results will be written.
    ///
    /// Note that jackknife-rs will create the specified leaf directory if it is not present, but does not
    /// allow itself from creating parent directories.
    #[clap(short, long, default_value(DEFAULT_FILE_PREFIX), parse(try_from_os_str=valid_output_dir))]
    pub output_dir: PathBuf,

    /// Overwrite existing output files.
    ///
    /// By default, jackknife-rs does not allow itself from overwriting existing results files. Use this flag
    /// to force this behaviour.
    #[clap(short='w', long)]
    pub overwrite: bool,
}

#[derive(Parser, Debug, Serialize, Deserialize)]
pub struct Resampling {
    /// Statistic to estimate.
    ///
    /// Note that 'variance' is the plug-in estimator (divisor N), whose jackknife corrected estimate
    /// matches the unbiased 'sample-variance'.
    #[clap(short, long, arg_enum, default_value("mean"))]
    pub estimator: Statistic,

    /// Number of contiguous observations left out per jackknife replicate.
    ///
    /// A value of 1 performs the standard delete-one jackknife. Larger values perform a delete-m block
    /// jackknife, where the last block may be shorter than the others.
    #[clap(short, long, default_value("1"))]
    pub block_size: usize,

    /// Number of worker threads used to compute replicates.
    ///
    /// Note that results do not depend on the number of threads.
    #[clap(short='@', long, default_value("1"))]
    pub threads: usize,

    /// Write the estimate and pseudo-value of every replicate within '{output-dir}/{input-stem}-{column}.pseudo'
    #[clap(short, long)]
    pub print_pseudovalues: bool,
}

impl Common {
    /// Sanity Check: The program should leave if the user did not provide any input, either through
    /// `--input` or through stdinput. Without this, our program would wait indefinitely for the stdin buffer.
    ///
    /// # Errors
    /// - if the user did not provide an input file, neither from stdin, nor through the `--input` argument.
    pub fn check_input(&self) -> Result<(), ParserError> {
        if std::io::stdin().is_terminal() && self.input.is_none() {
            return Err(ParserError::MissingInput)
        }
        Ok(())
    }

    /// Get a generic filename prefix for our output files. If the user used `--input`, this will become its file stem.
    /// If the user used stdin, this will become a generic name -> "jackknife-output"
    ///
    /// # Errors
    /// - if a default file-prefix cannot be created from the input filestem.
    pub fn get_file_prefix(&self) -> Result<String> {
        let Some(input) = &self.input else {
            return Ok(DEFAULT_FILE_PREFIX.to_string())
        };
        input.file_stem()
            .and_then(OsStr::to_str)
            .map(ToString::to_string)
            .ok_or(ParserError::ParseOutputPrefix)
            .loc("While parsing command line arguments")
    }

    /// Parse the requested `--columns` into a sorted, deduplicated list of column indices.
    ///
    /// # Errors
    /// - `ParseArg` if any of the provided values is not a valid range or integer.
    pub fn parse_columns(&self) -> Result<Vec<usize>, ParserError> {
        parse_user_ranges(&self.columns, "columns")
    }
}

#[derive(Debug, Clone, Copy)]
pub enum FileEntity {File, Directory}

impl Display for FileEntity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::File      => write!(f, "File"),
            Self::Directory => write!(f, "Directory"),
        }
    }
}

impl FileEntity {
    fn validate(self, path: &Path) -> Result<(), ParserError> {
        use ParserError::InvalidFileEntity;
        let valid = match self {
            Self::File      => path.is_file(),
            Self::Directory => path.is_dir()
        };

        match valid {
            true  => Ok(()),
            false => Err(InvalidFileEntity(self, path.display().to_string())),
        }
    }
}

fn assert_filesystem_entity_is_valid(s: &OsStr, entity: FileEntity) -> Result<()> {
    use ParserError::MissingFileEntity;
    let path = Path::new(s);
    if ! path.exists() {
        return Err(MissingFileEntity(entity, path.display().to_string()))
            .loc("While parsing arguments.")
    }

    entity.validate(path).loc("While parsing arguments.")
}

fn valid_input_file(s: &OsStr) -> Result<PathBuf> {
    assert_filesystem_entity_is_valid(s, FileEntity::File)
        .loc("While checking for file validity")?;
    Ok(PathBuf::from(s))
}

fn valid_output_dir(s: &OsStr) -> Result<PathBuf> {
    if ! Path::new(s).exists() {
        std::fs::create_dir(s).with_loc(|| format!("While creating output directory {}", Path::new(s).display()))?;
    }
    assert_filesystem_entity_is_valid(s, FileEntity::Directory)
        .loc("While checking for directory validity")?;
    Ok(PathBuf::from(s))
}

/// Convert a user-defined string "range" into a vector of integers.
/// "9-14" thus becomes [9, 10, 11, 12, 13, 14]
/// Note that the range is fully inclusive.
fn parse_user_range<T>(s: &str) -> Result<Vec<T>, <T as FromStr>::Err>
where   T       : FromStr + Add<Output = T> + Ord + One,
        Range<T>: Iterator<Item = T>,
{
    match s.split_once('-') {
        Some((start, end)) => Ok((start.parse::<T>()?..end.parse::<T>()? + One::one()).collect::<Vec<T>>()),
        None               => Ok(vec![s.parse::<T>()?])
    }
}

/// Convert a vector of Strings with user-input ranges to a single, sorted vector of integers.
/// i.e. `["0-2", "5"]` for the user becomes `[0, 1, 2, 5]` for our program.
///
/// # Example
///```
/// use parser::parse_user_ranges;
/// let user_input = vec!["5".to_string(), "1-3".to_string(), "2".to_string()];
/// let parsed_input: Vec<usize> = parse_user_ranges(&user_input, "columns").unwrap();
/// assert_eq!(parsed_input, vec![1, 2, 3, 5])
///```
///
/// # Errors
///  returns a `ParseArg` error if the provided ranges cannot be parsed into integers.
pub fn parse_user_ranges<T>(ranges: &[String], arg: &str) -> Result<Vec<T>, ParserError>
where   T                   : FromStr + Add<Output = T> + Ord + One,
        Range<T>            : Iterator<Item = T>,
        <T as FromStr>::Err : ToString,
{
    let mut parsed_ranges = Vec::new();
    for range in ranges {
        let values = parse_user_range(range)
            .map_err(|err| ParserError::ParseArg{arg: arg.to_string(), err: err.to_string()})?;
        parsed_ranges.extend(values);
    }
    parsed_ranges.sort();
    parsed_ranges.dedup();
    Ok(parsed_ranges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_run(args: &[&str]) -> Result<(Common, Resampling)> {
        let cli = Cli::try_parse_from(args)?;
        match cli.commands {
            Commands::Run{common, resampling} => Ok((common, resampling)),
            Commands::FromYaml{..}            => bail!("Expected the 'run' subcommand"),
        }
    }

    #[test]
    fn user_ranges() -> Result<(), ParserError> {
        let input = ["0-2", "5", "1"].map(String::from);
        assert_eq!(parse_user_ranges::<usize>(&input, "columns")?, vec![0, 1, 2, 5]);
        Ok(())
    }

    #[test]
    fn invalid_user_ranges() {
        for input in [["a"], ["-1"], ["1-b"]] {
            let input = input.map(String::from);
            let result = parse_user_ranges::<usize>(&input, "columns");
            assert!(matches!(result, Err(ParserError::ParseArg{ref arg, ..}) if arg == "columns"));
        }
    }

    #[test]
    fn run_defaults() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let outdir = tmpdir.path().join("out");
        let outdir_str = outdir.to_str().unwrap();
        let (common, resampling) = parse_run(&["jackknife-rs", "run", "--output-dir", outdir_str])?;
        assert!(outdir.is_dir());
        assert_eq!(common.parse_columns()?, vec![0]);
        assert_eq!(common.get_file_prefix()?, DEFAULT_FILE_PREFIX);
        assert!(!common.header && !common.overwrite);
        assert_eq!(resampling.estimator, Statistic::Mean);
        assert_eq!(resampling.block_size, 1);
        assert_eq!(resampling.threads, 1);
        assert!(!resampling.print_pseudovalues);
        Ok(())
    }

    #[test]
    fn run_arguments() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let input  = tmpdir.path().join("heights.csv");
        std::fs::write(&input, "1.0\n")?;
        let (input_str, outdir_str) = (input.to_str().unwrap(), tmpdir.path().to_str().unwrap());

        let (common, resampling) = parse_run(&[
            "jackknife-rs", "run", "-vv", "--input", input_str, "--output-dir", outdir_str,
            "--columns", "2-3", "0", "--estimator", "sample-variance", "--block-size", "5", "--threads", "4", "-p"
        ])?;
        assert_eq!(common.get_file_prefix()?, "heights");
        assert_eq!(common.parse_columns()?, vec![0, 2, 3]);
        assert_eq!(resampling.estimator, Statistic::SampleVariance);
        assert_eq!(resampling.block_size, 5);
        assert_eq!(resampling.threads, 4);
        assert!(resampling.print_pseudovalues);
        Ok(())
    }

    #[test]
    fn missing_input_file() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let outdir_str = tmpdir.path().to_str().unwrap();
        let result = Cli::try_parse_from(["jackknife-rs", "run", "--output-dir", outdir_str, "--input", "./missing-observations.csv"]);
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn yaml_round_trip() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let outdir_str = tmpdir.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["jackknife-rs", "-v", "run", "--output-dir", outdir_str, "--estimator", "median"])?;
        let yaml = cli.serialize()?.expect("'run' arguments should get serialized");
        assert!(yaml.starts_with(tmpdir.path()));
        assert!(yaml.to_str().is_some_and(|s| s.ends_with("-jackknife.yaml")));

        let replayed = Cli::deserialize(&yaml)?;
        assert_eq!(replayed.verbose, 1);
        match replayed.commands {
            Commands::Run{common, resampling} => {
                assert_eq!(common.output_dir, tmpdir.path());
                assert_eq!(resampling.estimator, Statistic::Median);
            },
            Commands::FromYaml{..} => bail!("Expected the 'run' subcommand"),
        }
        Ok(())
    }

    #[test]
    fn from_yaml_is_not_serialized() -> Result<()> {
        let cli = Cli::try_parse_from(["jackknife-rs", "from-yaml", "args.yaml"])?;
        assert!(cli.serialize()?.is_none());
        Ok(())
    }

    #[test]
    fn deserialize_missing_file() {
        let result = Cli::deserialize(Path::new("./missing-args.yaml"));
        assert!(result.is_err_and(|e| matches!(e.downcast_ref::<ParserError>(), Some(ParserError::OpenYaml(..)))));
    }

    #[test]
    fn nested_from_yaml() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let yaml   = tmpdir.path().join("args.yaml");
        let cli = Cli::try_parse_from(["jackknife-rs", "from-yaml", yaml.to_str().unwrap()])?;
        serde_yaml::to_writer(File::create(&yaml)?, &cli)?;

        let result = Cli::deserialize(&yaml);
        assert!(result.is_err_and(|e| matches!(e.downcast_ref::<ParserError>(), Some(ParserError::NestedFromYaml(..)))));
        Ok(())
    }
}
