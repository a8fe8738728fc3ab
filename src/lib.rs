extern crate parser;
extern crate logger;

use std::{iter, path::{Path, PathBuf}};

use parser::{Cli, Commands::{Run, FromYaml}, Common, Resampling};
use jackknife::{JackknifeBlocks, JackknifeEstimates, JackknifeError, Replicate};
use jackknife_io::{
    read::{ObservationReader, Observations},
    write::GenericWriter,
    parse::get_output_file,
};
use located_error::prelude::*;

#[macro_use]
extern crate log;

mod report;
pub use report::ColumnReport;

/// Output files of a single run.
/// - `results`: `{output-dir}/{prefix}.jackknife`
/// - `pseudo` : `{output-dir}/{prefix}-{column}.pseudo`, one per column. Empty unless `--print-pseudovalues`
struct OutputFiles {
    results: PathBuf,
    pseudo : Vec<PathBuf>,
}

impl OutputFiles {
    fn new(common: &Common, print_pseudovalues: bool, observations: &[Observations]) -> Result<Self> {
        let prefix = common.get_file_prefix()?;
        let dir    = &common.output_dir;
        let results = get_output_file(dir, &prefix, None, "jackknife", common.overwrite)?;
        let pseudo  = match print_pseudovalues {
            true  => observations.iter()
                .map(|column| get_output_file(dir, &prefix, Some(&column.name), "pseudo", common.overwrite))
                .collect::<Result<Vec<PathBuf>>>()?,
            false => Vec::new(),
        };
        Ok(Self{results, pseudo})
    }
}

/// Jackknife a single column of observations, using either the delete-one, or the delete-m block jackknife.
fn resample(column: &Observations, resampling: &Resampling, parallel: bool) -> Result<ColumnReport, JackknifeError> {
    let estimator = &resampling.estimator;
    let (summary, replicates) = match resampling.block_size {
        1 => {
            let estimates = match parallel {
                true  => JackknifeEstimates::par_compute(&column.values, estimator)?,
                false => JackknifeEstimates::compute(&column.values, estimator)?,
            };
            (estimates.summary()?, estimates.replicates())
        },
        block_size => {
            let blocks = JackknifeBlocks::new(column.values.len(), block_size)?;
            trace!("Jackknife blocks of column '{}':\n{blocks}", column.name);
            let estimates = blocks.compute(&column.values, estimator)?;
            (estimates.summary(), estimates.replicates())
        },
    };
    Ok(ColumnReport{name: column.name.clone(), summary, replicates})
}

fn write_results(reports: &[ColumnReport], output_files: &OutputFiles) -> Result<()> {
    let lines = iter::once(ColumnReport::header())
        .chain(reports.iter().map(ToString::to_string))
        .collect::<Vec<String>>();

    GenericWriter::new(None::<&Path>)?.write_iter(&lines)?;
    info!("Writing jackknife results within {}", output_files.results.display());
    GenericWriter::new(Some(&output_files.results))?.write_iter(&lines)?;

    for (report, file) in reports.iter().zip(&output_files.pseudo) {
        info!("Writing replicates of column '{}' within {}", report.name, file.display());
        let lines = iter::once(Replicate::header()).chain(report.replicates.iter().map(ToString::to_string));
        GenericWriter::new(Some(file))?.write_iter(lines)?;
    }
    Ok(())
}

/// Read the requested columns of observations, jackknife each of them, and write the results.
///
/// # Errors
/// - if no input was provided, or if the input cannot be parsed.
/// - if any output file cannot be written, or already exists without `--overwrite`.
/// - if the estimator fails on the full sample or on any replicate.
pub fn run_jackknife(common: &Common, resampling: &Resampling) -> Result<()> {
    let loc_msg = "While running jackknife";
    common.check_input().loc(loc_msg)?;

    // ----------------------------- Parse requested columns and read observations.
    let columns = common.parse_columns().loc(loc_msg)?;
    debug!("Requested columns: {columns:?}");
    let reader = ObservationReader::new(common.input.as_deref(), common.format.as_deref(), common.header)?;
    let observations = reader.read_columns(&columns).loc(loc_msg)?;

    // ----------------------------- Check output files before any computation.
    let output_files = OutputFiles::new(common, resampling.print_pseudovalues, &observations).loc(loc_msg)?;

    // ----------------------------- Resample each column.
    let pool = match resampling.threads {
        0 | 1   => None,
        threads => {
            info!("Spawning {threads} worker threads");
            Some(jackknife::thread_pool(threads).loc(loc_msg)?)
        },
    };
    if pool.is_some() && resampling.block_size != 1 {
        warn!("Block jackknife replicates are computed sequentially. --threads is ignored.");
    }

    info!("Jackknife: estimator '{}' on {} column(s)", resampling.estimator, observations.len());
    let progress = logger::Logger::progress_bar(observations.len() as u64, "Resampling")?;
    let mut reports = Vec::with_capacity(observations.len());
    for column in &observations {
        progress.set_message(column.name.clone());
        let report = match &pool {
            Some(pool) => pool.install(|| resample(column, resampling, true)),
            None       => resample(column, resampling, false),
        };
        let report = report.with_loc(|| format!("While resampling column '{}'", column.name))?;
        debug!("Column '{}': {}", report.name, report.summary);
        reports.push(report);
        progress.inc(1);
    }
    progress.finish_and_clear();

    write_results(&reports, &output_files).loc(loc_msg)
}

/// Unpack the command line arguments and run the appropriate module.
///
/// # Errors
/// See [`run_jackknife`] and [`Cli::deserialize`]
pub fn run(cli: Cli) -> Result<()> {
    match cli.commands {
        Run{common, resampling} => run_jackknife(&common, &resampling)?,
        FromYaml{yaml} => {
            info!("Replaying arguments from {}", yaml.display());
            let cli = Cli::deserialize(&yaml)?;
            self::run(cli)?;
        },
    };
    Ok(())
}
