use std::{fs, path::{Path, PathBuf}};

use clap::Parser;
use parser::Cli;

use super::Fixture;

/// Builder of a `jackknife-rs run` invocation, targeting a temporary output directory.
pub struct JackknifeRunnerBuilder {
    input     : Option<Fixture>,
    output_dir: Fixture,
    args      : Vec<String>,
}

impl JackknifeRunnerBuilder {
    pub fn new() -> Self {
        Self{input: None, output_dir: Fixture::blank("jackknife-test-output"), args: Vec::new()}
    }

    fn arg(mut self, flag: &str, value: impl ToString) -> Self {
        self.args.push(flag.to_string());
        self.args.push(value.to_string());
        self
    }

    fn flag(mut self, flag: &str) -> Self {
        self.args.push(flag.to_string());
        self
    }

    /// Copy a file of `tests/test-data` and use it as input.
    pub fn set_input(mut self, fixture: &str) -> Self {
        self.input = Some(Fixture::copy(fixture));
        self
    }

    /// Use an already existing fixture as input.
    pub fn set_input_fixture(mut self, fixture: Fixture) -> Self {
        self.input = Some(fixture);
        self
    }

    pub fn set_columns(self, columns: &str) -> Self {
        columns.split_whitespace().fold(self.flag("--columns"), Self::flag)
    }

    pub fn set_estimator(self, estimator: &str) -> Self {
        self.arg("--estimator", estimator)
    }

    pub fn set_block_size(self, block_size: usize) -> Self {
        self.arg("--block-size", block_size)
    }

    pub fn set_threads(self, threads: usize) -> Self {
        self.arg("--threads", threads)
    }

    pub fn header(self) -> Self {
        self.flag("--header")
    }

    pub fn print_pseudovalues(self) -> Self {
        self.flag("--print-pseudovalues")
    }

    pub fn overwrite(self) -> Self {
        self.flag("--overwrite")
    }

    pub fn build(self) -> Result<JackknifeRunner, clap::Error> {
        let input = self.input.expect("An input file is required");
        let args = ["jackknife-rs", "run", "--input", &input.to_string(), "--output-dir", &self.output_dir.to_string()]
            .into_iter()
            .map(String::from)
            .chain(self.args)
            .collect::<Vec<String>>();
        let runner = JackknifeRunner{args, input, output_dir: self.output_dir};
        runner.cli()?;
        Ok(runner)
    }
}

pub struct JackknifeRunner {
    args      : Vec<String>,
    input     : Fixture,
    output_dir: Fixture,
}

impl JackknifeRunner {
    pub fn cli(&self) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(&self.args)
    }

    pub fn run(&self) -> anyhow::Result<()> {
        jackknife_rs::run(self.cli()?)
    }

    /// Append an argument to every subsequent run.
    pub fn push_arg(&mut self, arg: &str) {
        self.args.push(arg.to_string());
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.to_path_buf()
    }

    fn file_stem(&self) -> String {
        self.input.file_stem().and_then(|s| s.to_str()).expect("Invalid input filename").to_string()
    }

    pub fn output_results(&self) -> PathBuf {
        self.output_dir.join(format!("{}.jackknife", self.file_stem()))
    }

    pub fn output_pseudo(&self, column: &str) -> PathBuf {
        self.output_dir.join(format!("{}-{column}.pseudo", self.file_stem()))
    }

    /// Tab-separated fields of every line of `file`, header included.
    pub fn read_fields(file: &Path) -> Vec<Vec<String>> {
        fs::read_to_string(file)
            .unwrap_or_else(|_| panic!("Failed to open {}", file.display()))
            .lines()
            .map(|line| line.split('\t').map(String::from).collect())
            .collect()
    }
}
