use log::{debug, info, warn};

use snafu::prelude::*;
use topsis_ranking::*;

use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::topsis::io_common::{input_format, InputFormat, InputTable};

pub mod io_common;
pub mod io_csv;
pub mod io_excel;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CliError {
    #[snafu(display("File '{path}' not found. Please check the file path and try again."))]
    SourceNotFound {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}: {source}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("Worksheet {name:?} not found in {path}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display("File {path} does not contain any worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("The delimiter must be a single ASCII character, found {delimiter:?}"))]
    InvalidDelimiter { delimiter: char },

    #[snafu(display("{source}"))]
    Ranking { source: TopsisError },

    #[snafu(display("Error rendering the output: {source}"))]
    RenderingCsv { source: csv::Error },
    #[snafu(display("Error rendering the output: {source}"))]
    RenderingOutput { source: std::io::Error },
    #[snafu(display("Error writing file {path}: {source}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error rendering the summary: {source}"))]
    Summary { source: serde_json::Error },
    #[snafu(display("Error opening reference file {path}: {source}"))]
    OpeningReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between the output and the reference {path}"))]
    ReferenceMismatch { path: String },
}

pub type CliResult<T> = Result<T, CliError>;

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CriterionSummary {
    pub name: String,
    pub weight: f64,
    pub impact: String,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct AlternativeSummary {
    pub name: String,
    pub score: f64,
    pub rank: u32,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RankingSummary {
    #[serde(rename = "identifierColumn")]
    pub identifier_column: String,
    pub criteria: Vec<CriterionSummary>,
    #[serde(rename = "idealBest")]
    pub ideal_best: Vec<f64>,
    #[serde(rename = "idealWorst")]
    pub ideal_worst: Vec<f64>,
    pub results: Vec<AlternativeSummary>,
}

fn build_summary(result: &TopsisResult) -> RankingSummary {
    RankingSummary {
        identifier_column: result.identifier.clone(),
        criteria: result
            .criteria
            .iter()
            .map(|c| CriterionSummary {
                name: c.name.clone(),
                weight: c.weight,
                impact: c.impact.symbol().to_string(),
            })
            .collect(),
        ideal_best: result.ideal_best.clone(),
        ideal_worst: result.ideal_worst.clone(),
        results: result
            .alternatives
            .iter()
            .map(|a| AlternativeSummary {
                name: a.name.clone(),
                score: a.score,
                rank: a.rank,
            })
            .collect(),
    }
}

fn build_summary_js(result: &TopsisResult) -> CliResult<String> {
    let js: JSValue = serde_json::to_value(build_summary(result)).context(SummarySnafu {})?;
    serde_json::to_string_pretty(&js).context(SummarySnafu {})
}

fn read_input(
    path: &str,
    delimiter: u8,
    worksheet_name: Option<&str>,
) -> CliResult<InputTable> {
    // Missing or unreadable inputs are reported before anything else.
    fs::metadata(path).context(SourceNotFoundSnafu { path })?;
    info!("Attempting to read input file {:?}", path);
    match input_format(path) {
        InputFormat::Delimited => io_csv::read_csv_table(path, delimiter),
        InputFormat::Spreadsheet => io_excel::read_excel_table(path, worksheet_name),
    }
}

fn check_reference(reference_path: &str, rendered: &str) -> CliResult<()> {
    let reference = fs::read_to_string(reference_path).context(OpeningReferenceSnafu {
        path: reference_path,
    })?;
    if reference != rendered {
        warn!("Found differences with the reference file {}", reference_path);
        print_diff(reference.as_str(), rendered, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    Ok(())
}

/// Writes each `(path, contents)` pair, all or nothing.
///
/// The contents are first staged next to their destination and only moved in place once every
/// file has been staged. Staged files are removed when any write fails.
fn write_files(files: &[(&str, &str)]) -> CliResult<()> {
    let mut staged: Vec<(String, &str)> = Vec::new();
    for (dest, contents) in files {
        let tmp = format!("{}.{}.tmp", dest, std::process::id());
        if let Err(e) = fs::write(&tmp, contents) {
            discard_staged(&staged);
            return Err(e).context(WritingOutputSnafu { path: *dest });
        }
        staged.push((tmp, *dest));
    }
    for (idx, (tmp, dest)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(tmp, dest) {
            discard_staged(&staged[idx..]);
            return Err(e).context(WritingOutputSnafu { path: *dest });
        }
        debug!("write_files: wrote {}", dest);
    }
    Ok(())
}

fn discard_staged(staged: &[(String, &str)]) {
    for (tmp, _) in staged {
        if let Err(e) = fs::remove_file(tmp) {
            warn!("Could not remove temporary file {}: {}", tmp, e);
        }
    }
}

/// Reads the input, ranks it and writes the result.
///
/// Everything is computed and checked before the first write, so that nothing is written
/// when the input is invalid. The output and the summary files are then written together: either
/// both are written or neither is.
pub fn run_ranking(args: &Args) -> CliResult<()> {
    ensure!(
        args.delimiter.is_ascii(),
        InvalidDelimiterSnafu {
            delimiter: args.delimiter
        }
    );
    let delimiter = args.delimiter as u8;

    let input = read_input(
        &args.input,
        delimiter,
        args.excel_worksheet_name.as_deref(),
    )?;
    debug!("run_ranking: input: {:?}", input.raw);

    let result = rank(&input.raw, &args.weights, &args.impacts).context(RankingSnafu {})?;

    let rendered = io_csv::render_result(&input, &result)?;
    let summary = match args.summary.as_deref() {
        Some("") | None => None,
        Some(_) => Some(build_summary_js(&result)?),
    };

    // The reference output, if provided for comparison
    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &rendered)?;
    }

    let mut files: Vec<(&str, &str)> = vec![(args.output.as_str(), rendered.as_str())];
    let mut to_stdout: Option<&str> = None;
    if let (Some(dest), Some(js)) = (&args.summary, &summary) {
        if dest == "stdout" {
            to_stdout = Some(js.as_str());
        } else {
            files.push((dest.as_str(), js.as_str()));
        }
    }
    write_files(&files)?;
    if let Some(js) = to_stdout {
        println!("{}", js);
    }
    Ok(())
}
