// Primitives for reading and writing delimited text files.

use csv::{ReaderBuilder, Terminator, Trim, WriterBuilder};

use crate::topsis::{io_common::typed_rows, io_common::InputTable, *};

pub const SCORE_COLUMN: &str = "Topsis Score";
pub const RANK_COLUMN: &str = "Rank";

pub fn read_csv_table(path: &str, delimiter: u8) -> CliResult<InputTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(Trim::All)
        // Rows of the wrong length are reported by the validation.
        .flexible(true)
        .from_path(path)
        .context(OpeningCsvSnafu { path })?;

    let headers: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu { path, lineno: 1usize })?
        .iter()
        .map(|s| s.to_string())
        .collect();
    debug!("read_csv_table: headers: {:?}", headers);

    let mut source_text: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        debug!("read_csv_table: lineno: {:?} row: {:?}", lineno, line);
        source_text.push(line.iter().map(|s| s.to_string()).collect());
    }

    let rows = typed_rows(&source_text);

    Ok(InputTable {
        raw: RawTable { headers, rows },
        source_text,
        delimiter,
    })
}

/// Renders the input columns followed by the score and the rank of each alternative.
pub fn render_result(input: &InputTable, result: &TopsisResult) -> CliResult<String> {
    let mut wtr = WriterBuilder::new()
        .delimiter(input.delimiter)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(vec![]);

    let mut header: Vec<&str> = input.raw.headers.iter().map(|s| s.as_str()).collect();
    header.push(SCORE_COLUMN);
    header.push(RANK_COLUMN);
    wtr.write_record(&header).context(RenderingCsvSnafu {})?;

    for (text, alt) in input.source_text.iter().zip(result.alternatives.iter()) {
        let mut record: Vec<String> = text.clone();
        record.push(format_score(alt.score));
        record.push(alt.rank.to_string());
        wtr.write_record(&record).context(RenderingCsvSnafu {})?;
    }

    wtr.flush().context(RenderingOutputSnafu {})?;
    let data = wtr
        .into_inner()
        .map_err(|e| std::io::Error::new(e.error().kind(), e.to_string()))
        .context(RenderingOutputSnafu {})?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}

/// The shortest text that reads back as the same score, with a fractional part even for whole
/// numbers.
fn format_score(score: f64) -> String {
    if score.is_finite() && score.fract() == 0.0 {
        format!("{:.1}", score)
    } else {
        score.to_string()
    }
}
