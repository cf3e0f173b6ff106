use clap::Parser;

/// This is a program to rank alternatives with the TOPSIS method.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The input data. The first row is the header, the first column contains the names of the
    /// alternatives and all the other columns are numeric criteria. Files ending with .xlsx, .xlsm, .xls or .ods
    /// are read as spreadsheets, all the other files as delimited text.
    #[clap(value_parser)]
    pub input: String,

    /// (list of comma-separated numbers) The weight of each criterion, in the order of the columns. The weights
    /// must be positive and do not need to sum to 1.
    #[clap(value_parser, allow_hyphen_values = true)]
    pub weights: String,

    /// (list of comma-separated '+' or '-') Whether each criterion should be maximized ('+') or minimized ('-'),
    /// in the order of the columns.
    #[clap(value_parser, allow_hyphen_values = true)]
    pub impacts: String,

    /// (file path) Where to write the input data with the score and the rank of each alternative.
    #[clap(value_parser)]
    pub output: String,

    /// (default ',') The delimiter of the input and output files when using delimited text.
    #[clap(long, value_parser, default_value_t = ',')]
    pub delimiter: char,

    /// (default: first worksheet) When using a spreadsheet, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path, 'stdout' or empty) If specified, a summary of the ranking will be written in JSON format to the
    /// given location.
    #[clap(short, long, value_parser)]
    pub summary: Option<String>,

    /// (file path) A reference file containing the expected output. If provided, the output is only written if it
    /// matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
