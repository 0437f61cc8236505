use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the configured query and print or save the result table
    Query {
        #[arg(long, help = "Application config file path (.toml/.yaml/.json)")]
        config: String,

        #[arg(
            long,
            help = "Base query time in the configured time format; defaults to now"
        )]
        query_time: Option<String>,

        #[arg(long, default_value_t = 10, help = "Number of rows to print")]
        limit: usize,

        #[arg(
            long,
            help = "If specified, writes the full result as JSON to this file instead of printing"
        )]
        output: Option<String>,
    },
    /// Check connectivity against the configured backend
    TestConn {
        #[arg(long, help = "Connection settings file path (TOML)")]
        connection: String,
    },
    /// Compute and print a query window without touching the backend
    Window {
        #[arg(long, help = "Base query time")]
        query_time: String,

        #[arg(long, help = "Start offset as days,hours,minutes,seconds")]
        start: String,

        #[arg(long, help = "End offset as days,hours,minutes,seconds")]
        end: String,

        #[arg(long, default_value_t = 0, help = "Timezone offset in hours")]
        tz_offset: i64,

        #[arg(
            long,
            default_value = extractor::window::DEFAULT_TIME_FORMAT,
            help = "strftime pattern for parsing and formatting"
        )]
        time_format: String,
    },
}
