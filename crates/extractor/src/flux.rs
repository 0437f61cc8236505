/// Filter predicate applied when the configuration gives none: match every
/// measurement.
pub const DEFAULT_FILTER: &str = r#"r["_measurement"] =~ /.*/"#;

/// Builder for the single Flux pipeline this tool issues.
///
/// The pipeline reads a bucket over a time range, shifts the returned
/// timestamps by the timezone offset, applies the caller's filter, pivots
/// per-id values into columns and flattens the grouping.
///
/// The filter is backend-native Flux inserted verbatim; no escaping or
/// sanitization is applied, and none would be correct, since the predicate
/// is query syntax rather than user text. Malformed filters surface as
/// backend query errors.
#[derive(Debug, Clone)]
pub struct FluxQuery {
    bucket: String,
    start: String,
    stop: String,
    tz_offset: i64,
    filter: String,
}

impl FluxQuery {
    pub fn new(bucket: &str) -> Self {
        FluxQuery {
            bucket: bucket.to_string(),
            start: String::new(),
            stop: String::new(),
            tz_offset: 0,
            filter: DEFAULT_FILTER.to_string(),
        }
    }

    pub fn range(mut self, start: &str, stop: &str) -> Self {
        self.start = start.to_string();
        self.stop = stop.to_string();
        self
    }

    pub fn time_shift(mut self, hours: i64) -> Self {
        self.tz_offset = hours;
        self
    }

    pub fn filter(mut self, predicate: &str) -> Self {
        self.filter = predicate.to_string();
        self
    }

    pub fn render(&self) -> String {
        format!(
            "from(bucket: \"{}\")\n    \
             |> range(start: {}, stop: {})\n    \
             |> timeShift(duration: {}h)\n    \
             |> filter(fn: (r) => {})\n    \
             |> pivot(rowKey:[\"_time\"], columnKey: [\"id\"], valueColumn: \"_value\")\n    \
             |> group()\n",
            self.bucket, self.start, self.stop, self.tz_offset, self.filter
        )
    }
}
