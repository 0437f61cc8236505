use crate::{
    config::QuerySettings,
    error::ExtractError,
    flux::FluxQuery,
    window::{construct_query_endpoints, parse_query_time, shift_string_time},
};
use chrono::NaiveDateTime;
use connectors::client::DatabaseClient;
use model::records::table::ResultTable;
use std::time::Instant;
use tracing::{info, warn};

/// Runs one time-bounded query and returns the shaped result.
///
/// Computes the window from the settings, renders the Flux pipeline, submits
/// it through the client and prunes the configured columns from the result.
/// Stateless and single-shot: one round-trip per call, no caching, no
/// retries. Backend and transport errors propagate unmodified; an empty
/// result set is an empty table, not an error.
pub async fn query_database(
    client: &(dyn DatabaseClient + Send + Sync),
    query_time: NaiveDateTime,
    settings: &QuerySettings,
) -> Result<ResultTable, ExtractError> {
    let (start, end) = construct_query_endpoints(
        query_time,
        settings.delta_time_start,
        settings.delta_time_end,
        settings.tz_offset,
        &settings.time_format,
    );

    let query = FluxQuery::new(&settings.bucket)
        .range(&start, &end)
        .time_shift(settings.tz_offset)
        .filter(&settings.filter)
        .render();

    // The boundaries carry the tz_offset shift; undo it so the log shows
    // the window relative to the caller's base time.
    let start_local =
        shift_string_time(&start, -settings.tz_offset, &settings.time_format)
            .unwrap_or_else(|_| start.clone());
    let end_local = shift_string_time(&end, -settings.tz_offset, &settings.time_format)
        .unwrap_or_else(|_| end.clone());

    info!(
        start = %start,
        end = %end,
        "Querying bucket:{}, query_time:{} to {}",
        settings.bucket,
        start_local,
        end_local
    );

    let query_started = Instant::now();
    let rows = client.query_rows(&query).await?;
    let mut table = ResultTable::from_rows(&rows);

    if !settings.columns_to_drop.is_empty() {
        let dropped = table.drop_columns(&settings.columns_to_drop);
        if !dropped.is_empty() {
            info!("Dropped columns from table: {:?}", dropped);
        }
        let missing: Vec<&String> = settings
            .columns_to_drop
            .iter()
            .filter(|name| !dropped.contains(name))
            .collect();
        if !missing.is_empty() {
            warn!("Columns requested for drop were not present: {:?}", missing);
        }
    }

    let elapsed = query_started.elapsed();
    let (n_rows, n_cols) = table.shape();
    info!(
        "Query returned table of size {n_rows} rows x {n_cols} columns in {:.2}s",
        elapsed.as_secs_f64()
    );

    Ok(table)
}

/// Same as [`query_database`], with the base time given as a string parsed
/// according to the configured time format.
pub async fn query_database_at(
    client: &(dyn DatabaseClient + Send + Sync),
    query_time: &str,
    settings: &QuerySettings,
) -> Result<ResultTable, ExtractError> {
    let parsed = parse_query_time(query_time, &settings.time_format)?;
    query_database(client, parsed, settings).await
}
