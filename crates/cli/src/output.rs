use crate::error::CliError;
use model::records::table::ResultTable;
use tracing::info;

/// Prints the table with padded columns, followed by its shape.
pub fn print_table(table: &ResultTable, total_rows: usize) {
    print!("{table}");
    let (shown, cols) = table.shape();
    println!("[{shown} of {total_rows} rows x {cols} columns]");
}

/// Writes the full table as pretty JSON.
pub fn write_json(table: &ResultTable, path: &str) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(table).map_err(CliError::JsonSerialize)?;
    std::fs::write(path, json)?;
    info!("Wrote result table to {path}");
    Ok(())
}
