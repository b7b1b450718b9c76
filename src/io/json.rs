use std::io::{self, Write};

use crate::flight::FlightResult;

/// Write a flight result as pretty-printed JSON (trajectory and event
/// log included, via `FlightResult`'s own `Serialize` derive).
pub fn write_summary<W: Write>(writer: &mut W, result: &FlightResult) -> io::Result<()> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{json}")
}

/// Write a flight result JSON to a file.
pub fn write_summary_file(path: &str, result: &FlightResult) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, result)
}
