//! CSV bar history
//!
//! Columns: `datetime` (bar open, epoch nanoseconds), `open`, `high`, `low`,
//! `close`, `volume`. Rows must be in strictly ascending time order.

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use vwap_core::{Bar, SessionCalendar, Volume};

use crate::error::{Result, RunnerError};

#[derive(Debug, Deserialize)]
struct BarRecord {
    datetime: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: Volume,
}

impl From<BarRecord> for Bar {
    fn from(record: BarRecord) -> Self {
        Bar::new(record.datetime, record.volume).with_prices(
            record.open,
            record.high,
            record.low,
            record.close,
        )
    }
}

/// Read bars from CSV text with a header row
pub fn read_bars<R: Read>(reader: R) -> Result<Vec<Bar>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut bars: Vec<Bar> = Vec::new();

    for (i, result) in rdr.deserialize::<BarRecord>().enumerate() {
        let bar = Bar::from(result?);
        if bars.last().is_some_and(|last| bar.timestamp_ns <= last.timestamp_ns) {
            // Header is row 1
            return Err(RunnerError::Unordered { row: i + 2 });
        }
        bars.push(bar);
    }

    Ok(bars)
}

pub fn load_bars(path: impl AsRef<Path>) -> Result<Vec<Bar>> {
    let file = File::open(path.as_ref()).map_err(|e| RunnerError::Io {
        path: path.as_ref().display().to_string(),
        error: e.to_string(),
    })?;
    read_bars(file)
}

/// Split bars into (history, live session)
///
/// The live session is every bar of the last trading day in the file.
pub fn split_session(mut bars: Vec<Bar>, calendar: &SessionCalendar) -> Result<(Vec<Bar>, Vec<Bar>)> {
    let last_day = bars
        .last()
        .map(|bar| calendar.trading_day(bar.timestamp_ns))
        .ok_or(RunnerError::EmptyHistory)?;

    let start = bars.partition_point(|bar| calendar.trading_day(bar.timestamp_ns) < last_day);
    let live = bars.split_off(start);
    Ok((bars, live))
}
