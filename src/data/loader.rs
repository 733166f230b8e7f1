use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use chrono::{Local, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::model::{GdpRow, GdpSeries, LoadOutcome, RawTable};
use super::normalize;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Everything that can go wrong between the file path and a normalized
/// series. None of these escape [`load_gdp`]; they become the fallback
/// reason shown in the UI.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("file is not valid EUC-KR text")]
    BadEncoding,
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing '{0}' column")]
    MissingColumn(&'static str),
    #[error("no row for country '{0}'")]
    CountryNotFound(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and normalize the GDP CSV at `path`.
///
/// Never fails: any error is logged, and a synthetic monthly series over
/// [`FALLBACK_WINDOW`] is substituted so downstream code always has a table
/// of the canonical shape to work with.
pub fn load_gdp(path: &Path, country: &str) -> LoadOutcome {
    let today = Local::now().date_naive();
    match try_load(path, country, today) {
        Ok(series) => {
            log::info!(
                "Loaded {} GDP observations for '{country}' from {}",
                series.len(),
                path.display()
            );
            LoadOutcome::Loaded(series)
        }
        Err(e) => {
            log::error!("Failed to load GDP data from {}: {e}", path.display());
            LoadOutcome::Fallback {
                series: fallback_series(today),
                reason: e.to_string(),
            }
        }
    }
}

fn try_load(path: &Path, country: &str, today: NaiveDate) -> Result<GdpSeries, LoadError> {
    let raw = read_euc_kr_csv(path)?;
    normalize::transpose_years(&raw, country, today)
}

// ---------------------------------------------------------------------------
// EUC-KR CSV reading
// ---------------------------------------------------------------------------

/// Read the whole file, decode from EUC-KR, and parse as CSV into a
/// [`RawTable`]. Decode errors count as a failed load – silently replacing
/// undecodable bytes would corrupt the country labels we match on.
fn read_euc_kr_csv(path: &Path) -> Result<RawTable, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let (text, _, had_errors) = encoding_rs::EUC_KR.decode(&bytes);
    if had_errors {
        return Err(LoadError::BadEncoding);
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}

// ---------------------------------------------------------------------------
// Synthetic fallback series
// ---------------------------------------------------------------------------

/// Month-start window the fallback series spans (inclusive bounds).
pub const FALLBACK_WINDOW: ((i32, u32), (i32, u32, u32)) = ((2022, 1), (2023, 12, 31));

// Fixed seed so the placeholder series is stable across reloads within a
// session and across test runs.
const FALLBACK_SEED: u64 = 0x6b6d_615f_6177_73;

/// Build the synthetic placeholder series: one row per month start inside
/// the fixed window, bounded random values with a seasonal wobble, rows
/// after `today` dropped.
pub fn fallback_series(today: NaiveDate) -> GdpSeries {
    let ((start_year, start_month), (end_year, end_month, end_day)) = FALLBACK_WINDOW;
    let start = NaiveDate::from_ymd_opt(start_year, start_month, 1).unwrap_or_default();
    let end = NaiveDate::from_ymd_opt(end_year, end_month, end_day).unwrap_or_default();

    let mut rng = StdRng::seed_from_u64(FALLBACK_SEED);
    let mut rows = Vec::new();
    let mut date = start;
    let mut month_index = 0usize;

    while date <= end && date <= today {
        let seasonal = (month_index as f64 * PI / 6.0).sin() * 10.0;
        let gdp = rng.gen_range(-5.0..28.0) + seasonal;
        rows.push(GdpRow { date, gdp });

        match date.checked_add_months(Months::new(1)) {
            Some(next) => date = next,
            None => break,
        }
        month_index += 1;
    }

    GdpSeries { rows }
}
