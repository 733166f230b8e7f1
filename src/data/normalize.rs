use std::ops::RangeInclusive;

use chrono::NaiveDate;

use super::loader::LoadError;
use super::model::{year_start, GdpRow, GdpSeries, RawTable};

// ---------------------------------------------------------------------------
// Wide → long reshape of the World Bank GDP table
// ---------------------------------------------------------------------------

/// The wide table carries one column per year label in this range.
pub const YEAR_COLUMNS: RangeInclusive<i32> = 1960..=2022;

/// Header of the country identifier column.
pub const COUNTRY_COLUMN: &str = "Country Name";

/// Transpose the year columns of `table` into a `{date, gdp}` series for a
/// single country.
///
/// Pure function over the raw table: no I/O, no clock reads – `now` is a
/// parameter so the future-row cutoff is reproducible in tests.
///
/// Row-level policy:
/// * cells that fail numeric coercion are dropped, not reported
/// * rows dated after `now` are dropped (no fabricated future data)
/// * output is sorted ascending by date
pub fn transpose_years(
    table: &RawTable,
    country: &str,
    now: NaiveDate,
) -> Result<GdpSeries, LoadError> {
    let country_idx = table
        .headers
        .iter()
        .position(|h| h == COUNTRY_COLUMN)
        .ok_or(LoadError::MissingColumn(COUNTRY_COLUMN))?;

    let row = table
        .rows
        .iter()
        .find(|r| r.get(country_idx).map(String::as_str) == Some(country))
        .ok_or_else(|| LoadError::CountryNotFound(country.to_string()))?;

    let mut rows = Vec::new();
    for (idx, header) in table.headers.iter().enumerate() {
        let Some(year) = parse_year_label(header) else {
            continue;
        };
        let date = year_start(year);
        if date > now {
            continue;
        }
        let Some(cell) = row.get(idx) else {
            continue;
        };
        let Ok(gdp) = cell.trim().parse::<f64>() else {
            continue;
        };
        rows.push(GdpRow { date, gdp });
    }

    rows.sort_by_key(|r| r.date);
    Ok(GdpSeries { rows })
}

/// Accept exactly the 4-digit year labels inside [`YEAR_COLUMNS`].
fn parse_year_label(label: &str) -> Option<i32> {
    if label.len() != 4 || !label.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = label.parse().ok()?;
    YEAR_COLUMNS.contains(&year).then_some(year)
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;

    fn raw_table() -> RawTable {
        RawTable {
            headers: vec![
                "Country Name".into(),
                "Country Code".into(),
                "1960".into(),
                "1961".into(),
                "2021".into(),
                "2022".into(),
            ],
            rows: vec![
                vec![
                    "Korea, Rep.".into(),
                    "KOR".into(),
                    "3957873322.2".into(),
                    "".into(),
                    "1818432519499".into(),
                    "1673916218114".into(),
                ],
                vec![
                    "Japan".into(),
                    "JPN".into(),
                    "44307342950".into(),
                    "53508617739".into(),
                    "5005537439277".into(),
                    "4232173912148".into(),
                ],
            ],
        }
    }

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn selects_country_and_transposes_year_columns() {
        let series = transpose_years(&raw_table(), "Korea, Rep.", day(2026, 8, 30)).unwrap();
        // "1961" is blank for Korea and gets dropped.
        assert_eq!(series.len(), 3);
        assert_eq!(series.rows[0].date, day(1960, 1, 1));
        assert_eq!(series.rows[0].gdp, 3957873322.2);
        assert_eq!(series.rows[2].date, day(2022, 1, 1));
    }

    #[test]
    fn output_is_sorted_ascending_by_date() {
        let series = transpose_years(&raw_table(), "Japan", day(2026, 8, 30)).unwrap();
        assert!(series.rows.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn drops_rows_after_the_cutoff() {
        let series = transpose_years(&raw_table(), "Japan", day(1961, 6, 1)).unwrap();
        assert_eq!(
            series.rows.iter().map(|r| r.date).collect::<Vec<_>>(),
            vec![day(1960, 1, 1), day(1961, 1, 1)]
        );
    }

    #[test]
    fn same_input_and_cutoff_is_deterministic() {
        let now = day(2026, 8, 30);
        let a = transpose_years(&raw_table(), "Korea, Rep.", now).unwrap();
        let b = transpose_years(&raw_table(), "Korea, Rep.", now).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn non_year_columns_are_ignored() {
        // "Country Code" must not be coerced into data even though KOR rows
        // have values there.
        let series = transpose_years(&raw_table(), "Korea, Rep.", day(2026, 8, 30)).unwrap();
        assert!(series.rows.iter().all(|r| YEAR_COLUMNS.contains(&r.date.year())));
    }

    #[test]
    fn missing_country_is_an_error() {
        let err = transpose_years(&raw_table(), "Atlantis", day(2026, 8, 30)).unwrap_err();
        assert!(matches!(err, LoadError::CountryNotFound(_)));
    }

    #[test]
    fn missing_country_column_is_an_error() {
        let table = RawTable {
            headers: vec!["1960".into()],
            rows: vec![vec!["1.0".into()]],
        };
        let err = transpose_years(&table, "Korea, Rep.", day(2026, 8, 30)).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(_)));
    }
}
