use anyhow::{anyhow, Result};

use super::model::{DisasterRecord, GdpView};

// ---------------------------------------------------------------------------
// CSV download encoding
// ---------------------------------------------------------------------------

// UTF-8 byte-order marker; spreadsheet tools key their encoding detection
// off it, and without it Korean labels come up garbled in Excel.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Download filename for the filtered GDP table.
pub const GDP_FILENAME: &str = "public_climate_data_processed.csv";

/// Download filename for the filtered disruption table.
pub const DISASTER_FILENAME: &str = "user_disaster_data_processed.csv";

/// Encode a filtered GDP view as CSV bytes. Carries exactly the columns
/// visible to the caller: `date,gdp`, plus `gdp_smooth` when the view has
/// a smoothed column attached.
pub fn gdp_csv(view: &GdpView) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    match &view.smoothed {
        Some(smoothed) => {
            writer.write_record(["date", "gdp", "gdp_smooth"])?;
            for (row, smooth) in view.rows.iter().zip(smoothed) {
                writer.write_record([
                    row.date.to_string(),
                    row.gdp.to_string(),
                    smooth.to_string(),
                ])?;
            }
        }
        None => {
            writer.write_record(["date", "gdp"])?;
            for row in &view.rows {
                writer.write_record([row.date.to_string(), row.gdp.to_string()])?;
            }
        }
    }

    finish(writer)
}

/// Encode filtered disruption records as CSV bytes.
pub fn disaster_csv(records: &[DisasterRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(["event", "year", "region", "group", "value", "unit", "date"])?;
    for r in records {
        writer.write_record([
            r.event.clone(),
            r.year.to_string(),
            r.region.clone(),
            r.group.clone(),
            r.value.to_string(),
            r.unit.clone(),
            r.date.to_string(),
        ])?;
    }

    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    let body = writer
        .into_inner()
        .map_err(|e| anyhow!("flushing CSV writer: {e}"))?;
    let mut bytes = Vec::with_capacity(UTF8_BOM.len() + body.len());
    bytes.extend_from_slice(UTF8_BOM);
    bytes.extend_from_slice(&body);
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::disaster;
    use crate::data::model::{year_start, GdpRow};

    #[test]
    fn empty_view_exports_header_only() {
        let bytes = gdp_csv(&GdpView::default()).unwrap();
        assert_eq!(bytes, b"\xef\xbb\xbfdate,gdp\n");
    }

    #[test]
    fn empty_record_set_exports_header_only() {
        let bytes = disaster_csv(&[]).unwrap();
        assert_eq!(
            bytes,
            b"\xef\xbb\xbfevent,year,region,group,value,unit,date\n"
        );
    }

    #[test]
    fn gdp_rows_export_date_and_value() {
        let view = GdpView {
            rows: vec![GdpRow {
                date: year_start(1960),
                gdp: 3957873322.2,
            }],
            smoothed: None,
        };
        let bytes = gdp_csv(&view).unwrap();
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert_eq!(text, "date,gdp\n1960-01-01,3957873322.2\n");
    }

    #[test]
    fn smoothed_column_is_included_when_present() {
        let view = GdpView {
            rows: vec![
                GdpRow { date: year_start(2000), gdp: 10.0 },
                GdpRow { date: year_start(2001), gdp: 20.0 },
            ],
            smoothed: Some(vec![10.0, 15.0]),
        };
        let bytes = gdp_csv(&view).unwrap();
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(text.starts_with("date,gdp,gdp_smooth\n"));
        assert!(text.contains("2001-01-01,20,15\n"));
    }

    #[test]
    fn korean_labels_survive_the_round_trip() {
        let bytes = disaster_csv(&disaster::dataset().records).unwrap();
        assert!(bytes.starts_with(b"\xef\xbb\xbf"));
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(text.contains("태풍 카눈,2023,강원,휴업,5,곳,2023-01-01"));
        assert!(text.contains("피해 학교·유치원"));
        // 13 data rows + header
        assert_eq!(text.lines().count(), 14);
    }
}
