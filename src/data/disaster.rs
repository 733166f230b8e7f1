use std::sync::OnceLock;

use super::model::{year_start, DisasterRecord, DisasterTable};

// ---------------------------------------------------------------------------
// Fixed school-disruption dataset
// ---------------------------------------------------------------------------

/// Region label used for nationwide figures; aggregations over individual
/// regions skip it.
pub const NATIONWIDE_REGION: &str = "전국";

/// Count unit shared by every record.
const UNIT: &str = "곳";

/// Hand-compiled from news reports and ministry releases: school closures,
/// schedule changes, and facility damage per weather disaster. The 2025
/// rows describe a forward-looking scenario and are kept as authored.
const RAW_RECORDS: [(&str, i32, &str, &str, u32); 13] = [
    ("태풍 카눈", 2023, "강원", "휴업", 5),
    ("태풍 카눈", 2023, "강원", "등교시간 조정", 1),
    ("태풍 카눈", 2023, "강원", "개학 연기", 2),
    ("태풍 카눈", 2023, "강원", "원격수업", 2),
    ("전국 폭우", 2025, "전국", "학사일정 조정", 247),
    ("전국 폭우", 2025, "전국", "단축수업", 156),
    ("전국 폭우", 2025, "전국", "등교시간 조정", 59),
    ("전국 폭우", 2025, "전국", "휴업", 29),
    ("전국 폭우", 2025, "전국", "원격수업", 3),
    ("전국 폭우", 2025, "전국", "시설 피해", 451),
    ("충북 호우", 2023, "충북", "피해 학교·유치원", 24),
    ("충북 호우", 2023, "충북", "등교시간 조정", 7),
    ("충북 호우", 2023, "충북", "원격수업", 1),
];

/// The fixed disruption table. Built on first use, cached for the process
/// lifetime, and immutable afterwards – construction cannot fail.
pub fn dataset() -> &'static DisasterTable {
    static TABLE: OnceLock<DisasterTable> = OnceLock::new();
    TABLE.get_or_init(build_table)
}

fn build_table() -> DisasterTable {
    let records = RAW_RECORDS
        .iter()
        .map(|&(event, year, region, group, value)| DisasterRecord {
            event: event.to_string(),
            year,
            region: region.to_string(),
            group: group.to_string(),
            value,
            unit: UNIT.to_string(),
            date: year_start(year),
        })
        .collect();
    DisasterTable { records }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_has_thirteen_rows_and_three_events() {
        let table = dataset();
        assert_eq!(table.len(), 13);
        assert_eq!(table.events(), vec!["태풍 카눈", "전국 폭우", "충북 호우"]);
    }

    #[test]
    fn dates_are_derived_from_the_year_column() {
        for record in &dataset().records {
            assert_eq!(record.date, year_start(record.year));
        }
    }

    #[test]
    fn every_record_counts_in_the_same_unit() {
        assert!(dataset().records.iter().all(|r| r.unit == UNIT));
    }

    #[test]
    fn dataset_is_cached_process_wide() {
        assert!(std::ptr::eq(dataset(), dataset()));
    }

    #[test]
    fn totals_are_stable() {
        assert_eq!(dataset().total_value(), 987);
    }
}
