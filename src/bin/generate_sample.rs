//! Writes a small EUC-KR encoded `data/gdp_data.csv` in the World Bank wide
//! format, for running the dashboard without the real export.

use std::fmt::Write as _;

fn main() {
    let years: Vec<i32> = (1960..=2022).collect();

    let mut csv = String::from("Country Name,Country Code");
    for year in &years {
        let _ = write!(csv, ",{year}");
    }
    csv.push('\n');

    // (label, code, 1960 GDP in current US$, nominal yearly growth)
    let countries: [(&str, &str, f64, f64); 3] = [
        ("\"Korea, Rep.\"", "KOR", 3.96e9, 1.105),
        ("Japan", "JPN", 4.43e10, 1.068),
        ("United States", "USA", 5.43e11, 1.062),
    ];

    for (name, code, base, growth) in countries {
        let _ = write!(csv, "{name},{code}");
        let mut gdp = base;
        for year in &years {
            // Leave a couple of early cells blank, like the real export.
            if code == "KOR" && (1961..=1962).contains(year) {
                csv.push(',');
            } else {
                let _ = write!(csv, ",{gdp:.1}");
            }
            gdp *= growth;
        }
        csv.push('\n');
    }

    let (encoded, _, had_errors) = encoding_rs::EUC_KR.encode(&csv);
    assert!(!had_errors, "sample CSV contains characters EUC-KR cannot encode");

    std::fs::create_dir_all("data").expect("Failed to create data directory");
    std::fs::write("data/gdp_data.csv", &encoded).expect("Failed to write data/gdp_data.csv");

    println!(
        "Wrote {} countries x {} year columns to data/gdp_data.csv ({} bytes, EUC-KR)",
        countries.len(),
        years.len(),
        encoded.len()
    );
}
