//! Static rename tables: local source names to drive-friendly names.
//!
//! Tables are ordered slices so copies and reports follow a fixed order.

/// Weekly S-DoT exports (`data/raw/s-dot`) and their staged names.
pub const SDOT_FILES: &[(&str, &str)] = &[
    ("S-DoT_NATURE_2025.04.28-05.04.csv", "sdot_2025_04_28_05_04.csv"),
    ("S-DoT_NATURE_2025.05.05-05.11.csv", "sdot_2025_05_05_05_11.csv"),
    ("S-DoT_NATURE_2025.05.12-05.18.csv", "sdot_2025_05_12_05_18.csv"),
    ("S-DoT_NATURE_2025.05.19-05.25.csv", "sdot_2025_05_19_05_25.csv"),
    ("S-DoT_NATURE_2025.05.26-06.01.csv", "sdot_2025_05_26_06_01.csv"),
    ("S-DoT_NATURE_2025.06.02-06.08.csv", "sdot_2025_06_02_06_08.csv"),
    ("S-DoT_NATURE_2025.06.09-06.15.csv", "sdot_2025_06_09_06_15.csv"),
    ("S-DoT_NATURE_2025.06.16-06.22.csv", "sdot_2025_06_16_06_22.csv"),
    ("S-DoT_NATURE_2025.06.23-06.29.csv", "sdot_2025_06_23_06_29.csv"),
    ("S-DoT_NATURE_2025.06.30-07.06.csv", "sdot_2025_06_30_07_06.csv"),
    ("S-DoT_NATURE_2025.07.07-07.13.csv", "sdot_2025_07_07_07_13.csv"),
    ("S-DoT_NATURE_2025.07.14-07.20.csv", "sdot_2025_07_14_07_20.csv"),
    ("S-DoT_NATURE_2025.07.21-07.27.csv", "sdot_2025_07_21_07_27.csv"),
    ("S-DoT_NATURE_2025.07.28-08.03.csv", "sdot_2025_07_28_08_03.csv"),
    ("S-DoT_NATURE_2025.08.04-08.10.csv", "sdot_2025_08_04_08_10.csv"),
    ("S-DoT_NATURE_2025.08.11-08.17.csv", "sdot_2025_08_11_08_17.csv"),
];

/// Sensor installation workbook in `data/external`.
pub const SENSOR_LOCATIONS: &[(&str, &str)] = &[(
    "서울시 도시데이터 센서(S-DoT) 환경정보 설치 위치정보.xlsx",
    "sensor_locations.xlsx",
)];

/// SGIS boundary folders in `data/external/sgis_boundaries`, each zipped flat.
pub const SGIS_BOUNDARIES: &[(&str, &str)] = &[
    ("1. 2024년 2분기 기준 시도 경계", "seoul_sido.zip"),
    ("2. 2024년 2분기 기준 시군구 경계", "seoul_sigungu.zip"),
    ("3. 2024년 2분기 기준 행정동 경계", "seoul_dong.zip"),
];

/// Prefix stripped from S-DoT file names when naming samples.
pub const SDOT_PREFIX: &str = "S-DoT_NATURE_";

/// Name of the sample file derived from a raw S-DoT file name.
///
/// The prefix is dropped, every `.` becomes `_` (the extension included) and
/// the result is lowercased, then `.csv` is appended.
pub fn sample_name(source_name: &str) -> String {
    let stem = source_name.replace(SDOT_PREFIX, "").replace('.', "_");
    format!("sample_{}.csv", stem.to_lowercase())
}
