use crate::config::{PrintMode, SwatConfig};
use crate::error::IngestError;
use crate::field;
use crate::header::{self, HeaderColumn};
use crate::layout::{self, HruLayout, HEADER_LINE_NUMBER, PROBE_LINE_NUMBER, VALUES_COLUMN_WIDTH};
use crate::temporal::{TemporalInput, TemporalState};
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use rusqlite::types::Value;
use rusqlite::Connection;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Fixed identifying columns of the OutputHru table, in bind order. The
/// dynamically discovered value columns follow these.
const FIXED_COLUMNS: [&str; 10] = [
    "LULC", "HRU", "GIS", "SUB", "MGT", "Month", "Day", "Year", "YearSpan", "Area",
];

/// Load one output.hru file into the OutputHru table.
///
/// The whole file is one transaction: every data line becomes exactly one
/// parameterized insert, and any failure before the final commit leaves the
/// table untouched. Returns the number of rows inserted.
pub fn ingest_output_hru(
    conn: &mut Connection,
    config: &SwatConfig,
    path: &Path,
    progress: &ProgressBar,
) -> Result<usize> {
    let hru_layout = detect_layout(path)?;
    let file = File::open(path).with_context(|| format!("Failed to open {path:?}"))?;
    let reader = BufReader::new(file);

    let tx = conn.transaction()?;
    let mut inserted = 0usize;
    {
        let mut stmt = None;
        let mut header_columns: Vec<HeaderColumn> = Vec::new();
        let mut state = TemporalState::new(config);

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.with_context(|| format!("Failed to read {path:?}"))?;

            if line_number == HEADER_LINE_NUMBER {
                header_columns = header::map_header(&line, config.use_calendar_date_format)
                    .with_context(|| format!("{path:?} line {line_number}"))?;
                stmt = Some(tx.prepare(&insert_sql(&header_columns))?);
            } else if line_number > HEADER_LINE_NUMBER && !line.trim().is_empty() {
                let stmt = stmt.as_mut().ok_or_else(|| IngestError::InvalidFormat {
                    path: path.to_path_buf(),
                    reason: format!("data before the header line {HEADER_LINE_NUMBER}"),
                })?;
                let params = bind_row(&line, hru_layout, config, &mut state, &header_columns)
                    .with_context(|| format!("{path:?} line {line_number}"))?;
                stmt.execute(rusqlite::params_from_iter(params))?;
                inserted += 1;
                progress.inc(1);
            }
        }
    }
    tx.commit()?;

    Ok(inserted)
}

/// Pick the layout revision by probing the first data line. The probe line
/// sits at a fixed position, so a file too short to reach it has no data.
fn detect_layout(path: &Path) -> Result<HruLayout> {
    let file = File::open(path).with_context(|| format!("Failed to open {path:?}"))?;
    let probe = BufReader::new(file)
        .lines()
        .nth(PROBE_LINE_NUMBER - 1)
        .transpose()
        .with_context(|| format!("Failed to read {path:?}"))?
        .ok_or_else(|| IngestError::InvalidFormat {
            path: path.to_path_buf(),
            reason: format!("shorter than {PROBE_LINE_NUMBER} lines, no data to probe"),
        })?;
    Ok(HruLayout::for_revision(layout::detect_revision(&probe)))
}

/// Build the per-file INSERT: fixed columns first, then the canonical value
/// columns in header order.
fn insert_sql(header_columns: &[HeaderColumn]) -> String {
    let mut columns: Vec<String> = FIXED_COLUMNS.iter().map(|c| format!("\"{c}\"")).collect();
    columns.extend(header_columns.iter().map(|c| format!("\"{}\"", c.column)));
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
    format!(
        "INSERT INTO OutputHru ({}) VALUES ({});",
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// Extract one data line's parameters, in the same order as the INSERT's
/// column list.
fn bind_row(
    line: &str,
    hru_layout: HruLayout,
    config: &SwatConfig,
    state: &mut TemporalState,
    header_columns: &[HeaderColumn],
) -> crate::error::Result<Vec<Value>> {
    let lulc = hru_layout.lulc.get(line)?.to_string();
    let hru = hru_layout.hru.get_int(line)?;
    let gis = hru_layout.gis.get(line)?.to_string();
    let sub = hru_layout.sub.get_int(line)?;
    let mgt = hru_layout.mgt.get_int(line)?;

    let input = match (config.print_mode, config.use_calendar_date_format) {
        (PrintMode::Daily, true) => TemporalInput::CalendarDay {
            month: hru_layout.mo.get_int(line)? as u32,
            day: hru_layout.da.get_int(line)? as u32,
            year: hru_layout.yr.get_int(line)?,
        },
        (PrintMode::Daily, false) => TemporalInput::JulianDay(hru_layout.mon.get_int(line)? as u32),
        (PrintMode::Monthly, _) => TemporalInput::MonthCode(hru_layout.mon.get_double(line)?),
        (PrintMode::Yearly, _) => TemporalInput::YearValue(hru_layout.mon.get_double(line)?),
    };
    let temporal = state.reconstruct(input, config)?;

    let mut column_index = if config.use_calendar_date_format {
        // swat.exe misaligns calendar-format value columns by one character;
        // downstream consumers expect the skewed offsets, so keep them.
        hru_layout.area_index_calendar + 1
    } else {
        hru_layout.area_index
    };
    let area = field::parse_double_at(line, column_index, VALUES_COLUMN_WIDTH)?;
    column_index += VALUES_COLUMN_WIDTH;

    let mut params: Vec<Value> = vec![
        Value::Text(lulc),
        Value::Integer(i64::from(hru)),
        Value::Text(gis),
        Value::Integer(i64::from(sub)),
        Value::Integer(i64::from(mgt)),
        Value::Integer(i64::from(temporal.month)),
        Value::Integer(i64::from(temporal.day)),
        Value::Integer(i64::from(temporal.year)),
        Value::Real(temporal.year_span),
        Value::Real(area),
    ];
    for _column in header_columns {
        params.push(Value::Real(field::parse_double_at(
            line,
            column_index,
            VALUES_COLUMN_WIDTH,
        )?));
        column_index += VALUES_COLUMN_WIDTH;
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutRevision;
    use chrono::NaiveDate;

    fn daily_config() -> SwatConfig {
        SwatConfig {
            simulation_start: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            simulation_end: NaiveDate::from_ymd_opt(2001, 12, 31).unwrap(),
            skip_years: 0,
            print_mode: PrintMode::Daily,
            use_calendar_date_format: false,
        }
    }

    #[test]
    fn insert_sql_keeps_header_order_after_the_fixed_columns() {
        let header_columns = vec![
            HeaderColumn {
                label: "ETmm".into(),
                column: "ETmm",
            },
            HeaderColumn {
                label: "PRECIPmm".into(),
                column: "PRECIPmm",
            },
        ];
        let sql = insert_sql(&header_columns);
        assert!(sql.starts_with("INSERT INTO OutputHru (\"LULC\", \"HRU\", \"GIS\", \"SUB\", \"MGT\""));
        assert!(sql.contains("\"Area\", \"ETmm\", \"PRECIPmm\")"));
        assert!(sql.contains("?12"));
    }

    #[test]
    fn bind_row_walks_the_value_block_contiguously() {
        let line = "AGRL    1  10001001    2    3  361  9.46E+00  1.20E+00  3.40E-01";
        let config = daily_config();
        let mut state = TemporalState::new(&config);
        let header_columns = vec![
            HeaderColumn {
                label: "PRECIPmm".into(),
                column: "PRECIPmm",
            },
            HeaderColumn {
                label: "ETmm".into(),
                column: "ETmm",
            },
        ];

        let params = bind_row(
            line,
            HruLayout::for_revision(LayoutRevision::Legacy),
            &config,
            &mut state,
            &header_columns,
        )
        .unwrap();

        assert_eq!(params.len(), 12);
        assert_eq!(params[0], Value::Text("AGRL".into()));
        assert_eq!(params[3], Value::Integer(2));
        assert_eq!(params[4], Value::Integer(3));
        // Julian day 361 of the leap year 2000 is Dec 26.
        assert_eq!(params[5], Value::Integer(12));
        assert_eq!(params[6], Value::Integer(26));
        assert_eq!(params[7], Value::Integer(2000));
        assert_eq!(params[9], Value::Real(9.46));
        assert_eq!(params[10], Value::Real(1.2));
        assert_eq!(params[11], Value::Real(0.34));
    }

    #[test]
    fn bind_row_fails_on_a_non_numeric_value_column() {
        let line = "AGRL    1  10001001    2    3  361  9.46E+00  xxxxxxxx";
        let config = daily_config();
        let mut state = TemporalState::new(&config);
        let header_columns = vec![HeaderColumn {
            label: "PRECIPmm".into(),
            column: "PRECIPmm",
        }];

        let result = bind_row(
            line,
            HruLayout::for_revision(LayoutRevision::Legacy),
            &config,
            &mut state,
            &header_columns,
        );
        assert!(matches!(result, Err(IngestError::FieldParse { .. })));
    }
}
