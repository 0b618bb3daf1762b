use crate::roster::domain::{RawTable, Scalar};
use std::io::Read;

pub(crate) fn parse_table<R: Read>(reader: R) -> Result<RawTable, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()?
        .iter()
        .map(|header| header.replace(['\u{feff}', '\u{200b}'], ""))
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(parse_cell).collect());
    }

    Ok(RawTable::new(headers, rows))
}

fn parse_cell(value: &str) -> Scalar {
    if value.is_empty() {
        return Scalar::Empty;
    }

    match parse_number(value) {
        Some(number) => Scalar::Number(number),
        None => Scalar::Text(value.to_string()),
    }
}

/// Only cells that print back exactly as written become numbers. Badges with
/// leading zeros or a `+` sign, long identifiers and values with trailing
/// zeros stay text so the cleaner carries them through unchanged.
fn parse_number(value: &str) -> Option<f64> {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if !digits.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let number = value.parse::<f64>().ok()?;
    (Scalar::Number(number).to_text() == value).then_some(number)
}

#[cfg(test)]
pub(crate) fn parse_cell_for_tests(value: &str) -> Scalar {
    parse_cell(value)
}
