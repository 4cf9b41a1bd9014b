//! New (delimited) format codec.
//!
//! The new format is a `;`-delimited line per record, with human-readable
//! dates (`YYYY-MM-DD`) and brand-prefixed store codes (`JAC-778`).
//!
//! # Format
//!
//! ```csv
//! JAC-778;2022-03-23;13-15-22;4132369;3603652236628;1;395.00;1
//! ```
//!
//! Optional trailing fields (timestamps, auxiliary traffic counts, the
//! ship-from store) are accepted and count-checked, but dropped: the old
//! format has no room for them.

use chrono::NaiveDate;
use csv::StringRecord;

use crate::{
    error::{ParseError, ParseResult},
    record::{
        Record, RecordKind, SalesRecord, StoreCode, TrafficRecord, TransferRecord,
        ValidationRecord,
    },
};

/// Parses one delimited line into a typed record.
///
/// Dispatches on `kind` with an exhaustive match; the field layout is
/// fixed per record kind.
pub fn parse(kind: RecordKind, line: &str) -> ParseResult<Record> {
    match kind {
        RecordKind::Sales => parse_sales(line).map(Record::Sales),
        RecordKind::Traffic => parse_traffic(line).map(Record::Traffic),
        RecordKind::Transfer => parse_transfer(line).map(Record::Transfer),
        RecordKind::Validation => parse_validation(line).map(Record::Validation),
    }
}

/// Renders a typed record as one delimited line.
///
/// `brand` prefixes every store code; dropped optional fields render as
/// empty placeholders (e.g. the time field after a sale's date).
#[must_use]
pub fn render(record: &Record, brand: &str) -> String {
    match record {
        Record::Sales(sales) => format!(
            "{};{};;{};{};{};{};{}",
            sales.store.render_new(brand),
            sales.date.format("%Y-%m-%d"),
            sales.receipt_number,
            sales.barcode,
            sales.quantity,
            format_price(sales.price_cents),
            sales.pos_id,
        ),
        Record::Traffic(traffic) => format!(
            "{};{};{}",
            traffic.store.render_new(brand),
            traffic.date.format("%Y-%m-%d"),
            traffic.count,
        ),
        Record::Transfer(transfer) => format!(
            "{};;{};{};{};{}",
            transfer.date.format("%Y-%m-%d"),
            transfer.sender.render_new(brand),
            transfer.receiver.render_new(brand),
            transfer.barcode,
            transfer.quantity,
        ),
        Record::Validation(validation) => format!(
            "{};{};{};{};{}",
            validation.store.render_new(brand),
            validation.parcel_number,
            validation.barcode,
            validation.quantity,
            validation.date.format("%Y-%m-%d"),
        ),
    }
}

/// Splits one line on `;` through a headerless csv reader.
fn split_line(line: &str) -> ParseResult<StringRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(Ok(fields)) => Ok(fields),
        Some(Err(e)) => Err(ParseError::Csv(e)),
        None => Ok(StringRecord::new()),
    }
}

fn parse_sales(line: &str) -> ParseResult<SalesRecord> {
    let fields = split_line(line)?;
    if !(8..=9).contains(&fields.len()) {
        return Err(ParseError::FieldCount {
            kind: RecordKind::Sales,
            expected: "8 or 9",
            actual: fields.len(),
        });
    }

    Ok(SalesRecord {
        store: StoreCode::parse_new(&fields[0], "store_code")?,
        date: parse_date(&fields[1])?,
        // fields[2] is the sale time, dropped
        receipt_number: parse_int(&fields[3], "receipt_number", "unsigned integer")?,
        barcode: fields[4].trim().to_string(),
        quantity: parse_int(&fields[5], "quantity", "signed integer")?,
        price_cents: parse_price_cents(&fields[6])?,
        pos_id: first_char(&fields[7], "pos_id")?,
        // fields[8], if present, is the ship-from store, dropped
    })
}

fn parse_traffic(line: &str) -> ParseResult<TrafficRecord> {
    let fields = split_line(line)?;
    if !(3..=6).contains(&fields.len()) {
        return Err(ParseError::FieldCount {
            kind: RecordKind::Traffic,
            expected: "3 to 6",
            actual: fields.len(),
        });
    }

    Ok(TrafficRecord {
        store: StoreCode::parse_new(&fields[0], "store_code")?,
        date: parse_date(&fields[1])?,
        count: parse_int(&fields[2], "traffic_count", "unsigned integer")?,
        // fields[3..], if present, are receipt counters, dropped
    })
}

fn parse_transfer(line: &str) -> ParseResult<TransferRecord> {
    let fields = split_line(line)?;
    if fields.len() != 6 {
        return Err(ParseError::FieldCount {
            kind: RecordKind::Transfer,
            expected: "exactly 6",
            actual: fields.len(),
        });
    }

    Ok(TransferRecord {
        date: parse_date(&fields[0])?,
        // fields[1] is the transfer time, dropped
        sender: StoreCode::parse_new(&fields[2], "sender_code")?,
        receiver: StoreCode::parse_new(&fields[3], "receiver_code")?,
        barcode: fields[4].trim().to_string(),
        quantity: parse_int(&fields[5], "quantity", "non-negative integer")?,
    })
}

fn parse_validation(line: &str) -> ParseResult<ValidationRecord> {
    let fields = split_line(line)?;
    if !(5..=7).contains(&fields.len()) {
        return Err(ParseError::FieldCount {
            kind: RecordKind::Validation,
            expected: "5 to 7",
            actual: fields.len(),
        });
    }

    Ok(ValidationRecord {
        store: StoreCode::parse_new(&fields[0], "store_code")?,
        parcel_number: fields[1].trim().to_string(),
        barcode: fields[2].trim().to_string(),
        quantity: parse_int(&fields[3], "quantity", "non-negative integer")?,
        date: parse_date(&fields[4])?,
        // fields[5..], if present, are reception time stamps, dropped
    })
}

fn parse_date(s: &str) -> ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ParseError::MalformedDate(s.to_string()))
}

fn parse_int<T: std::str::FromStr>(
    s: &str,
    field: &'static str,
    expected: &'static str,
) -> ParseResult<T> {
    s.trim().parse().map_err(|_| ParseError::InvalidValue {
        field,
        expected,
        actual: s.to_string(),
    })
}

fn first_char(s: &str, field: &'static str) -> ParseResult<char> {
    s.trim().chars().next().ok_or_else(|| ParseError::InvalidValue {
        field,
        expected: "at least one character",
        actual: s.to_string(),
    })
}

/// Converts a decimal price string (`,` or `.` separator) to integer cents.
///
/// The conversion is textual: no float round-trip, so values like `3.95`
/// come out as exactly 395 cents. Fraction digits past the second are
/// truncated.
fn parse_price_cents(s: &str) -> ParseResult<i64> {
    let invalid = || ParseError::InvalidValue {
        field: "price",
        expected: "decimal with 2 fraction digits",
        actual: s.to_string(),
    };

    let normalized = s.trim().replace(',', ".");
    let (units, fraction) = match normalized.split_once('.') {
        Some((units, fraction)) => (units, fraction),
        None => (normalized.as_str(), ""),
    };
    if units.is_empty() || !units.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let units: i64 = units.parse().map_err(|_| invalid())?;
    let cents: i64 = format!("{:0<2}", &fraction[..fraction.len().min(2)])
        .parse()
        .map_err(|_| invalid())?;
    Ok(units * 100 + cents)
}

/// Formats integer cents as a decimal with exactly two fraction digits.
fn format_price(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}
