//! Old (positional) format codec.
//!
//! The old format packs each record into a fixed-width line with no
//! delimiters: compact dates (`YYYYMMDD`), zero-padded numeric fields and
//! brand-agnostic store codes. Field positions come from
//! [`record::layout`](crate::record::layout).
//!
//! # Format
//!
//! ```text
//! 0007782022032336036522366280004132369000010000395001
//! ```
//!
//! Parsing validates the line width against the layout total before any
//! slicing, so a drifted line fails whole instead of producing misaligned
//! fields.

use chrono::NaiveDate;

use crate::{
    error::{ParseError, ParseResult},
    record::{
        Record, RecordKind, SalesRecord, StoreCode, TrafficRecord, TransferRecord,
        ValidationRecord,
        layout::{sales, traffic, transfer, validation},
    },
};

/// Parses one fixed-width line into a typed record.
pub fn parse(kind: RecordKind, line: &str) -> ParseResult<Record> {
    check_width(kind, line)?;
    match kind {
        RecordKind::Sales => parse_sales(line).map(Record::Sales),
        RecordKind::Traffic => parse_traffic(line).map(Record::Traffic),
        RecordKind::Transfer => parse_transfer(line).map(Record::Transfer),
        RecordKind::Validation => parse_validation(line).map(Record::Validation),
    }
}

/// Renders a typed record as one fixed-width line.
///
/// Numeric fields are zero-padded to their layout width; barcodes and
/// parcel numbers are left-padded verbatim. The output width always
/// matches the layout total for the record's kind.
#[must_use]
pub fn render(record: &Record) -> String {
    match record {
        Record::Sales(sales) => format!(
            "{}{}{:0>13}{:010}{}{:09}{}",
            sales.store.render_old(),
            sales.date.format("%Y%m%d"),
            sales.barcode,
            sales.receipt_number,
            render_signed_quantity(sales.quantity),
            sales.price_cents,
            sales.pos_id,
        ),
        Record::Traffic(traffic) => format!(
            "{}{}{:04}",
            traffic.store.render_old(),
            traffic.date.format("%Y%m%d"),
            traffic.count,
        ),
        Record::Transfer(transfer) => format!(
            "{}{}{}{:0>13}{:04}",
            transfer.date.format("%Y%m%d"),
            transfer.sender.render_old(),
            transfer.receiver.render_old(),
            transfer.barcode,
            transfer.quantity,
        ),
        Record::Validation(validation) => format!(
            "{}{:0>20}{:0>13}{:05}{}",
            validation.store.render_old(),
            validation.parcel_number,
            validation.barcode,
            validation.quantity,
            validation.date.format("%Y%m%d"),
        ),
    }
}

/// Full line width of the old format for a record kind.
#[must_use]
pub const fn total_width(kind: RecordKind) -> usize {
    match kind {
        RecordKind::Sales => sales::TOTAL_WIDTH,
        RecordKind::Traffic => traffic::TOTAL_WIDTH,
        RecordKind::Transfer => transfer::TOTAL_WIDTH,
        RecordKind::Validation => validation::TOTAL_WIDTH,
    }
}

fn check_width(kind: RecordKind, line: &str) -> ParseResult<()> {
    if !line.is_ascii() {
        return Err(ParseError::InvalidValue {
            field: "line",
            expected: "ASCII characters only",
            actual: line.to_string(),
        });
    }
    let expected = total_width(kind);
    if line.len() != expected {
        return Err(ParseError::LineWidth { kind, expected, actual: line.len() });
    }
    Ok(())
}

fn parse_sales(line: &str) -> ParseResult<SalesRecord> {
    Ok(SalesRecord {
        store: StoreCode::parse_old(sales::STORE.slice(line), "store_code")?,
        date: parse_date(sales::DATE.slice(line))?,
        barcode: sales::BARCODE.slice(line).to_string(),
        receipt_number: parse_int(sales::RECEIPT.slice(line), "receipt_number")?,
        quantity: parse_signed_quantity(sales::QUANTITY.slice(line))?,
        price_cents: parse_int(sales::PRICE.slice(line), "price")?,
        // Width 1, checked against the layout total
        pos_id: sales::POS_ID.slice(line).chars().next().ok_or_else(|| {
            ParseError::InvalidValue {
                field: "pos_id",
                expected: "one character",
                actual: String::new(),
            }
        })?,
    })
}

fn parse_traffic(line: &str) -> ParseResult<TrafficRecord> {
    Ok(TrafficRecord {
        store: StoreCode::parse_old(traffic::STORE.slice(line), "store_code")?,
        date: parse_date(traffic::DATE.slice(line))?,
        count: parse_int(traffic::COUNT.slice(line), "traffic_count")?,
    })
}

fn parse_transfer(line: &str) -> ParseResult<TransferRecord> {
    Ok(TransferRecord {
        date: parse_date(transfer::DATE.slice(line))?,
        sender: StoreCode::parse_old(transfer::SENDER.slice(line), "sender_code")?,
        receiver: StoreCode::parse_old(transfer::RECEIVER.slice(line), "receiver_code")?,
        barcode: transfer::BARCODE.slice(line).to_string(),
        quantity: parse_int(transfer::QUANTITY.slice(line), "quantity")?,
    })
}

fn parse_validation(line: &str) -> ParseResult<ValidationRecord> {
    Ok(ValidationRecord {
        store: StoreCode::parse_old(validation::STORE.slice(line), "store_code")?,
        parcel_number: validation::PARCEL.slice(line).to_string(),
        barcode: validation::BARCODE.slice(line).to_string(),
        quantity: parse_int(validation::QUANTITY.slice(line), "quantity")?,
        date: parse_date(validation::DATE.slice(line))?,
    })
}

fn parse_date(s: &str) -> ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y%m%d").map_err(|_| ParseError::MalformedDate(s.to_string()))
}

fn parse_int<T: std::str::FromStr>(s: &str, field: &'static str) -> ParseResult<T> {
    s.trim().parse().map_err(|_| ParseError::InvalidValue {
        field,
        expected: "zero-padded integer",
        actual: s.to_string(),
    })
}

/// Decodes the 5-character signed quantity field.
///
/// A `-` in the leading position means minus the remaining four digits;
/// otherwise the whole field is a non-negative zero-padded integer.
fn parse_signed_quantity(s: &str) -> ParseResult<i32> {
    let invalid = || ParseError::InvalidValue {
        field: "quantity",
        expected: "5 zero-padded digits or '-' plus 4 digits",
        actual: s.to_string(),
    };

    if let Some(digits) = s.strip_prefix('-') {
        let magnitude: i32 = digits.parse().map_err(|_| invalid())?;
        Ok(-magnitude)
    } else {
        s.parse().map_err(|_| invalid())
    }
}

/// Encodes a signed quantity into the 5-character field.
///
/// Non-negative values (zero included) zero-pad to five digits; negative
/// values render `-` plus the magnitude zero-padded to four.
fn render_signed_quantity(quantity: i32) -> String {
    if quantity >= 0 {
        format!("{quantity:05}")
    } else {
        format!("-{:04}", quantity.unsigned_abs())
    }
}
