//! Модель данных retail-записей.
//!
//! Этот модуль определяет четыре вида записей и связанные типы,
//! общие для обоих форматов (delimited и positional).

pub mod layout;
mod types;

pub use types::{
    Record, RecordKind, SalesRecord, StoreCode, TrafficRecord, TransferRecord,
    ValidationRecord,
};
