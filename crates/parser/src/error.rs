//! Модуль ошибок парсинга записей.

use thiserror::Error;

use crate::record::RecordKind;

/// Главная ошибка парсинга записей.
///
/// Объединяет все возможные ошибки при работе с форматами SOLS:
/// I/O ошибки, ошибки разбора delimited- и positional-формата.
#[derive(Debug, Error)]
pub enum ParseError {
    // === I/O ошибки ===
    /// Ошибка ввода/вывода.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка чтения delimited-строки.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // === Ошибки delimited-формата (new) ===
    /// Количество полей вне допустимого диапазона.
    #[error("{kind} record: expected {expected} fields, got {actual}")]
    FieldCount {
        /// Вид записи.
        kind: RecordKind,
        /// Допустимое количество полей ("8 or 9", "exactly 6", ...).
        expected: &'static str,
        /// Фактическое количество полей.
        actual: usize,
    },

    /// Некорректное значение поля.
    #[error("Invalid value for {field}: expected {expected}, got '{actual}'")]
    InvalidValue {
        /// Имя поля.
        field: &'static str,
        /// Ожидаемый тип/формат.
        expected: &'static str,
        /// Фактическое значение.
        actual: String,
    },

    /// Дата не соответствует ожидаемому формату.
    #[error("Malformed date: '{0}'")]
    MalformedDate(String),

    // === Ошибки positional-формата (old) ===
    /// Длина строки не совпадает с шириной layout'а.
    #[error("{kind} record: expected a {expected}-character line, got {actual}")]
    LineWidth {
        /// Вид записи.
        kind: RecordKind,
        /// Ожидаемая ширина строки.
        expected: usize,
        /// Фактическая ширина.
        actual: usize,
    },

    // === Ошибки диспетчеризации ===
    /// Неизвестный код вида записи.
    #[error("Unknown record kind: '{0}' (expected VEN, TRF, TRS or VAL)")]
    UnknownRecordKind(String),

    // === Контекст строки файла ===
    /// Ошибка с номером строки файла (1-based).
    #[error("line {line}: {source}")]
    Line {
        /// Номер строки (1-based).
        line: usize,
        /// Исходная ошибка.
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    /// Оборачивает ошибку номером строки файла (1-based).
    ///
    /// Уже обёрнутая ошибка не оборачивается повторно.
    #[must_use]
    pub fn at_line(self, line: usize) -> Self {
        match self {
            err @ Self::Line { .. } => err,
            err => Self::Line { line, source: Box::new(err) },
        }
    }
}

/// Удобный alias для Result с ParseError.
pub type ParseResult<T> = Result<T, ParseError>;
