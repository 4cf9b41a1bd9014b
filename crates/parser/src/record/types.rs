//! Основные типы и структуры записей.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;

use crate::error::ParseError;

/// Вид retail-записи.
///
/// Закрытое множество из четырёх видов, каждый со своим layout'ом
/// в обоих форматах:
/// - [`Sales`][RecordKind::Sales]: продажи (`VEN`)
/// - [`Traffic`][RecordKind::Traffic]: посещаемость магазина (`TRF`)
/// - [`Transfer`][RecordKind::Transfer]: перемещения между магазинами (`TRS`)
/// - [`Validation`][RecordKind::Validation]: подтверждения доставки (`VAL`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Строка продажи.
    Sales,
    /// Счётчик посещаемости магазина.
    Traffic,
    /// Перемещение товара между магазинами.
    Transfer,
    /// Подтверждение приёмки доставки.
    Validation,
}

impl RecordKind {
    /// Возвращает канонический код вида записи.
    ///
    /// # Пример
    /// ```
    /// use parser::record::RecordKind;
    /// assert_eq!(RecordKind::Sales.as_str(), "VEN");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "VEN",
            Self::Traffic => "TRF",
            Self::Transfer => "TRS",
            Self::Validation => "VAL",
        }
    }

    /// Префикс имени файла в старом формате (`Ven_*.dat`).
    #[must_use]
    pub const fn old_prefix(&self) -> &'static str {
        match self {
            Self::Sales => "Ven",
            Self::Traffic => "Trf",
            Self::Transfer => "Trs",
            Self::Validation => "Val",
        }
    }

    /// Метка имени файла в новом формате (`*_Sales_*.csv`).
    #[must_use]
    pub const fn new_label(&self) -> &'static str {
        match self {
            Self::Sales => "Sales",
            Self::Traffic => "Traffic",
            Self::Transfer => "Transfers",
            Self::Validation => "Validation",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VEN" => Ok(Self::Sales),
            "TRF" => Ok(Self::Traffic),
            "TRS" => Ok(Self::Transfer),
            "VAL" => Ok(Self::Validation),
            other => Err(ParseError::UnknownRecordKind(other.to_string())),
        }
    }
}

/// Код магазина: тег бренда плюс числовой идентификатор.
///
/// В новом формате код записывается как `<brand>-<number>` (`JAC-778`),
/// в старом — только номер, дополненный нулями до ширины поля (`000778`).
/// Бренд из старого формата восстановить нельзя: он передаётся извне.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCode {
    /// Тег бренда, если известен (только при разборе нового формата).
    pub brand: Option<String>,
    /// Числовой идентификатор магазина.
    pub number: u32,
}

impl StoreCode {
    /// Разбирает код нового формата `<brand>-<number>`.
    ///
    /// Разделение идёт по последнему `-`, так что бренд может сам
    /// содержать дефис. Пробелы по краям игнорируются.
    ///
    /// # Пример
    /// ```
    /// use parser::record::StoreCode;
    /// let code = StoreCode::parse_new("JAC-778", "store_code").unwrap();
    /// assert_eq!(code.brand.as_deref(), Some("JAC"));
    /// assert_eq!(code.number, 778);
    /// ```
    pub fn parse_new(s: &str, field: &'static str) -> Result<Self, ParseError> {
        let trimmed = s.trim();
        let Some((brand, number)) = trimmed.rsplit_once('-') else {
            return Err(ParseError::InvalidValue {
                field,
                expected: "<brand>-<number>",
                actual: s.to_string(),
            });
        };
        let number = number.parse().map_err(|_| ParseError::InvalidValue {
            field,
            expected: "numeric store id after '-'",
            actual: s.to_string(),
        })?;
        Ok(Self { brand: Some(brand.to_string()), number })
    }

    /// Разбирает код из поля старого формата (нули слева отбрасываются).
    pub fn parse_old(s: &str, field: &'static str) -> Result<Self, ParseError> {
        let number = s.trim().parse().map_err(|_| ParseError::InvalidValue {
            field,
            expected: "zero-padded numeric store id",
            actual: s.to_string(),
        })?;
        Ok(Self { brand: None, number })
    }

    /// Рендерит код для нового формата с внешним брендом.
    #[must_use]
    pub fn render_new(&self, brand: &str) -> String {
        format!("{brand}-{}", self.number)
    }

    /// Рендерит код для старого формата: номер, дополненный нулями до 6 знаков.
    #[must_use]
    pub fn render_old(&self) -> String {
        format!("{:06}", self.number)
    }
}

/// Строка продажи.
///
/// Необязательные поля нового формата (время, магазин отгрузки)
/// проверяются по количеству, но не сохраняются: старый формат
/// их не несёт.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesRecord {
    /// Код магазина.
    pub store: StoreCode,
    /// Дата продажи.
    pub date: NaiveDate,
    /// Номер чека.
    pub receipt_number: u64,
    /// Штрихкод товара (хранится дословно, никогда не усекается до числа).
    pub barcode: String,
    /// Количество; отрицательное при возврате.
    pub quantity: i32,
    /// Цена в центах.
    pub price_cents: i64,
    /// Идентификатор кассы (один символ).
    pub pos_id: char,
}

/// Счётчик посещаемости магазина за день.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficRecord {
    /// Код магазина.
    pub store: StoreCode,
    /// Дата подсчёта.
    pub date: NaiveDate,
    /// Количество посетителей.
    pub count: u32,
}

/// Перемещение товара между магазинами.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    /// Дата перемещения.
    pub date: NaiveDate,
    /// Магазин-отправитель.
    pub sender: StoreCode,
    /// Магазин-получатель.
    pub receiver: StoreCode,
    /// Штрихкод товара.
    pub barcode: String,
    /// Количество (только неотрицательное).
    pub quantity: u32,
}

/// Подтверждение приёмки доставки.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRecord {
    /// Код магазина.
    pub store: StoreCode,
    /// Номер посылки (хранится дословно).
    pub parcel_number: String,
    /// Штрихкод товара.
    pub barcode: String,
    /// Количество.
    pub quantity: u32,
    /// Дата приёмки.
    pub date: NaiveDate,
}

/// Одна разобранная запись любого вида.
///
/// Закрытое объединение: каждая операция над записью — исчерпывающий
/// `match`, так что забытый вид записи не компилируется.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Продажа.
    Sales(SalesRecord),
    /// Посещаемость.
    Traffic(TrafficRecord),
    /// Перемещение.
    Transfer(TransferRecord),
    /// Подтверждение доставки.
    Validation(ValidationRecord),
}

impl Record {
    /// Возвращает вид записи.
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Sales(_) => RecordKind::Sales,
            Self::Traffic(_) => RecordKind::Traffic,
            Self::Transfer(_) => RecordKind::Transfer,
            Self::Validation(_) => RecordKind::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_kind_from_str() {
        assert_eq!("VEN".parse::<RecordKind>().unwrap(), RecordKind::Sales);
        assert_eq!("TRF".parse::<RecordKind>().unwrap(), RecordKind::Traffic);
        assert_eq!("TRS".parse::<RecordKind>().unwrap(), RecordKind::Transfer);
        assert_eq!("VAL".parse::<RecordKind>().unwrap(), RecordKind::Validation);
    }

    #[test]
    fn unknown_record_kind_is_an_error() {
        let err = "TRA".parse::<RecordKind>().unwrap_err();
        assert!(matches!(err, ParseError::UnknownRecordKind(ref s) if s == "TRA"));
    }

    #[test]
    fn lowercase_code_is_rejected() {
        assert!("ven".parse::<RecordKind>().is_err());
    }

    #[test]
    fn store_code_from_new_format() {
        let code = StoreCode::parse_new("OKA-1210", "store_code").unwrap();
        assert_eq!(code.brand.as_deref(), Some("OKA"));
        assert_eq!(code.number, 1210);
    }

    #[test]
    fn store_code_with_dash_in_brand() {
        // Разделение по последнему дефису
        let code = StoreCode::parse_new("MY-BRAND-42", "store_code").unwrap();
        assert_eq!(code.brand.as_deref(), Some("MY-BRAND"));
        assert_eq!(code.number, 42);
    }

    #[test]
    fn store_code_trims_whitespace() {
        let code = StoreCode::parse_new("  JAC-778 ", "store_code").unwrap();
        assert_eq!(code.number, 778);
        assert_eq!(code.render_old(), "000778");
    }

    #[test]
    fn store_code_without_dash_fails() {
        assert!(StoreCode::parse_new("778", "store_code").is_err());
    }

    #[test]
    fn store_code_from_old_format_strips_zeros() {
        let code = StoreCode::parse_old("000778", "store_code").unwrap();
        assert_eq!(code.brand, None);
        assert_eq!(code.number, 778);
        assert_eq!(code.render_new("JAC"), "JAC-778");
    }

    #[test]
    fn record_kind_accessor() {
        let record = Record::Traffic(TrafficRecord {
            store: StoreCode { brand: None, number: 778 },
            date: NaiveDate::from_ymd_opt(2022, 3, 29).unwrap(),
            count: 8,
        });
        assert_eq!(record.kind(), RecordKind::Traffic);
    }
}
