//! Библиотека конвертации retail-файлов между форматами SOLS.
//!
//! Этот крейт предоставляет модель записей и кодеки для перевода файлов
//! транзакций розничной сети между двумя форматами:
//!
//! - **New** — delimited-формат с разделителем `;`, датами `YYYY-MM-DD`
//!   и кодами магазинов с префиксом бренда (`JAC-778`)
//! - **Old** — legacy positional-формат фиксированной ширины без
//!   разделителей, с датами `YYYYMMDD` и числовыми кодами (`000778`)
//!
//! Четыре вида записей: продажи (`VEN`), посещаемость (`TRF`),
//! перемещения между магазинами (`TRS`), подтверждения доставки (`VAL`).
//!
//! # Быстрый старт
//!
//! ```
//! use parser::{convert, record::RecordKind};
//!
//! let text = "JAC-778;2022-03-23;13-15-22;4132369;3603652236628;1;395.00;1";
//! let old = convert::new_to_old(RecordKind::Sales, text)?;
//! assert_eq!(old, "0007782022032336036522366280004132369000010000395001");
//!
//! // Бренд восстановить из старого формата нельзя — он передаётся извне
//! let new = convert::old_to_new(RecordKind::Sales, &old, "JAC")?;
//! assert_eq!(new, "JAC-778;2022-03-23;;4132369;3603652236628;1;395.00;1");
//! # Ok::<(), parser::error::ParseError>(())
//! ```

pub mod convert;
pub mod error;
pub mod format;
pub mod record;

/// Удобный набор импортов для потребителей крейта.
pub mod prelude {
    pub use crate::{
        convert::{new_to_old, old_to_new},
        error::{ParseError, ParseResult},
        format::Format,
        record::{Record, RecordKind},
    };
}
