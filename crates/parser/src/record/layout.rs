//! Layout старого (positional) формата: именованные пары offset/width.
//!
//! Каждый вид записи описан набором констант [`Field`] и общей шириной
//! строки. Непрерывность полей и итоговая ширина проверяются `const`-
//! ассертами: сдвиг layout'а ломает компиляцию, а не молча усекает поля.

/// Поле фиксированной ширины: смещение и ширина в символах.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Смещение от начала строки.
    pub offset: usize,
    /// Ширина поля.
    pub width: usize,
}

impl Field {
    /// Смещение первого символа за полем.
    #[must_use]
    pub const fn end(self) -> usize {
        self.offset + self.width
    }

    /// Вырезает поле из строки.
    ///
    /// Строка должна быть ASCII и не короче [`end`][Field::end]
    /// (это проверяется один раз перед разбором всей записи).
    #[must_use]
    pub fn slice(self, line: &str) -> &str {
        &line[self.offset..self.end()]
    }
}

/// Проверяет, что поля идут подряд без зазоров и заканчиваются на `total`.
const fn contiguous(fields: &[Field], total: usize) -> bool {
    let mut expected = 0;
    let mut i = 0;
    while i < fields.len() {
        if fields[i].offset != expected {
            return false;
        }
        expected = fields[i].end();
        i += 1;
    }
    expected == total
}

/// Layout строки продажи: 52 символа.
pub mod sales {
    use super::{Field, contiguous};

    pub const STORE: Field = Field { offset: 0, width: 6 };
    pub const DATE: Field = Field { offset: 6, width: 8 };
    pub const BARCODE: Field = Field { offset: 14, width: 13 };
    pub const RECEIPT: Field = Field { offset: 27, width: 10 };
    pub const QUANTITY: Field = Field { offset: 37, width: 5 };
    pub const PRICE: Field = Field { offset: 42, width: 9 };
    pub const POS_ID: Field = Field { offset: 51, width: 1 };

    /// Полная ширина строки.
    pub const TOTAL_WIDTH: usize = 52;

    const _: () = assert!(contiguous(
        &[STORE, DATE, BARCODE, RECEIPT, QUANTITY, PRICE, POS_ID],
        TOTAL_WIDTH
    ));
}

/// Layout строки посещаемости: 18 символов.
pub mod traffic {
    use super::{Field, contiguous};

    pub const STORE: Field = Field { offset: 0, width: 6 };
    pub const DATE: Field = Field { offset: 6, width: 8 };
    pub const COUNT: Field = Field { offset: 14, width: 4 };

    /// Полная ширина строки.
    pub const TOTAL_WIDTH: usize = 18;

    const _: () = assert!(contiguous(&[STORE, DATE, COUNT], TOTAL_WIDTH));
}

/// Layout строки перемещения: 37 символов.
pub mod transfer {
    use super::{Field, contiguous};

    pub const DATE: Field = Field { offset: 0, width: 8 };
    pub const SENDER: Field = Field { offset: 8, width: 6 };
    pub const RECEIVER: Field = Field { offset: 14, width: 6 };
    pub const BARCODE: Field = Field { offset: 20, width: 13 };
    pub const QUANTITY: Field = Field { offset: 33, width: 4 };

    /// Полная ширина строки.
    pub const TOTAL_WIDTH: usize = 37;

    const _: () =
        assert!(contiguous(&[DATE, SENDER, RECEIVER, BARCODE, QUANTITY], TOTAL_WIDTH));
}

/// Layout строки подтверждения доставки: 52 символа.
pub mod validation {
    use super::{Field, contiguous};

    pub const STORE: Field = Field { offset: 0, width: 6 };
    pub const PARCEL: Field = Field { offset: 6, width: 20 };
    pub const BARCODE: Field = Field { offset: 26, width: 13 };
    pub const QUANTITY: Field = Field { offset: 39, width: 5 };
    pub const DATE: Field = Field { offset: 44, width: 8 };

    /// Полная ширина строки.
    pub const TOTAL_WIDTH: usize = 52;

    const _: () =
        assert!(contiguous(&[STORE, PARCEL, BARCODE, QUANTITY, DATE], TOTAL_WIDTH));
}
