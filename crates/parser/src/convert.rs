//! Перевод целого файла между форматами.
//!
//! Текст разбивается на строки, каждая строка прогоняется через пару
//! кодеков (parse одного формата, render другого), результат собирается
//! через `\n`. Первая же ошибка прерывает перевод всего файла — частичный
//! вывод не возвращается, а ошибка несёт номер строки (1-based).

use crate::{
    error::ParseResult,
    format::{new, old},
    record::RecordKind,
};

/// Переводит текст файла из нового (delimited) формата в старый (positional).
///
/// # Пример
///
/// ```
/// use parser::{convert, record::RecordKind};
///
/// let text = "JAC-778;2022-03-23;13-15-22;4132369;3603652236628;1;395.00;1";
/// let out = convert::new_to_old(RecordKind::Sales, text).unwrap();
/// assert_eq!(out, "0007782022032336036522366280004132369000010000395001");
/// ```
pub fn new_to_old(kind: RecordKind, text: &str) -> ParseResult<String> {
    translate(text, |line| {
        let record = new::parse(kind, line)?;
        Ok(old::render(&record))
    })
}

/// Переводит текст файла из старого формата в новый.
///
/// `brand` подставляется перед каждым числовым кодом магазина:
/// из самого старого формата бренд восстановить нельзя.
pub fn old_to_new(kind: RecordKind, text: &str, brand: &str) -> ParseResult<String> {
    translate(text, |line| {
        let record = old::parse(kind, line)?;
        Ok(new::render(&record, brand))
    })
}

/// Построчный драйвер: применяет `line_fn` к каждой строке по порядку.
///
/// Хвостовой перевод строки не порождает пустой строки; строки файла
/// независимы, состояние между ними не переносится.
fn translate<F>(text: &str, line_fn: F) -> ParseResult<String>
where
    F: Fn(&str) -> ParseResult<String>,
{
    let lines: Vec<String> = text
        .lines()
        .enumerate()
        .map(|(idx, line)| line_fn(line).map_err(|e| e.at_line(idx + 1)))
        .collect::<ParseResult<_>>()?;
    Ok(lines.join("\n"))
}
