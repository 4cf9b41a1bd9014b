//! # e2e-tests - End-to-end тесты CLI инструментов
//!
//! Этот крейт содержит e2e тесты для CLI инструмента `converter` —
//! конвертера retail-файлов между форматами SOLS.
//!
//! ## Фикстуры
//!
//! Тестовые файлы расположены в `fixtures/`:
//! - `20220101120245_Sales_20012022_1234.csv` — продажи, новый формат
//! - `Ven_20012022_1234.dat` — продажи, старый формат
//! - `20220101120245_Traffic_20012022.csv` — посещаемость, новый формат
//! - `Trs_20012022.dat` — перемещение, старый формат
//! - `Sales_malformed.csv` — строка продажи с недостающими полями

use std::path::PathBuf;

/// Получить путь к директории фикстур.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Получить путь к фикстуре по имени файла.
pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}
