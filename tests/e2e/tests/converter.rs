//! E2E тесты для CLI инструмента `converter`.
//!
//! Тестируем обе стороны конвертации (new2old и old2new), выбор
//! выходного имени, discovery входных файлов и обработку ошибок.

use std::{fs, path::Path};

use assert_cmd::Command;
use e2e_tests::fixture;
use predicates::prelude::*;
use tempfile::tempdir;

/// Создать команду для запуска converter.
///
/// `cargo_bin` deprecated из-за edge case с custom build directories,
/// но это единственный способ для кросс-крейтовых бинарников.
#[expect(deprecated)]
fn converter() -> Command {
    Command::cargo_bin("converter").unwrap()
}

/// Найти единственный выходной файл с данным префиксом и расширением.
///
/// Имя выходного файла содержит метку времени, поэтому точное имя
/// заранее неизвестно.
fn find_output(dir: &Path, prefix: &str, ext: &str) -> std::path::PathBuf {
    let matches: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            let name = p.file_name().unwrap().to_string_lossy().into_owned();
            name.starts_with(prefix) && name.ends_with(ext)
        })
        .collect();
    assert_eq!(matches.len(), 1, "expected one {prefix}*{ext} file in {}", dir.display());
    matches.into_iter().next().unwrap()
}

// ============================================================================
// Тесты конвертации: new -> old
// ============================================================================

#[test]
fn test_sales_new2old() {
    let dir = tempdir().unwrap();

    converter()
        .args([
            "new2old",
            "--output_dir",
            dir.path().to_str().unwrap(),
            "--parse_type",
            "VEN",
            fixture("20220101120245_Sales_20012022_1234.csv").to_str().unwrap(),
        ])
        .assert()
        .success();

    let output = find_output(dir.path(), "Ven_20012022_1234_", ".dat");
    let content = fs::read_to_string(output).unwrap();
    assert_eq!(
        content,
        "0007782022032336036522366280004132369000010000395001\n\
         0007782022032336042772114100004132370-00010000029992"
    );
}

#[test]
fn test_traffic_new2old() {
    let dir = tempdir().unwrap();

    converter()
        .args([
            "new2old",
            "--output_dir",
            dir.path().to_str().unwrap(),
            "--parse_type",
            "TRF",
            fixture("20220101120245_Traffic_20012022.csv").to_str().unwrap(),
        ])
        .assert()
        .success();

    let output = find_output(dir.path(), "Trf_20012022_", ".dat");
    assert_eq!(fs::read_to_string(output).unwrap(), "000778202203290008");
}

// ============================================================================
// Тесты конвертации: old -> new (бренд передаётся аргументом)
// ============================================================================

#[test]
fn test_sales_old2new() {
    let dir = tempdir().unwrap();

    converter()
        .args([
            "old2new",
            "--output_dir",
            dir.path().to_str().unwrap(),
            "--parse_type",
            "VEN",
            fixture("Ven_20012022_1234.dat").to_str().unwrap(),
            "JAC",
        ])
        .assert()
        .success();

    let output = find_output(dir.path(), "Sales_20012022_1234_", ".csv");
    assert_eq!(
        fs::read_to_string(output).unwrap(),
        "JAC-778;2022-03-23;;4132369;3603652236628;1;395.00;1"
    );
}

#[test]
fn test_transfer_old2new() {
    let dir = tempdir().unwrap();

    converter()
        .args([
            "old2new",
            "--output_dir",
            dir.path().to_str().unwrap(),
            "--parse_type",
            "TRS",
            fixture("Trs_20012022.dat").to_str().unwrap(),
            "OKA",
        ])
        .assert()
        .success();

    let output = find_output(dir.path(), "Transfers_20012022_", ".csv");
    assert_eq!(
        fs::read_to_string(output).unwrap(),
        "2021-11-01;;OKA-1210;OKA-1889;3604277211410;5"
    );
}

// ============================================================================
// Round-trip: new -> old -> new
// ============================================================================

#[test]
fn test_roundtrip_sales_via_old() {
    let dir = tempdir().unwrap();

    converter()
        .args([
            "new2old",
            "--output_dir",
            dir.path().to_str().unwrap(),
            "--parse_type",
            "VEN",
            fixture("20220101120245_Sales_20012022_1234.csv").to_str().unwrap(),
        ])
        .assert()
        .success();
    let intermediate = find_output(dir.path(), "Ven_", ".dat");

    let back_dir = tempdir().unwrap();
    converter()
        .args([
            "old2new",
            "--output_dir",
            back_dir.path().to_str().unwrap(),
            "--parse_type",
            "VEN",
            intermediate.to_str().unwrap(),
            "JAC",
        ])
        .assert()
        .success();

    // Время продажи и магазин отгрузки потеряны, остальное совпадает
    let final_output = find_output(back_dir.path(), "Sales_", ".csv");
    assert_eq!(
        fs::read_to_string(final_output).unwrap(),
        "JAC-778;2022-03-23;;4132369;3603652236628;1;395.00;1\n\
         JAC-778;2022-03-23;;4132370;3604277211410;-1;29.99;2"
    );
}

// ============================================================================
// Discovery: директория и паттерн
// ============================================================================

#[test]
fn test_directory_input_converts_every_file() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    fs::copy(fixture("Ven_20012022_1234.dat"), input_dir.path().join("Ven_1.dat")).unwrap();
    fs::copy(fixture("Ven_20012022_1234.dat"), input_dir.path().join("Ven_2.dat")).unwrap();

    converter()
        .args([
            "old2new",
            "--output_dir",
            output_dir.path().to_str().unwrap(),
            "--parse_type",
            "VEN",
            input_dir.path().to_str().unwrap(),
            "JAC",
        ])
        .assert()
        .success();

    let outputs = fs::read_dir(output_dir.path()).unwrap().count();
    assert_eq!(outputs, 2);
}

#[test]
fn test_pattern_input_filters_files() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    fs::copy(fixture("Ven_20012022_1234.dat"), input_dir.path().join("Ven_1.dat")).unwrap();
    fs::copy(fixture("Trs_20012022.dat"), input_dir.path().join("Trs_1.dat")).unwrap();

    let pattern = input_dir.path().join("Ven_*.dat");
    converter()
        .args([
            "old2new",
            "--output_dir",
            output_dir.path().to_str().unwrap(),
            "--parse_type",
            "VEN",
            pattern.to_str().unwrap(),
            "JAC",
        ])
        .assert()
        .success();

    // Только Ven_1.dat подошёл под паттерн
    let outputs = fs::read_dir(output_dir.path()).unwrap().count();
    assert_eq!(outputs, 1);
}

// ============================================================================
// Тесты обработки ошибок
// ============================================================================

#[test]
fn test_unknown_parse_type() {
    converter()
        .args([
            "new2old",
            "--parse_type",
            "TRA",
            fixture("20220101120245_Sales_20012022_1234.csv").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'TRA'"));
}

#[test]
fn test_missing_input_file() {
    converter()
        .args(["new2old", "--parse_type", "VEN", "/nonexistent/Sales_1.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_missing_output_dir() {
    converter()
        .args([
            "new2old",
            "--output_dir",
            "/nonexistent/out",
            "--parse_type",
            "VEN",
            fixture("20220101120245_Sales_20012022_1234.csv").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_malformed_record_aborts_file() {
    let dir = tempdir().unwrap();

    converter()
        .args([
            "new2old",
            "--output_dir",
            dir.path().to_str().unwrap(),
            "--parse_type",
            "VEN",
            fixture("Sales_malformed.csv").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 1"));

    // Частичный вывод не пишется
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_old2new_requires_brand_code() {
    converter()
        .args([
            "old2new",
            "--parse_type",
            "VEN",
            fixture("Ven_20012022_1234.dat").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("BRAND_CODE"));
}
