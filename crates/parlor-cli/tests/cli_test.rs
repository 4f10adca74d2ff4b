//! CLI integration tests using assert_cmd
//!
//! Every test keeps its datasets in a temporary directory via `--data-dir`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command instance for the parlor binary
fn parlor_cmd() -> Command {
    let mut cmd = Command::cargo_bin("parlor").expect("Failed to find parlor binary");
    cmd.env_remove("PARLOR_CONFIG").env_remove("RUST_LOG");
    cmd
}

/// Command bound to a data directory
fn parlor_in(dir: &TempDir) -> Command {
    let mut cmd = parlor_cmd();
    cmd.arg("--data-dir").arg(dir.path());
    cmd
}

#[test]
fn test_help_command() {
    parlor_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Parlor - inventory, sales and order ledger",
        ));
}

#[test]
fn test_version_command() {
    parlor_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("parlor"));
}

#[test]
fn test_orders_help() {
    parlor_cmd()
        .arg("orders")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("set-status"));
}

#[test]
fn test_init_creates_datasets() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    parlor_in(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("10 products in catalog"));

    assert_eq!(
        fs::read_to_string(dir.path().join("inventory.csv")).unwrap(),
        "Date,Product,Quantity,Unit,Price,Total\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("orders.csv")).unwrap(),
        "Date,Product,Quantity,Unit,Price,Total,Party,Advance,Status\n"
    );
    assert!(dir.path().join("sales.csv").exists());
    assert!(dir.path().join("products.json").exists());

    // Second run changes nothing
    parlor_in(&dir).arg("init").assert().success();
    assert_eq!(
        fs::read_to_string(dir.path().join("inventory.csv")).unwrap(),
        "Date,Product,Quantity,Unit,Price,Total\n"
    );
}

#[test]
fn test_inventory_add_uses_catalog_unit() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    parlor_in(&dir)
        .args(["inventory", "add", "--product", "Paneer"])
        .args(["--quantity", "2.5", "--price", "320", "--date", "2024-02-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("800.00"));

    assert_eq!(
        fs::read_to_string(dir.path().join("inventory.csv")).unwrap(),
        "Date,Product,Quantity,Unit,Price,Total\n2024-02-10,Paneer,2.5,kg,320.0,800.0\n"
    );
}

#[test]
fn test_sales_add_with_explicit_unit() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    parlor_in(&dir)
        .args(["sales", "add", "--product", "Lassi", "--unit", "nos"])
        .args(["--quantity", "4", "--price", "25", "--date", "2024-02-11"])
        .assert()
        .success();

    parlor_in(&dir)
        .args(["sales", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lassi"))
        .stdout(predicate::str::contains("100.0"));

    // Explicit unit never touches the catalog
    assert!(!dir.path().join("products.json").exists());
}

#[test]
fn test_invalid_unit_is_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    parlor_in(&dir)
        .args(["sales", "add", "--product", "Lassi", "--unit", "gallon"])
        .args(["--quantity", "1", "--price", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid unit"));
}

#[test]
fn test_negative_price_is_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    parlor_in(&dir)
        .args(["inventory", "add", "--product", "Milk", "--unit", "ltr"])
        .args(["--quantity", "1", "--price=-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Price must be a non-negative number"));

    assert!(!dir.path().join("inventory.csv").exists());
}

#[test]
fn test_order_lifecycle() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    parlor_in(&dir).arg("init").assert().success();
    parlor_in(&dir)
        .args(["orders", "add", "--product", "Milk", "--quantity", "10"])
        .args(["--price", "50", "--party", "Acme", "--advance", "100"])
        .args(["--date", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending"));

    parlor_in(&dir)
        .args(["orders", "set-status", "0", "Completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Order 0 status set to Completed."));

    assert_eq!(
        fs::read_to_string(dir.path().join("orders.csv")).unwrap(),
        "Date,Product,Quantity,Unit,Price,Total,Party,Advance,Status\n\
         2024-01-01,Milk,10.0,ltr,50.0,500.0,Acme,100.0,Completed\n"
    );
}

#[test]
fn test_set_status_rejects_unknown_row_and_status() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    parlor_in(&dir).arg("init").assert().success();

    parlor_in(&dir)
        .args(["orders", "set-status", "3", "Completed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));

    parlor_in(&dir)
        .args(["orders", "set-status", "0", "Shipped"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid status"));
}

#[test]
fn test_products_add_and_duplicate() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    parlor_in(&dir)
        .args(["products", "add", "Ghee", "--unit", "kg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product 'Ghee' added with unit 'kg'."));

    parlor_in(&dir)
        .args(["products", "add", "Milk", "--unit", "kg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Product 'Milk' already exists"));

    parlor_in(&dir)
        .args(["products", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Milk\": \"ltr\""))
        .stdout(predicate::str::contains("\"Ghee\": \"kg\""));
}

#[test]
fn test_report_totals() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    for (date, qty, price) in [("2024-01-01", "10", "40"), ("2024-01-05", "5", "40")] {
        parlor_in(&dir)
            .args(["inventory", "add", "--product", "Milk", "--unit", "ltr"])
            .args(["--quantity", qty, "--price", price, "--date", date])
            .assert()
            .success();
    }
    parlor_in(&dir)
        .args(["sales", "add", "--product", "Dahi", "--unit", "kg"])
        .args(["--quantity", "2", "--price", "80", "--date", "2024-01-02"])
        .assert()
        .success();

    parlor_in(&dir)
        .args(["report", "--start", "2024-01-01", "--end", "2024-01-03", "--summary-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inventory cost:      400.00"))
        .stdout(predicate::str::contains("Total sales:         160.00"))
        .stdout(predicate::str::contains("Inventory added qty: 10.00"))
        .stdout(predicate::str::contains("Total orders qty:    0.00"));

    parlor_in(&dir)
        .args(["report", "--start", "2024-01-01", "--end", "2024-01-31"])
        .args(["--product", "Milk", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"inventory_cost\": 600.0"))
        .stdout(predicate::str::contains("\"sales_total\": 0.0"));
}

#[test]
fn test_report_rejects_reversed_range() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    parlor_in(&dir)
        .args(["report", "--start", "2024-02-01", "--end", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is after end date"));
}

#[test]
fn test_config_file_selects_backend() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let root = dir.path().join("store");
    let config = dir.path().join("config.json");
    fs::write(
        &config,
        format!(
            r#"{{"backend": {{"kind": "local", "root": {}}}}}"#,
            serde_json::to_string(&root).unwrap()
        ),
    )
    .unwrap();

    parlor_cmd()
        .arg("--config")
        .arg(&config)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("local backend"));

    assert!(root.join("orders.csv").exists());
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    parlor_cmd()
        .arg("--config")
        .arg(dir.path().join("missing.json"))
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}
