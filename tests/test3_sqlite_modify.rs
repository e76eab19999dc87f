#![cfg(feature = "sqlite")]
use sql_easydb::prelude::*;

fn setup() -> Result<Database<SqliteConnector>, SqlEasyDbError> {
    let mut db = Database::new(DatabaseConfig::default().with_dbname(":memory:"), SqliteConnector);
    db.multi_query(
        "
        CREATE TABLE `test` (
            `id` INTEGER PRIMARY KEY AUTOINCREMENT,
            `code` CHAR(15) NOT NULL,
            `name` VARCHAR(200) NOT NULL,
            `price` REAL DEFAULT NULL,
            `order` INTEGER DEFAULT 0
        );
        INSERT INTO test (id, code, name, price)
        VALUES
            (1, '001', 'Cup', 20.00),
            (2, '002', 'Plate', 30.50);
        ",
    )?;
    Ok(db)
}

fn text(s: &str) -> RowValues {
    RowValues::Text(s.to_string())
}

#[test]
fn update_single_condition() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = setup()?;

    let num = db.update(
        "test",
        &fields! { "code" => "002", "name" => "Pan", "order" => 2 },
        &fields! { "id" => 2 },
    )?;
    assert_eq!(num, 1);

    let row = db
        .get_assoc("SELECT code, name, `order` FROM test WHERE id = 2", &[])?
        .ok_or("row 2 missing")?;
    assert_eq!(row["name"], text("Pan"));
    assert_eq!(row["order"], RowValues::Int(2));
    Ok(())
}

#[test]
fn update_multiple_conditions_and_empty_where() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = setup()?;
    let set = fields! { "code" => "002", "name" => "Pan" };

    let num = db.update("test", &set, &fields! { "id" => 2, "code" => "002", "order" => 0 })?;
    assert_eq!(num, 1);

    let num = db.update("test", &set, &Fields::new())?;
    assert_eq!(num, 2);
    Ok(())
}

#[test]
fn update_where_null_matches_null_columns() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = setup()?;
    db.query("INSERT INTO test (code, name) VALUES ('003', 'Pan')", &[])?;

    let num = db.update("test", &fields! { "price" => 1.5 }, &fields! { "price" => Value::Null })?;
    assert_eq!(num, 1);
    assert_eq!(
        db.get_one("SELECT price FROM test WHERE code = '003'", &[])?,
        Some(RowValues::Float(1.5))
    );
    Ok(())
}

#[test]
fn update_with_raw_expression() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = setup()?;

    db.update("test", &fields! { "order" => Value::raw("`order` + 5") }, &fields! { "id" => 1 })?;
    assert_eq!(db.get_one("SELECT `order` FROM test WHERE id = 1", &[])?, Some(RowValues::Int(5)));
    Ok(())
}

#[test]
fn multi_insert_rows() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = setup()?;

    let num = db.multi_insert(
        "test",
        &["code", "name", "order"],
        &[
            vec!["003".into(), "Pan".into(), 7.into()],
            vec!["004".into(), "Spoon".into(), 8.into()],
        ],
        false,
    )?;
    assert_eq!(num, 2);

    let rows = db.get_all(
        "SELECT code, name, `order` FROM test WHERE code IN (?a) ORDER BY id",
        &[Value::from(["003", "004"])],
    )?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], text("Pan"));
    assert_eq!(rows[0]["order"], RowValues::Int(7));
    assert_eq!(rows[1]["code"], text("004"));
    assert_eq!(rows[1]["order"], RowValues::Int(8));
    Ok(())
}

#[test]
fn delete_rows() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = setup()?;

    assert_eq!(db.delete("test", &fields! { "id" => 2, "code" => "002" })?, 1);
    assert_eq!(db.delete("test", &fields! { "id" => 2 })?, 0);
    assert_eq!(db.delete("test", &Fields::new())?, 1);
    assert_eq!(db.get_one("SELECT COUNT(*) FROM test", &[])?, Some(RowValues::Int(0)));
    Ok(())
}

#[test]
fn quoted_identifiers_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = setup()?;
    db.multi_query(
        "CREATE TABLE `test``_ident` (
            `id` INTEGER NOT NULL PRIMARY KEY,
            `ide``nt` VARCHAR(100) NULL
        );",
    )?;
    let table = "test`_ident";

    db.multi_insert(table, &["id", "ide`nt"], &[vec![1.into(), "test".into()]], false)?;
    db.update(table, &fields! { "ide`nt" => "pass" }, &fields! { "id" => 1 })?;
    db.update(table, &fields! { "ide`nt" => "order" }, &fields! { "ide`nt" => "pass" })?;
    assert_eq!(
        db.get_one("SELECT `ide``nt` FROM `test``_ident` WHERE id = 1", &[])?,
        Some(text("order"))
    );

    db.multi_insert(
        table,
        &["id", "ide`nt"],
        &[vec![2.into(), "first".into()], vec![3.into(), "second".into()]],
        false,
    )?;
    let rows = db.get_all("SELECT id, `ide``nt` FROM `test``_ident` WHERE id > 1 ORDER BY id", &[])?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["ide`nt"], text("first"));
    assert_eq!(rows[1]["ide`nt"], text("second"));

    let removed = db.delete(table, &fields! { "id" => 2, "ide`nt" => "first" })?;
    assert_eq!(removed, 1);
    assert!(db.get_assoc("SELECT id FROM `test``_ident` WHERE id = 2", &[])?.is_none());
    Ok(())
}

#[test]
fn mysql_only_statements_surface_server_errors() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = setup()?;

    let err = db
        .insert("test", &fields! { "code" => "003", "name" => "Pan" }, false)
        .unwrap_err();
    assert!(matches!(err, SqlEasyDbError::Query { .. }));
    assert_eq!(err.query(), Some("INSERT INTO `test` SET `code` = '003', `name` = 'Pan'"));

    // the connection is still usable afterwards
    assert_eq!(db.get_one("SELECT COUNT(*) FROM test", &[])?, Some(RowValues::Int(2)));
    Ok(())
}

#[test]
fn empty_field_sets_are_invalid() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = setup()?;

    let err = db.update("test", &Fields::new(), &fields! { "id" => 1 }).unwrap_err();
    assert!(matches!(err, SqlEasyDbError::InvalidArgument(_)));

    let no_rows: Vec<Vec<Value>> = Vec::new();
    let err = db.multi_insert("test", &["code"], &no_rows, false).unwrap_err();
    assert!(matches!(err, SqlEasyDbError::InvalidArgument(_)));
    Ok(())
}
