#![cfg(feature = "sqlite")]
use sql_easydb::prelude::*;
use sql_easydb::test_utils::{RecordingConnector, Reply};

fn setup() -> Result<Database<SqliteConnector>, SqlEasyDbError> {
    let mut db = Database::new(DatabaseConfig::default().with_dbname(":memory:"), SqliteConnector);
    db.multi_query(
        "
        DROP TABLE IF EXISTS `test`;
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
            (2, '002', 'Plate', 30.50)
        ",
    )?;
    Ok(db)
}

fn row_count(db: &mut Database<SqliteConnector>) -> Result<Option<RowValues>, SqlEasyDbError> {
    db.get_one("SELECT count(*) FROM test", &[])
}

#[test]
fn plain_query_runs_sql_verbatim() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = setup()?;

    db.plain_query("INSERT INTO test (code, name) VALUES ('003', 'Cup?');")?;
    assert_eq!(row_count(&mut db)?, Some(RowValues::Int(3)));
    assert_eq!(
        db.get_one("SELECT name FROM test WHERE code = '003'", &[])?,
        Some(RowValues::Text("Cup?".into()))
    );
    Ok(())
}

#[test]
fn multi_query_drains_every_result() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = setup()?;

    db.multi_query(
        "
        INSERT INTO test (code, name) VALUES ('003', 'Cup2');
        INSERT INTO test (code, name) VALUES ('004', 'Plate2')
        ",
    )?;
    assert_eq!(row_count(&mut db)?, Some(RowValues::Int(4)));

    db.query("INSERT INTO test (code, name) VALUES ('005', 'Pan2');", &[])?;

    db.multi_query(
        "
        SELECT * FROM test;
        SELECT name FROM test;
        INSERT INTO test (code, name) VALUES ('006', 'Pan3');
        SELECT code FROM test;
        ",
    )?;
    db.query("INSERT INTO test (code, name) VALUES ('007', 'Pan4');", &[])?;
    assert_eq!(row_count(&mut db)?, Some(RowValues::Int(7)));
    Ok(())
}

#[test]
fn multi_query_stops_at_failing_statement() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = setup()?;

    let err = db
        .multi_query(
            "
            SELECT * FROM test;
            SELECT name1 FROM test;
            INSERT INTO test (code, name) VALUES ('008', 'Pan8');
            SELECT code FROM test;
            ",
        )
        .unwrap_err();
    assert_eq!(err.statement_index(), Some(1));
    assert_ne!(err.code(), 0);

    // statements after the failure never ran, and the connection keeps working
    assert_eq!(row_count(&mut db)?, Some(RowValues::Int(2)));
    db.query("INSERT INTO test (code, name) VALUES ('008', 'Pan8');", &[])?;
    assert_eq!(row_count(&mut db)?, Some(RowValues::Int(3)));
    Ok(())
}

#[test]
fn multi_query_error_in_first_or_second_statement() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = setup()?;

    let first = db
        .multi_query(
            "INSERT INTO test2 (code, name) VALUES ('003', 'Cup2');
             INSERT INTO test (code, name) VALUES ('004', 'Plate2')",
        )
        .unwrap_err();
    assert_eq!(first.statement_index(), Some(0));
    assert_eq!(row_count(&mut db)?, Some(RowValues::Int(2)));

    let second = db
        .multi_query(
            "INSERT INTO test (code, name) VALUES ('003', 'Cup2');
             INSERT INTO test2 (code, name) VALUES ('004', 'Plate2')",
        )
        .unwrap_err();
    assert_eq!(second.statement_index(), Some(1));
    assert_eq!(row_count(&mut db)?, Some(RowValues::Int(3)));
    Ok(())
}

#[test]
fn insert_id_and_affected_rows() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = setup()?;

    db.query("INSERT INTO test (code, name) VALUES ('005', 'Pan2');", &[])?;
    assert_eq!(db.insert_id()?, 3);

    db.query("DELETE FROM test", &[])?;
    assert_eq!(db.affected_rows()?, 3);
    assert_eq!(db.insert_id()?, 0);
    Ok(())
}

#[test]
fn insert_id_after_delete_reuses_rowid() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = setup()?;
    db.query("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT)", &[])?;

    db.query("INSERT INTO t (name) VALUES (?)", &["a".into()])?;
    assert_eq!(db.insert_id()?, 1);

    db.query("DELETE FROM t", &[])?;
    db.query("INSERT INTO t (name) VALUES (?)", &["c".into()])?;
    assert_eq!(db.insert_id()?, 1);
    assert_eq!(db.get_one("SELECT id FROM t WHERE name = 'c'", &[])?, Some(RowValues::Int(1)));
    Ok(())
}

#[test]
fn query_failure_reports_sql_and_code() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = setup()?;

    let err = db.query("SELECTT 1", &[]).unwrap_err();
    assert_eq!(err.query(), Some("SELECTT 1"));
    assert_eq!(err.code(), 1);
    let message = err.to_string();
    assert!(message.starts_with("Error 1: \""), "{message}");
    assert!(message.ends_with("\"; Query = \"SELECTT 1\""), "{message}");

    let err = db.query("INSERT INTO test2 (code, name) VALUES ('003', 'Cup2');", &[]).unwrap_err();
    assert!(err.to_string().contains("no such table"));
    Ok(())
}

#[test]
fn server_error_message_format() -> Result<(), Box<dyn std::error::Error>> {
    let connector = RecordingConnector::new().with_replies([Reply::error(
        1064,
        "You have an error in your SQL syntax; check the manual that corresponds to your MySQL \
         server version for the right syntax to use near 'SELECTT 1' at line 1",
    )]);
    let mut db = Database::new(DatabaseConfig::default(), connector);

    let err = db.query("SELECTT 1", &[]).unwrap_err();
    assert_eq!(err.code(), 1064);
    assert_eq!(err.query(), Some("SELECTT 1"));
    assert_eq!(
        err.to_string(),
        "Error 1064: \"You have an error in your SQL syntax; check the manual that corresponds to \
         your MySQL server version for the right syntax to use near 'SELECTT 1' at line 1\"; \
         Query = \"SELECTT 1\""
    );
    Ok(())
}
