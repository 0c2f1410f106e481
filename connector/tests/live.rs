//! End-to-end checks against a live database.
//!
//! Ignored by default; run with
//! `PGQUILL_TEST_DSN="host=localhost user=postgres password=postgres dbname=postgres" cargo test -- --ignored`.

use anyhow::Result;
use pgquill::{ColumnSpec, Condition, Connector, NotifyPayload, Row, Table, Value};

fn dsn() -> String { std::env::var("PGQUILL_TEST_DSN").expect("PGQUILL_TEST_DSN must be set for live tests") }

async fn connector() -> Result<Connector> {
    let _ = tracing_subscriber::fmt().try_init();
    Ok(Connector::connect(&dsn(), 1, 4).await?)
}

#[tokio::test]
#[ignore = "needs a running postgres; set PGQUILL_TEST_DSN"]
async fn crud_round_trip() -> Result<()> {
    let connector = connector().await?;
    let table = Table::builder("pgquill_live_people")
        .column("id", ColumnSpec::new("integer").not_null())
        .column("name", ColumnSpec::new("varchar(32)"))
        .column("scores", ColumnSpec::new("integer[]"))
        .build()?;

    if connector.table_exists(table.name()).await? {
        connector.drop_table(table.name()).await?;
    }
    connector.create_table(&table).await?;
    assert!(connector.table_exists(table.name()).await?);
    assert!(connector.column_exists(table.name(), "name").await?);

    let row = Row::new().with("id", 7).with("name", "bob").with("scores", vec![1, 2, 3]);
    connector.insert_row(&table, &row).await?;

    let filter = Condition::equal("id", 7);
    assert!(connector.row_exists(table.name(), &filter).await?);

    let rows = connector.fetch_rows(&table, &filter, None, None).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("name"), &Value::Text("bob".to_owned()));
    assert_eq!(rows[0].get("scores"), &Value::from(vec![1, 2, 3]));

    let rename = Row::new().with("name", "robert");
    assert_eq!(connector.update_rows(&table, &rename, &filter).await?, 1);
    let rows = connector.fetch_rows(&table, &filter, None, None).await?;
    assert_eq!(rows[0].get("name"), &Value::Text("robert".to_owned()));

    let reflected = connector.columns(table.name()).await?;
    assert_eq!(reflected.len(), 3);
    assert!(reflected.iter().any(|column| column.name() == "id" && !column.is_nullable()));
    assert!(reflected.iter().all(|column| column.is_updatable() && column.type_code().is_some()));

    connector.drop_table(table.name()).await?;
    assert!(!connector.table_exists(table.name()).await?);
    Ok(())
}

#[tokio::test]
#[ignore = "needs a running postgres; set PGQUILL_TEST_DSN"]
async fn reflection_helpers() -> Result<()> {
    let connector = connector().await?;
    assert_eq!(connector.type_name(25).await?, "text");
    Ok(())
}

#[tokio::test]
#[ignore = "needs a running postgres; set PGQUILL_TEST_DSN"]
async fn trigger_wiring() -> Result<()> {
    let connector = connector().await?;
    let table = Table::builder("pgquill_live_audit").column("id", ColumnSpec::new("integer")).build()?;

    if connector.table_exists(table.name()).await? {
        connector.drop_table(table.name()).await?;
    }
    connector.create_table(&table).await?;

    connector.set_trigger("pgquill_live_trigger", table.name(), "pgquill_live_notify", "pgquill_changes", NotifyPayload::Full).await?;

    connector.insert_row(&table, &Row::new().with("id", 1)).await?;

    connector.drop_trigger("pgquill_live_trigger", table.name()).await?;
    connector.drop_notify_function("pgquill_live_notify").await?;
    connector.drop_table(table.name()).await?;
    Ok(())
}
