#![cfg(feature = "sqlite")]

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use sql_model::prelude::*;

const USERS_DDL: &str =
    "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL, age INTEGER, active INTEGER)";

async fn users_model(context: &str) -> Result<Model<SqliteExecutor>, DataAccessError> {
    let executor = SqliteExecutor::open_in_memory()?;
    executor
        .with_connection(|conn| {
            conn.execute_batch(USERS_DDL)?;
            Ok(())
        })
        .await?;
    Ok(Model::new(executor, context))
}

fn user(name: &str, age: i64) -> Fields {
    let mut fields = Fields::new();
    fields.insert("name".to_string(), json!(name));
    fields.insert("age".to_string(), json!(age));
    fields
}

async fn seed(model: &mut Model<SqliteExecutor>) -> Result<(), DataAccessError> {
    for (name, age) in [("alice", 31), ("bob", 25), ("bobby", 40), ("carol", 25)] {
        model.insert(&user(name, age), None).await?;
    }
    Ok(())
}

fn names(rows: &[Record]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.get("name").and_then(RowValue::as_text).map(str::to_string))
        .collect()
}

#[tokio::test]
async fn insert_then_fetch_by_id() -> Result<(), Box<dyn std::error::Error>> {
    let mut model = users_model("admin-users").await?;
    let id = model.insert(&user("alice", 31), None).await?;
    assert_eq!(id, 1);

    let row = model.get_where(id, None).await?.expect("row exists");
    assert_eq!(row.get("name"), Some(&RowValue::Text("alice".to_string())));
    assert_eq!(row.get("age"), Some(&RowValue::Int(31)));
    assert_eq!(row.get("active"), Some(&RowValue::Null));

    assert!(model.get_where(99, None).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn explicit_table_overrides_context() -> Result<(), Box<dyn std::error::Error>> {
    let mut model = users_model("reports-summary").await?;
    model.insert(&user("alice", 31), Some("users")).await?;
    assert_eq!(model.count(Some("users")).await?, 1);
    assert!(matches!(
        model.count(None).await,
        Err(DataAccessError::SqliteError(_))
    ));
    Ok(())
}

#[tokio::test]
async fn update_and_delete_by_id() -> Result<(), Box<dyn std::error::Error>> {
    let mut model = users_model("users").await?;
    let id = model.insert(&user("alice", 31), None).await?;

    let mut changes = Fields::new();
    changes.insert("age".to_string(), json!(32));
    changes.insert("active".to_string(), json!(true));
    model.update(id, &changes, None).await?;

    let row = model.get_where(id, None).await?.expect("row exists");
    assert_eq!(row.get("age").and_then(RowValue::to_i64), Some(32));
    assert_eq!(row.get("active").and_then(RowValue::to_i64), Some(1));
    assert_eq!(row.get("name").and_then(RowValue::as_text), Some("alice"));

    model.delete(id, None).await?;
    assert!(model.get_where(id, None).await?.is_none());
    assert_eq!(model.count(None).await?, 0);
    Ok(())
}

#[tokio::test]
async fn listing_orders_and_paginates() -> Result<(), Box<dyn std::error::Error>> {
    let mut model = users_model("users").await?;
    seed(&mut model).await?;

    let all = model.get(&ListOptions::new()).await?;
    assert_eq!(names(&all), ["alice", "bob", "bobby", "carol"]);

    let by_name_desc = model.get(&ListOptions::new().order_by("name DESC")).await?;
    assert_eq!(names(&by_name_desc), ["carol", "bobby", "bob", "alice"]);

    let page = model.get(&ListOptions::new().page(2, 1)).await?;
    assert_eq!(names(&page), ["bob", "bobby"]);

    // A limit without an offset does not paginate.
    let unpaged = model.get(&ListOptions::new().limit(1)).await?;
    assert_eq!(unpaged.len(), 4);
    Ok(())
}

#[tokio::test]
async fn filtering_with_operators() -> Result<(), Box<dyn std::error::Error>> {
    let mut model = users_model("users").await?;
    seed(&mut model).await?;
    let opts = ListOptions::new();

    let like = model.get_where_custom("name", "bo", "LIKE", &opts).await?;
    assert_eq!(names(&like), ["bob", "bobby"]);

    let not_like = model.get_where_custom("name", "bo", "not like", &opts).await?;
    assert_eq!(names(&not_like), ["alice", "carol"]);

    let older = model.get_where_custom("age", 30, ">", &opts).await?;
    assert_eq!(names(&older), ["alice", "bobby"]);

    let qualified = model.get_where_custom("users.age", 25, "=", &opts).await?;
    assert_eq!(names(&qualified), ["bob", "carol"]);

    assert!(matches!(
        model.get_where_custom("age", 1, "; DROP TABLE users", &opts).await,
        Err(DataAccessError::InvalidIdentifier(_))
    ));
    assert!(matches!(
        model.get_where_custom("age or 1=1", 1, "=", &opts).await,
        Err(DataAccessError::InvalidIdentifier(_))
    ));
    Ok(())
}

#[tokio::test]
async fn single_and_many_matches() -> Result<(), Box<dyn std::error::Error>> {
    let mut model = users_model("users").await?;
    seed(&mut model).await?;

    let first = model.get_one_where("age", 25, None).await?.expect("match");
    assert_eq!(first.get("name").and_then(RowValue::as_text), Some("bob"));
    assert!(model.get_one_where("name", "nobody", None).await?.is_none());

    let many = model.get_many_where("age", 25, None).await?;
    assert_eq!(names(&many), ["bob", "carol"]);
    Ok(())
}

#[tokio::test]
async fn counting() -> Result<(), Box<dyn std::error::Error>> {
    let mut model = users_model("users").await?;
    assert_eq!(model.count(None).await?, 0);
    assert_eq!(model.get_max(None).await?, None);

    seed(&mut model).await?;
    assert_eq!(model.count(None).await?, 4);
    assert_eq!(model.count_rows("age", 25, None).await?, 2);
    assert_eq!(model.get_max(None).await?, Some(RowValue::Int(4)));

    let opts = ListOptions::new();
    let matched = model.get_where_custom("name", "bo", "LIKE", &opts).await?;
    let counted = model.count_where("name", "bo", "LIKE", &opts).await?;
    assert_eq!(counted, matched.len());
    Ok(())
}

#[tokio::test]
async fn batch_insert_writes_every_record() -> Result<(), Box<dyn std::error::Error>> {
    let mut model = users_model("users").await?;
    let records = vec![user("dave", 50), user("erin", 22), user("frank", 35)];
    assert_eq!(model.insert_batch("users", &records).await?, 3);
    assert_eq!(model.count(None).await?, 3);

    assert!(matches!(
        model.insert_batch("users", &[]).await,
        Err(DataAccessError::EmptyBatch)
    ));

    let mut odd = Fields::new();
    odd.insert("name".to_string(), json!("gina"));
    assert!(matches!(
        model.insert_batch("users", &[user("hal", 1), odd]).await,
        Err(DataAccessError::BatchShapeMismatch { index: 1, .. })
    ));
    assert_eq!(model.count(None).await?, 3);
    Ok(())
}

#[tokio::test]
async fn raw_queries_in_both_return_modes() -> Result<(), Box<dyn std::error::Error>> {
    let mut model = users_model("users").await?;
    seed(&mut model).await?;

    let rows = model
        .raw_query("SELECT name FROM users WHERE age = 25 ORDER BY id", ReturnMode::Array)
        .await?
        .into_maps();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("name"), Some(&json!("bob")));

    let records = model
        .raw_query("SELECT COUNT(*) AS n FROM users", ReturnMode::Object)
        .await?
        .into_records()
        .expect("object mode yields records");
    assert_eq!(records[0].get("n"), Some(&RowValue::Int(4)));

    let positional = model
        .query_bind(
            "SELECT name FROM users WHERE age > ? AND age < ? ORDER BY id",
            vec![json!(24), json!(35)],
            ReturnMode::Object,
        )
        .await?;
    assert_eq!(positional.len(), 3);

    let mut named = BoundParams::named();
    named.set("name", "carol");
    let rows = model
        .query_bind("SELECT age FROM users WHERE name = :name", named, ReturnMode::Array)
        .await?
        .into_maps();
    assert_eq!(rows, vec![serde_json::from_value::<Fields>(json!({"age": 25}))?]);
    Ok(())
}

#[tokio::test]
async fn raw_exec_only_runs_in_dev() -> Result<(), Box<dyn std::error::Error>> {
    let mut model = users_model("users").await?;
    assert_eq!(
        model.raw_exec("CREATE TABLE audit (id INTEGER PRIMARY KEY)").await?,
        RawExec::Disabled
    );
    assert!(model.raw_query("SELECT * FROM audit", ReturnMode::Object).await.is_err());

    let mut model = model.with_environment(Environment::Dev);
    assert_eq!(
        model.raw_exec("CREATE TABLE audit (id INTEGER PRIMARY KEY)").await?,
        RawExec::Executed
    );
    assert_eq!(model.count(Some("audit")).await?, 0);
    Ok(())
}

#[tokio::test]
async fn records_deserialize_into_structs() -> Result<(), Box<dyn std::error::Error>> {
    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        id: i64,
        name: String,
        age: Option<i64>,
    }

    let mut model = users_model("users").await?;
    #[derive(serde::Serialize)]
    struct NewUser<'a> {
        name: &'a str,
        age: i64,
    }
    let id = model
        .insert(&to_fields(&NewUser { name: "ivy", age: 28 })?, None)
        .await?;
    let row = model.get_where(id, None).await?.expect("row exists");
    let user: User = row.deserialize()?;
    assert_eq!(
        user,
        User {
            id,
            name: "ivy".to_string(),
            age: Some(28)
        }
    );
    Ok(())
}

#[tokio::test]
async fn traces_render_every_statement() -> Result<(), Box<dyn std::error::Error>> {
    let sink = MemorySink::new();
    let mut model = users_model("users")
        .await?
        .with_trace_sink(Arc::new(sink.clone()));

    model.insert(&user("o'neil", 30), None).await?;
    model.get_where_custom("name", "nei", "LIKE", &ListOptions::new()).await?;
    model.count(None).await?;
    model.insert_batch("users", &[user("x", 1), user("y", 2)]).await?;

    let traces = sink.traces();
    assert_eq!(traces.len(), 4);
    assert_eq!(
        traces[0].rendered,
        "INSERT INTO users (name, age) VALUES ('o''neil', 30)"
    );
    assert_eq!(traces[0].caveat.as_deref(), Some(QUERY_CAVEAT));
    assert_eq!(
        traces[1].rendered,
        "SELECT * FROM users WHERE name LIKE '%nei%' ORDER BY id"
    );
    assert_eq!(traces[2].rendered, "SELECT COUNT(id) AS total FROM users");
    assert_eq!(traces[2].caveat, None);
    assert_eq!(
        traces[3].rendered,
        "INSERT INTO users (name,age) VALUES ('x',1),('y',2)"
    );
    Ok(())
}

#[tokio::test]
async fn embedded_traces_treat_backslash_as_a_plain_character() -> Result<(), Box<dyn std::error::Error>> {
    let sink = MemorySink::new();
    let mut model = users_model("users")
        .await?
        .with_trace_sink(Arc::new(sink.clone()));
    let id = model.insert(&user(r"C:\", 30), None).await?;

    let mut params = BoundParams::named();
    params.set("id", id);
    let rows = model
        .query_bind(
            r"SELECT name FROM users WHERE name = 'C:\' AND id = :id",
            params,
            ReturnMode::Object,
        )
        .await?;
    assert_eq!(rows.len(), 1);

    let traces = sink.traces();
    assert_eq!(
        traces[1].rendered,
        r"SELECT name FROM users WHERE name = 'C:\' AND id = 1"
    );
    Ok(())
}

#[tokio::test]
async fn colliding_placeholder_names_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut model = users_model("users").await?;
    let mut fields = Fields::new();
    fields.insert("users.age".to_string(), json!(1));
    fields.insert("users_age".to_string(), json!(2));
    assert!(matches!(
        model.insert(&fields, None).await,
        Err(DataAccessError::ParameterError(_))
    ));
    assert_eq!(model.count(None).await?, 0);
    Ok(())
}
