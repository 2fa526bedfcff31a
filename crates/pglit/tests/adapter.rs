//! End-to-end checks of the adapter against an in-memory connection.

use pglit::{
    Adapter, AdapterConfig, Connection, ConnectionConfig, EscapeStyle, Order, OrmError, OrmResult,
    Row, Value,
};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Records every statement and answers with canned rows.
#[derive(Default)]
struct RecordingConnection {
    statements: Mutex<Vec<String>>,
    rows: Vec<Row>,
}

impl RecordingConnection {
    fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            statements: Mutex::new(Vec::new()),
            rows,
        }
    }

    fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }
}

impl Connection for RecordingConnection {
    async fn execute(&self, sql: &str) -> OrmResult<Vec<Row>> {
        self.statements.lock().unwrap().push(sql.to_string());
        Ok(self.rows.clone())
    }
}

struct FailingConnection;

impl Connection for FailingConnection {
    async fn execute(&self, _sql: &str) -> OrmResult<Vec<Row>> {
        Err(OrmError::Connection("connection reset by peer".to_string()))
    }
}

fn adapter<C: Connection>(conn: C) -> Adapter<C> {
    Adapter::new(AdapterConfig::new(ConnectionConfig::new("blog")), conn)
}

fn jamie() -> Row {
    let mut row = Row::new();
    row.push("id", Some("7c1e")).push("name", Some("Jamie"));
    row
}

#[test]
fn literal_forms() {
    let a = adapter(RecordingConnection::default());
    assert_eq!(a.literal("string").unwrap().as_str(), "'string'");
    assert_eq!(a.literal(1).unwrap().as_str(), "1");
    assert_eq!(a.literal(true).unwrap().as_str(), "TRUE");
}

#[test]
fn query_blocks_injection() {
    let a = adapter(RecordingConnection::default());
    let p = a
        .query(|w| {
            w.and_eq("name", "' OR 1; --");
        })
        .unwrap();
    assert_eq!(p.to_sql(), r"name = '\' OR 1; --'");
}

#[test]
fn doubling_style_config() {
    let config = AdapterConfig::new(ConnectionConfig::new("blog")).escape_style(EscapeStyle::DoubleQuote);
    let a = Adapter::new(config, RecordingConnection::default());
    let p = a
        .query(|w| {
            w.and_eq("name", "' OR 1; --");
        })
        .unwrap();
    assert_eq!(p.to_sql(), "name = ''' OR 1; --'");
}

#[test]
fn select_shapes() {
    let a = adapter(RecordingConnection::default());
    let empty = a.query(|_| {}).unwrap();

    let mut qb = a.select("Article");
    qb.filter(&empty).limit(2);
    assert_eq!(qb.build().unwrap(), r#"SELECT * FROM "Article" WHERE TRUE LIMIT 2"#);

    let mut qb = a.select("Article");
    qb.order_by(Order::by("title").unwrap());
    assert_eq!(qb.build().unwrap(), r#"SELECT * FROM "Article" ORDER BY title"#);

    let mut qb = a.select("Article");
    qb.order_by(Order::parse("title", Some("asc")).unwrap());
    assert_eq!(qb.build().unwrap(), r#"SELECT * FROM "Article" ORDER BY title ASC"#);

    let mut qb = a.select("Article");
    qb.order_by(Order::parse("title", Some("desc")).unwrap());
    assert_eq!(qb.build().unwrap(), r#"SELECT * FROM "Article" ORDER BY title DESC"#);
}

#[tokio::test]
async fn retrieve_sends_one_complete_statement() {
    let a = adapter(RecordingConnection::with_rows(vec![jamie()]));
    let p = a
        .query(|w| {
            w.and_eq("name", "Jamie").and_eq("tags", vec!["a", "b"]);
        })
        .unwrap();

    let rows = a
        .retrieve("User", Some(&p), Some(Order::desc("name").unwrap()), Some(1))
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("name"), Some("Jamie"));
    assert_eq!(
        a.connection().statements(),
        vec![
            r#"SELECT * FROM "User" WHERE name = 'Jamie' AND tags = '["a","b"]' ORDER BY name DESC LIMIT 1"#
                .to_string()
        ]
    );
}

#[tokio::test]
async fn retrieve_without_predicate() {
    let a = adapter(RecordingConnection::default());
    let rows = a.retrieve("Article", None, None, None).await.unwrap();
    assert!(rows.is_empty());
    assert_eq!(a.connection().statements(), vec![r#"SELECT * FROM "Article""#.to_string()]);
}

#[tokio::test]
async fn invalid_statement_never_reaches_connection() {
    let a = adapter(RecordingConnection::default());
    let err = a
        .retrieve(r#"Article"; DROP TABLE "User"#, None, None, None)
        .await
        .unwrap_err();
    assert!(err.is_identifier());

    let err = a.retrieve("Article", None, None, Some(0)).await.unwrap_err();
    assert!(matches!(err, OrmError::Validation(_)));

    assert!(a.connection().statements().is_empty());
}

#[tokio::test]
async fn connection_errors_propagate_unchanged() {
    let a = adapter(FailingConnection);
    let err = a.retrieve("Article", None, None, None).await.unwrap_err();
    assert!(matches!(&err, OrmError::Connection(msg) if msg == "connection reset by peer"));
}

#[tokio::test]
async fn driver_errors_keep_their_source() {
    use std::error::Error as _;

    // No host configured: the driver fails before touching the network.
    let driver_err = tokio_postgres::Config::new()
        .connect(tokio_postgres::NoTls)
        .await
        .map(|_| ())
        .unwrap_err();
    let message = driver_err.to_string();

    let err = OrmError::from(driver_err);
    assert!(err.is_connection());
    assert!(err.source().is_some());
    assert!(matches!(&err, OrmError::Query(e) if e.to_string() == message));
}

#[test]
fn default_config_pins_backslash_escaping() {
    let config = AdapterConfig::new(ConnectionConfig::new("blog"));
    let a = Adapter::new(config.clone(), RecordingConnection::default());
    let p = a
        .query(|w| {
            w.and_eq("name", "' OR 1; --");
        })
        .unwrap();
    assert_eq!(p.to_sql(), r"name = '\' OR 1; --'");
    assert_eq!(
        config.to_pg_config().get_options(),
        Some("-c standard_conforming_strings=off")
    );
}

#[test]
fn structured_values_in_predicates() {
    let a = adapter(RecordingConnection::default());
    let mut author = BTreeMap::new();
    author.insert("name", Value::from("O'Neil"));
    author.insert("posts", Value::from(vec![1, 2]));

    let p = a
        .query(|w| {
            w.and_eq("author", author);
        })
        .unwrap();
    assert_eq!(p.to_sql(), r#"author = '{"name":"O\'Neil","posts":[1,2]}'"#);
}

#[test]
fn rendering_is_thread_safe() {
    let a = adapter(RecordingConnection::default());
    let serializer = *a.serializer();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || serializer.render(vec![i, i + 1]).unwrap().into_sql())
        })
        .collect();
    for (i, h) in handles.into_iter().enumerate() {
        assert_eq!(h.join().unwrap(), format!("'[{},{}]'", i, i + 1));
    }
}

// Compile-only: the real driver satisfies the collaborator contract.
#[allow(dead_code)]
async fn _client_is_a_connection(client: tokio_postgres::Client) -> OrmResult<Vec<Row>> {
    let a = adapter(client);
    a.retrieve("Article", None, None, Some(1)).await
}
