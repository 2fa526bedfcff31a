use super::*;
use crate::condition::{Predicate, QueryBuilder};
use crate::error::OrmError;
use crate::literal::{EscapeStyle, LiteralSerializer};

#[test]
fn test_simple_select() {
    assert_eq!(select("users").build().unwrap(), r#"SELECT * FROM "users""#);
}

#[test]
fn test_limit_with_empty_predicate() {
    let sql = compose_select("Article", Some("TRUE"), None, Some(2)).unwrap();
    assert_eq!(sql, r#"SELECT * FROM "Article" WHERE TRUE LIMIT 2"#);
}

#[test]
fn test_limit_with_predicate_builder() {
    let mut qb = select("Article");
    qb.filter(&Predicate::empty()).limit(2);
    assert_eq!(
        qb.build().unwrap(),
        r#"SELECT * FROM "Article" WHERE TRUE LIMIT 2"#
    );
}

#[test]
fn test_order_without_direction() {
    let sql = compose_select("Article", None, Some(Order::by("title").unwrap()), None).unwrap();
    assert_eq!(sql, r#"SELECT * FROM "Article" ORDER BY title"#);
}

#[test]
fn test_order_asc() {
    let order = Order::parse("title", Some("asc")).unwrap();
    let sql = compose_select("Article", None, Some(order), None).unwrap();
    assert_eq!(sql, r#"SELECT * FROM "Article" ORDER BY title ASC"#);
}

#[test]
fn test_order_desc() {
    let sql = compose_select("Article", None, Some(Order::desc("title").unwrap()), None).unwrap();
    assert_eq!(sql, r#"SELECT * FROM "Article" ORDER BY title DESC"#);
}

#[test]
fn test_full_statement() {
    let q = QueryBuilder::new(LiteralSerializer::new(EscapeStyle::Backslash));
    let p = q
        .predicate(|w| {
            w.and_eq("author", "Jamie").and_eq("published", true);
        })
        .unwrap();

    let mut qb = select("Article");
    qb.filter(&p)
        .order_by_column("created_at", Some(Direction::Desc))
        .limit(10);
    assert_eq!(
        qb.build().unwrap(),
        r#"SELECT * FROM "Article" WHERE author = 'Jamie' AND published = TRUE ORDER BY created_at DESC LIMIT 10"#
    );
}

#[test]
fn test_direction_parse_is_case_insensitive() {
    assert_eq!("ASC".parse::<Direction>().unwrap(), Direction::Asc);
    assert_eq!("Desc".parse::<Direction>().unwrap(), Direction::Desc);
    assert!(matches!(
        "sideways".parse::<Direction>(),
        Err(OrmError::Validation(_))
    ));
}

#[test]
fn test_invalid_table_is_rejected() {
    let err = compose_select(r#"Article" ; DROP TABLE x; --"#, None, None, None).unwrap_err();
    assert!(err.is_identifier());
}

#[test]
fn test_invalid_order_column_is_rejected() {
    assert!(Order::by("title; DROP TABLE x").unwrap_err().is_identifier());

    let mut qb = select("Article");
    qb.order_by_column("title DESC, (SELECT 1)", None).limit(1);
    assert!(qb.build().unwrap_err().is_identifier());
}

#[test]
fn test_zero_limit_is_rejected() {
    let err = compose_select("Article", None, None, Some(0)).unwrap_err();
    assert!(matches!(err, OrmError::Validation(_)));
}

#[test]
fn test_limit_must_fit_bigint() {
    let err = compose_select("Article", None, None, Some(u64::MAX)).unwrap_err();
    assert!(matches!(err, OrmError::Validation(_)));

    let err = compose_select("Article", None, None, Some(MAX_LIMIT + 1)).unwrap_err();
    assert!(matches!(err, OrmError::Validation(_)));

    assert_eq!(
        compose_select("Article", None, None, Some(MAX_LIMIT)).unwrap(),
        format!(r#"SELECT * FROM "Article" LIMIT {}"#, i64::MAX)
    );
}

#[test]
fn test_blank_predicate_is_rejected() {
    let err = compose_select("Article", Some("  "), None, None).unwrap_err();
    assert!(matches!(err, OrmError::Validation(_)));
}

#[test]
fn test_filter_replaces_previous_predicate() {
    let mut qb = select("Article");
    qb.filter_raw("a = 1").filter_raw("b = 2");
    assert_eq!(
        qb.build().unwrap(),
        r#"SELECT * FROM "Article" WHERE b = 2"#
    );
}

#[test]
fn test_build_is_repeatable() {
    let mut qb = select("Article");
    qb.filter_raw("TRUE").limit(5);
    assert_eq!(qb.build().unwrap(), qb.build().unwrap());
}

#[test]
fn test_order_accessors() {
    let o = Order::asc("title").unwrap();
    assert_eq!(o.column().as_str(), "title");
    assert_eq!(o.direction(), Some(Direction::Asc));
    assert_eq!(Order::parse("title", None).unwrap().direction(), None);
}
