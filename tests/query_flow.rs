mod common;

use foodboard::{
    query_page, Block, ChartKind, ChartMark, ColumnChoices, Metric, QueryOutcome, ReplCommand,
    ReplSession, Value,
};

#[tokio::test]
async fn test_result_shape_matches_engine() {
    let dashboard = common::dashboard();
    let result = dashboard
        .executor()
        .execute("SELECT * FROM food_listings;")
        .await
        .unwrap();
    assert_eq!(result.column_count(), 9);
    assert_eq!(result.row_count(), 4);
}

#[tokio::test]
async fn test_single_row_query_defaults_to_kpis() {
    let dashboard = common::dashboard();
    let mut session = common::session();

    let outcome = session
        .run_query(dashboard.executor(), "SELECT 1 AS a, 2 AS b;")
        .await;
    assert_eq!(outcome, QueryOutcome::Succeeded { rows: 1 });

    let blocks = query_page(&session);
    let metrics = blocks
        .iter()
        .find_map(|b| match b {
            Block::Metrics(m) => Some(m.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(
        metrics,
        vec![
            Metric { label: "a".into(), value: Value::Int(1) },
            Metric { label: "b".into(), value: Value::Int(2) },
        ]
    );
}

#[tokio::test]
async fn test_zero_row_query_warns_without_chart() {
    let dashboard = common::dashboard();
    let mut session = common::session();
    session.set_chart(ChartKind::Bar, ColumnChoices::default());

    session
        .run_query(
            dashboard.executor(),
            "SELECT * FROM providers WHERE city = 'Nowhere';",
        )
        .await;

    let blocks = query_page(&session);
    assert!(blocks.iter().any(Block::is_warning));
    assert!(blocks.iter().all(|b| b.as_chart().is_none()));
}

#[tokio::test]
async fn test_malformed_sql_keeps_previous_result() {
    let dashboard = common::dashboard();
    let mut session = common::session();

    session
        .run_query(dashboard.executor(), "SELECT city, COUNT(*) AS n FROM providers GROUP BY city;")
        .await;
    session.run_query(dashboard.executor(), "SELEKT * FROM x").await;

    let blocks = query_page(&session);
    assert!(matches!(&blocks[1], Block::Error(msg) if msg.contains("SELEKT")));
    let table = blocks
        .iter()
        .find_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
        .unwrap();
    assert_eq!(table.column_names(), vec!["city", "n"]);
    assert_eq!(table.row_count(), 2);
}

#[tokio::test]
async fn test_dual_charts_need_two_numeric_columns() {
    let dashboard = common::dashboard();
    let mut session = common::session();
    session
        .run_query(
            dashboard.executor(),
            "SELECT status, COUNT(*) AS n FROM claims GROUP BY status;",
        )
        .await;

    for kind in [ChartKind::Combo, ChartKind::ClusteredBar, ChartKind::DualAxis] {
        session.set_chart(kind, ColumnChoices::default());
        let blocks = query_page(&session);
        assert!(blocks
            .iter()
            .any(|b| matches!(b, Block::Warning(w) if w.contains("at least 2 numeric columns"))));
    }
}

#[tokio::test]
async fn test_console_session_charts_and_exports() {
    let mut repl = ReplSession::new(common::dashboard(), common::session());

    let sql = "SELECT location, SUM(quantity) AS total, COUNT(*) AS listings \
               FROM food_listings GROUP BY location ORDER BY location;";
    repl.execute(ReplCommand::parse(sql).unwrap()).await;

    let result = repl
        .execute(ReplCommand::parse(":chart dual-axis location total listings").unwrap())
        .await;
    let chart = result.blocks.iter().find_map(Block::as_chart).unwrap();
    assert_eq!(chart.mark, ChartMark::DualAxis);
    assert_eq!(chart.categories, vec!["Delhi", "Pune"]);
    assert_eq!(chart.series[0].values, vec![Some(5.0), Some(75.0)]);
    assert_eq!(chart.series[1].values, vec![Some(1.0), Some(3.0)]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.json");
    let exported = repl
        .execute(ReplCommand::Export(path.clone()))
        .await;
    assert!(matches!(&exported.blocks[0], Block::Success(_)));

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc["resolve"]["scale"]["y"], "independent");
    assert_eq!(doc["data"]["values"][1]["total"], 75.0);
}

#[tokio::test]
async fn test_console_page_navigation() {
    let mut repl = ReplSession::new(common::dashboard(), common::session());

    let result = repl.execute(ReplCommand::parse(":page claims").unwrap()).await;
    assert!(matches!(&result.blocks[0], Block::Heading(h) if h == "Claims"));

    let result = repl.execute(ReplCommand::parse(":date 2025-04-01").unwrap()).await;
    assert!(result.blocks.iter().any(Block::is_warning));

    assert!(repl.execute(ReplCommand::Quit).await.quit);
}
