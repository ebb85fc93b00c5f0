mod common;

use chrono::NaiveDate;
use foodboard::{Block, ChartMark, Dashboard, Metric, Page, QueryExecutor, SqliteStore, Value};
use std::sync::Arc;

async fn render(page: Page) -> Vec<Block> {
    let mut session = common::session();
    session.page = page;
    common::dashboard().render(&session).await
}

#[tokio::test]
async fn test_overview_counts_each_table() {
    let blocks = render(Page::Overview).await;
    let metrics = blocks
        .iter()
        .find_map(|b| match b {
            Block::Metrics(m) => Some(m.clone()),
            _ => None,
        })
        .unwrap();

    let expected = [("Providers", 3), ("Receivers", 2), ("Food Listings", 4), ("Claims", 3)];
    assert_eq!(metrics.len(), expected.len());
    for (metric, (label, count)) in metrics.iter().zip(expected) {
        assert_eq!(
            metric,
            &Metric {
                label: label.to_string(),
                value: Value::Int(count),
            }
        );
    }
}

#[tokio::test]
async fn test_providers_page_groups_by_city() {
    let blocks = render(Page::Providers).await;
    assert!(matches!(&blocks[1], Block::Table(t) if t.row_count() == 3));

    let chart = blocks.iter().find_map(Block::as_chart).unwrap();
    assert_eq!(chart.title.as_deref(), Some("Providers by City"));
    assert_eq!(chart.mark, ChartMark::Bar);
    assert_eq!(chart.categories, vec!["Delhi", "Pune"]);
    assert_eq!(chart.series[0].values, vec![Some(1.0), Some(2.0)]);
}

#[tokio::test]
async fn test_claims_page_groups_by_status() {
    let blocks = render(Page::Claims).await;
    let chart = blocks.iter().find_map(Block::as_chart).unwrap();
    assert_eq!(chart.title.as_deref(), Some("Claims"));
    assert_eq!(chart.categories, vec!["Completed", "Pending"]);
    assert_eq!(chart.series[0].values, vec![Some(2.0), Some(1.0)]);
}

#[tokio::test]
async fn test_food_listings_near_expiry() {
    let blocks = render(Page::FoodListings).await;
    let near_expiry = blocks
        .iter()
        .filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
        .nth(1)
        .unwrap();

    assert_eq!(
        near_expiry.column_names(),
        vec!["food_id", "food_name", "expiry_date", "location", "quantity"]
    );
    let names: Vec<String> = near_expiry
        .column("food_name")
        .unwrap()
        .values
        .iter()
        .map(Value::to_string)
        .collect();
    assert_eq!(names, vec!["Bread", "Rice"]);
    assert!(blocks
        .iter()
        .any(|b| matches!(b, Block::Text(t) if t == "Total Near-Expiry Items: 2")));
}

#[tokio::test]
async fn test_food_listings_without_near_expiry_warns() {
    let mut session = common::session();
    session.page = Page::FoodListings;
    session.reference_date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();

    let blocks = common::dashboard().render(&session).await;
    assert!(blocks.iter().any(
        |b| matches!(b, Block::Warning(w) if w == "No near-expiry items for the selected date.")
    ));
}

#[tokio::test]
async fn test_analytics_charts() {
    let blocks = render(Page::Analytics).await;
    let charts: Vec<_> = blocks.iter().filter_map(Block::as_chart).collect();
    assert_eq!(charts.len(), 2);

    assert_eq!(charts[0].mark, ChartMark::Pie);
    assert_eq!(charts[0].title.as_deref(), Some("Quantity Posted by Provider Type"));
    assert_eq!(charts[0].categories[0], "Grocery Store");
    assert_eq!(charts[0].series[0].values[0], Some(65.0));

    assert_eq!(charts[1].mark, ChartMark::Bar);
    assert_eq!(charts[1].categories[0], "Vegan");
    assert_eq!(charts[1].series[0].values[0], Some(2.0));
}

#[tokio::test]
async fn test_missing_tables_render_errors_not_panics() {
    let store = Arc::new(SqliteStore::in_memory().unwrap());
    let dashboard = Dashboard::new(QueryExecutor::new(store));
    let mut session = common::session();

    for page in Page::ALL {
        session.page = page;
        let blocks = dashboard.render(&session).await;
        if page != Page::Query {
            assert!(blocks.iter().any(Block::is_error), "no error on {}", page);
        }
    }
}
