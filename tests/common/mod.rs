#![allow(dead_code)]

use chrono::NaiveDate;
use foodboard::{Dashboard, QueryExecutor, SessionContext, SqliteStore};
use std::sync::Arc;

pub const SCHEMA_AND_DATA: &str = r#"
CREATE TABLE providers (
    provider_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    type TEXT NOT NULL,
    address TEXT,
    city TEXT NOT NULL,
    contact TEXT
);
CREATE TABLE receivers (
    receiver_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    type TEXT NOT NULL,
    city TEXT NOT NULL,
    contact TEXT
);
CREATE TABLE food_listings (
    food_id INTEGER PRIMARY KEY,
    food_name TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    expiry_date DATE NOT NULL,
    provider_id INTEGER NOT NULL,
    provider_type TEXT,
    location TEXT,
    food_type TEXT,
    meal_type TEXT
);
CREATE TABLE claims (
    claim_id INTEGER PRIMARY KEY,
    food_id INTEGER NOT NULL,
    receiver_id INTEGER NOT NULL,
    status TEXT NOT NULL,
    timestamp TIMESTAMP
);

INSERT INTO providers VALUES
    (1, 'Annapurna Kitchen', 'Restaurant', '12 MG Road', 'Pune', '555-0101'),
    (2, 'FreshMart', 'Grocery Store', '4 Station Rd', 'Pune', '555-0102'),
    (3, 'BigBasket Depot', 'Supermarket', '9 Ring Rd', 'Delhi', '555-0103');

INSERT INTO receivers VALUES
    (1, 'Hope Shelter', 'Shelter', 'Delhi', '555-0201'),
    (2, 'Seva Trust', 'NGO', 'Agra', '555-0202');

INSERT INTO food_listings VALUES
    (1, 'Bread', 10, '2025-03-15', 1, 'Restaurant', 'Pune', 'Vegetarian', 'Breakfast'),
    (2, 'Rice', 25, '2025-03-16', 2, 'Grocery Store', 'Pune', 'Vegan', 'Lunch'),
    (3, 'Chicken Curry', 5, '2025-03-20', 3, 'Supermarket', 'Delhi', 'Non-Vegetarian', 'Dinner'),
    (4, 'Apples', 40, '2025-03-14', 2, 'Grocery Store', 'Pune', 'Vegan', 'Snacks');

INSERT INTO claims VALUES
    (1, 1, 1, 'Completed', '2025-03-15 09:30:00'),
    (2, 2, 2, 'Pending', '2025-03-15 11:00:00'),
    (3, 4, 1, 'Completed', '2025-03-16 08:15:00');
"#;

pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
}

pub fn seeded_store() -> Arc<SqliteStore> {
    let store = SqliteStore::in_memory().unwrap();
    store.execute_batch(SCHEMA_AND_DATA).unwrap();
    Arc::new(store)
}

pub fn dashboard() -> Dashboard {
    Dashboard::new(QueryExecutor::new(seeded_store()))
}

pub fn session() -> SessionContext {
    SessionContext::new(reference_date())
}
