use crate::store::Dialect;

pub const COUNT_PROVIDERS: &str = "SELECT COUNT(*) AS count FROM providers;";
pub const COUNT_RECEIVERS: &str = "SELECT COUNT(*) AS count FROM receivers;";
pub const COUNT_LISTINGS: &str = "SELECT COUNT(*) AS count FROM food_listings;";
pub const COUNT_CLAIMS: &str = "SELECT COUNT(*) AS count FROM claims;";

pub const ALL_PROVIDERS: &str = "SELECT * FROM providers;";
pub const ALL_RECEIVERS: &str = "SELECT * FROM receivers;";
pub const ALL_LISTINGS: &str = "SELECT * FROM food_listings;";
pub const ALL_CLAIMS: &str = "SELECT * FROM claims;";

pub const PROVIDERS_BY_CITY: &str =
    "SELECT city, COUNT(*) AS count FROM providers GROUP BY city ORDER BY city;";
pub const RECEIVERS_BY_CITY: &str =
    "SELECT city, COUNT(*) AS count FROM receivers GROUP BY city ORDER BY city;";
pub const CLAIMS_BY_STATUS: &str =
    "SELECT status, COUNT(*) AS count FROM claims GROUP BY status ORDER BY status;";

pub const QUANTITY_BY_PROVIDER_TYPE: &str = r#"
    SELECT p.type, SUM(f.quantity) AS total_quantity
    FROM providers p
    JOIN food_listings f ON p.provider_id = f.provider_id
    GROUP BY p.type
    ORDER BY total_quantity DESC;
"#;

pub const FOOD_TYPE_COUNTS: &str = r#"
    SELECT food_type, COUNT(*) AS count
    FROM food_listings
    GROUP BY food_type
    ORDER BY count DESC;
"#;

pub fn near_expiry(dialect: Dialect) -> String {
    format!(
        r#"
    SELECT food_id, food_name, expiry_date, location, quantity
    FROM food_listings
    WHERE expiry_date BETWEEN {} AND {}
    ORDER BY expiry_date;
"#,
        dialect.date_param(1),
        dialect.date_plus_days(1, 1)
    )
}
