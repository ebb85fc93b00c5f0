use crate::chart::{DualChart, SingleChart};
use crate::error::{DashboardError, Result};
use crate::store::{Column, QueryResult, Value};
use serde_json::{json, Map, Value as Json};

const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

// Fold output fields; prefixed so they never shadow a result column.
const FOLD_KEY: &str = "__series";
const FOLD_VALUE: &str = "__value";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMark {
    Bar,
    Line,
    Area,
    Pie,
    Donut,
    Combo,
    ClusteredBar,
    DualAxis,
}

impl From<SingleChart> for ChartMark {
    fn from(chart: SingleChart) -> Self {
        match chart {
            SingleChart::Bar => ChartMark::Bar,
            SingleChart::Line => ChartMark::Line,
            SingleChart::Area => ChartMark::Area,
            SingleChart::Pie => ChartMark::Pie,
            SingleChart::Donut => ChartMark::Donut,
        }
    }
}

impl From<DualChart> for ChartMark {
    fn from(chart: DualChart) -> Self {
        match chart {
            DualChart::Combo => ChartMark::Combo,
            DualChart::ClusteredBar => ChartMark::ClusteredBar,
            DualChart::DualAxis => ChartMark::DualAxis,
        }
    }
}

impl ChartMark {
    pub fn name(self) -> &'static str {
        match self {
            ChartMark::Bar => "bar",
            ChartMark::Line => "line",
            ChartMark::Area => "area",
            ChartMark::Pie => "pie",
            ChartMark::Donut => "donut",
            ChartMark::Combo => "combo",
            ChartMark::ClusteredBar => "clustered bar",
            ChartMark::DualAxis => "dual axis",
        }
    }

    pub fn is_share(self) -> bool {
        matches!(self, ChartMark::Pie | ChartMark::Donut)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: Option<String>,
    pub mark: ChartMark,
    pub x: String,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartSpec {
    pub fn single(
        mark: ChartMark,
        title: Option<&str>,
        result: &QueryResult,
        x: &str,
        y: &str,
    ) -> Result<Self> {
        let x_column = lookup(result, x)?;
        let series = measure(result, y, mark)?;
        Ok(Self {
            title: title.map(String::from),
            mark,
            x: x.to_string(),
            categories: labels(x_column),
            series: vec![series],
        })
    }

    pub fn dual(
        mark: ChartMark,
        title: Option<&str>,
        result: &QueryResult,
        x: &str,
        y: &str,
        y2: &str,
    ) -> Result<Self> {
        let x_column = lookup(result, x)?;
        let first = measure(result, y, mark)?;
        let second = measure(result, y2, mark)?;
        Ok(Self {
            title: title.map(String::from),
            mark,
            x: x.to_string(),
            categories: labels(x_column),
            series: vec![first, second],
        })
    }

    pub fn to_vega_lite(&self) -> Json {
        let mut doc = Map::new();
        doc.insert("$schema".into(), json!(VEGA_LITE_SCHEMA));
        if let Some(title) = &self.title {
            doc.insert("title".into(), json!(title));
        }
        doc.insert("width".into(), json!("container"));
        doc.insert("data".into(), json!({ "values": self.data_values() }));

        let x = escape_field(&self.x);
        let y = self.series.first().map(|s| escape_field(&s.name)).unwrap_or_default();
        let y2 = self.series.get(1).map(|s| escape_field(&s.name)).unwrap_or_default();
        let x_enc = json!({ "field": x, "type": "nominal", "sort": null });

        match self.mark {
            ChartMark::Bar | ChartMark::Line | ChartMark::Area => {
                doc.insert("mark".into(), json!({ "type": self.mark.name(), "tooltip": true }));
                doc.insert(
                    "encoding".into(),
                    json!({ "x": x_enc, "y": { "field": y, "type": "quantitative" } }),
                );
            }
            ChartMark::Pie | ChartMark::Donut => {
                let mut mark = json!({ "type": "arc", "tooltip": true, "outerRadius": 150 });
                if self.mark == ChartMark::Donut {
                    mark["innerRadius"] = json!(60);
                }
                doc.insert("mark".into(), mark);
                doc.insert(
                    "encoding".into(),
                    json!({
                        "theta": { "field": y, "type": "quantitative", "stack": true },
                        "color": { "field": x, "type": "nominal" }
                    }),
                );
            }
            ChartMark::Combo => {
                doc.insert(
                    "layer".into(),
                    json!([
                        {
                            "mark": { "type": "bar", "color": "skyblue" },
                            "encoding": { "x": x_enc, "y": { "field": y, "type": "quantitative" } }
                        },
                        {
                            "mark": { "type": "line", "color": "orange" },
                            "encoding": { "x": x_enc, "y": { "field": y2, "type": "quantitative" } }
                        }
                    ]),
                );
            }
            ChartMark::ClusteredBar => {
                doc.insert(
                    "transform".into(),
                    json!([{ "fold": [y, y2], "as": [FOLD_KEY, FOLD_VALUE] }]),
                );
                doc.insert("mark".into(), json!({ "type": "bar", "tooltip": true }));
                doc.insert(
                    "encoding".into(),
                    json!({
                        "x": x_enc,
                        "xOffset": { "field": FOLD_KEY },
                        "y": { "field": FOLD_VALUE, "type": "quantitative", "title": "value" },
                        "color": {
                            "field": FOLD_KEY,
                            "type": "nominal",
                            "title": "measure",
                            "scale": { "range": ["blue", "green"] }
                        }
                    }),
                );
            }
            ChartMark::DualAxis => {
                doc.insert(
                    "layer".into(),
                    json!([
                        {
                            "mark": { "type": "bar", "color": "blue" },
                            "encoding": {
                                "x": x_enc,
                                "y": { "field": y, "type": "quantitative", "axis": { "title": y } }
                            }
                        },
                        {
                            "mark": { "type": "line", "color": "orange" },
                            "encoding": {
                                "x": x_enc,
                                "y": {
                                    "field": y2,
                                    "type": "quantitative",
                                    "axis": { "title": y2, "orient": "right" }
                                }
                            }
                        }
                    ]),
                );
                doc.insert("resolve".into(), json!({ "scale": { "y": "independent" } }));
            }
        }

        Json::Object(doc)
    }

    fn data_values(&self) -> Vec<Json> {
        self.categories
            .iter()
            .enumerate()
            .map(|(i, category)| {
                let mut row = Map::new();
                row.insert(self.x.clone(), json!(category));
                for series in &self.series {
                    let value = series.values.get(i).copied().flatten();
                    row.insert(series.name.clone(), json!(value));
                }
                Json::Object(row)
            })
            .collect()
    }
}

fn lookup<'a>(result: &'a QueryResult, name: &str) -> Result<&'a Column> {
    result
        .column(name)
        .ok_or_else(|| DashboardError::ChartRejected(format!("Column '{}' not found", name)))
}

fn labels(column: &Column) -> Vec<String> {
    column.values.iter().map(Value::to_string).collect()
}

fn measure(result: &QueryResult, name: &str, mark: ChartMark) -> Result<Series> {
    let column = lookup(result, name)?;
    if !column.is_numeric() {
        return Err(DashboardError::ChartRejected(format!(
            "Column '{}' holds {} values; a {} chart needs a numeric measure",
            name,
            column.data_type,
            mark.name()
        )));
    }
    Ok(Series {
        name: name.to_string(),
        values: column.values.iter().map(Value::as_f64).collect(),
    })
}

fn escape_field(name: &str) -> String {
    name.replace('.', "\\.").replace('[', "\\[").replace(']', "\\]")
}
