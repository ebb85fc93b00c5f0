use super::value::{DataType, Value};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
    pub values: Vec<Value>,
}

impl Column {
    pub fn is_numeric(&self) -> bool {
        self.data_type.is_numeric()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    columns: Vec<Column>,
    row_count: usize,
}

impl QueryResult {
    /// Builds a result from a header and row-major data. Duplicate column
    /// names get a numeric suffix so every name is unique.
    pub fn from_rows(header: Vec<(String, DataType)>, rows: Vec<Vec<Value>>) -> Self {
        let row_count = rows.len();
        let mut seen: HashSet<String> = HashSet::with_capacity(header.len());
        let mut columns: Vec<Column> = header
            .into_iter()
            .map(|(name, data_type)| {
                let name = unique_name(name, &mut seen);
                Column {
                    name,
                    data_type,
                    values: Vec::with_capacity(row_count),
                }
            })
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                column.values.push(cells.next().unwrap_or(Value::Null));
            }
        }

        Self { columns, row_count }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Value> {
        self.columns.get(column).and_then(|c| c.values.get(row))
    }

    pub fn row(&self, row: usize) -> Option<Vec<&Value>> {
        if row >= self.row_count {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[row]).collect())
    }

    pub fn scalar(&self) -> Option<&Value> {
        self.cell(0, 0)
    }
}

fn unique_name(name: String, seen: &mut HashSet<String>) -> String {
    if seen.insert(name.clone()) {
        return name;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{}_{}", name, n);
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

pub fn infer_type(values: &[Value]) -> DataType {
    let mut inferred: Option<DataType> = None;
    for value in values {
        let Some(ty) = value.data_type() else {
            continue;
        };
        inferred = Some(match (inferred, ty) {
            (None, ty) => ty,
            (Some(prev), ty) if prev == ty => prev,
            (Some(DataType::Integer), DataType::Float) | (Some(DataType::Float), DataType::Integer) => {
                DataType::Float
            }
            _ => DataType::Text,
        });
    }
    inferred.unwrap_or(DataType::Unknown)
}
