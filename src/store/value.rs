use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Boolean,
    Integer,
    Float,
    Text,
    Date,
    Timestamp,
    Unknown,
}

impl DataType {
    pub fn is_numeric(self) -> bool {
        matches!(self, DataType::Integer | DataType::Float)
    }

    pub fn from_decl(decl: &str) -> Self {
        let decl = decl.to_ascii_uppercase();
        if decl.is_empty() {
            return DataType::Unknown;
        }
        if decl == "DATE" {
            return DataType::Date;
        }
        if decl.contains("TIMESTAMP") || decl == "DATETIME" {
            return DataType::Timestamp;
        }
        if decl.starts_with("BOOL") {
            return DataType::Boolean;
        }
        if decl.contains("INT") {
            return DataType::Integer;
        }
        if decl.contains("CHAR") || decl.contains("CLOB") || decl.contains("TEXT") {
            return DataType::Text;
        }
        if decl.contains("REAL")
            || decl.contains("FLOA")
            || decl.contains("DOUB")
            || decl.contains("NUMERIC")
            || decl.contains("DECIMAL")
        {
            return DataType::Float;
        }
        DataType::Unknown
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Boolean => "boolean",
            DataType::Integer => "integer",
            DataType::Float => "float",
            DataType::Text => "text",
            DataType::Date => "date",
            DataType::Timestamp => "timestamp",
            DataType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(DataType::Boolean),
            Value::Int(_) => Some(DataType::Integer),
            Value::Float(_) => Some(DataType::Float),
            Value::Text(_) => Some(DataType::Text),
            Value::Date(_) => Some(DataType::Date),
            Value::Timestamp(_) => Some(DataType::Timestamp),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
}

impl From<NaiveDate> for Param {
    fn from(d: NaiveDate) -> Self {
        Param::Date(d)
    }
}
