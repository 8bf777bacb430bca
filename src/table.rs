use crate::error::TableError;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::collections::{BTreeSet, HashMap};

/// A single cell; `None` marks an absent value
pub type Value = Option<String>;

/// Ordered rows sharing one column set
///
/// The first appended row with at least one key fixes the columns and their
/// order. Every later row must supply exactly those keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with no schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Column names in schema order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `index`, if any
    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    /// Rows in insertion order
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    /// Return a new table with `row` appended, leaving `self` untouched
    pub fn append<K, I>(&self, row: I) -> Result<Table, TableError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut table = self.clone();
        table.push(row)?;
        Ok(table)
    }

    /// Append `row` in place under the same schema rules as [`Table::append`]
    pub fn push<K, I>(&mut self, row: I) -> Result<(), TableError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut keys = Vec::new();
        let mut cells: HashMap<String, Value> = HashMap::new();
        for (key, value) in row {
            let key = key.into();
            if cells.insert(key.clone(), value).is_none() {
                keys.push(key);
            }
        }

        if self.columns.is_empty() {
            // Rows added before any column existed hold no cells; pad them
            for existing in &mut self.rows {
                existing.resize(keys.len(), None);
            }
            self.columns = keys;
        } else if !self.rows.is_empty() {
            self.check_schema(&keys)?;
        }

        let values = self
            .columns
            .iter()
            .map(|column| cells.remove(column).flatten())
            .collect();
        self.rows.push(values);
        Ok(())
    }

    /// Build a table from a JSON array of objects
    pub fn from_json(value: &serde_json::Value) -> Result<Table, TableError> {
        let records = value.as_array().ok_or(TableError::TypeMismatch {
            argument: "table",
            expected: "an array of records",
        })?;

        let mut table = Table::new();
        for record in records {
            table.push(json_record(record, "table")?)?;
        }
        Ok(table)
    }

    fn check_schema(&self, keys: &[String]) -> Result<(), TableError> {
        let keys: BTreeSet<&str> = keys.iter().map(String::as_str).collect();
        let columns: BTreeSet<&str> = self.columns.iter().map(String::as_str).collect();

        let extra: Vec<String> = keys.difference(&columns).map(|k| k.to_string()).collect();
        if !extra.is_empty() {
            return Err(TableError::KeysNotColumns(extra));
        }

        let missing: Vec<String> = columns.difference(&keys).map(|k| k.to_string()).collect();
        if !missing.is_empty() {
            return Err(TableError::ColumnsNotKeys(missing));
        }

        Ok(())
    }
}

/// Append a JSON object to `table`, returning the new table
pub fn append_json(table: &Table, row: &serde_json::Value) -> Result<Table, TableError> {
    table.append(json_record(row, "row")?)
}

fn json_record(
    value: &serde_json::Value,
    argument: &'static str,
) -> Result<Vec<(String, Value)>, TableError> {
    let object = value.as_object().ok_or(TableError::TypeMismatch {
        argument,
        expected: "a JSON object",
    })?;

    Ok(object
        .iter()
        .map(|(key, value)| {
            let cell = match value {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            };
            (key.clone(), cell)
        })
        .collect())
}

/// Borrowed view of one table row
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> Row<'a> {
    /// Value of `column`; `None` if the column is unknown or the cell is absent
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.values[index].as_deref()
    }

    /// Whether the row has a column named `column`
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, Option<&'a str>)> {
        self.columns
            .iter()
            .zip(self.values.iter())
            .map(|(c, v)| (c.as_str(), v.as_deref()))
    }
}

impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, &value)?;
        }
        map.end()
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows() {
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}
