//! Column-oriented table built from gateway responses.
//!
//! The gateway answers with a handful of JSON layouts (column arrays, nested
//! column objects, or record lists). [`Table`] reads all of them into the same
//! shape: ordered row labels plus ordered columns of JSON cells. Both orders
//! follow the response, so `serde_json` is built with `preserve_order`.

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};

use crate::errors::{InvokerError, ShapeSnafu};

/// Ordered row labels plus ordered columns of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    index: Vec<String>,
    columns: IndexMap<String, Vec<Value>>,
}

/// A borrowed view of one row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    pub label: &'a str,
    pub cells: Vec<(&'a str, &'a Value)>,
}

impl<'a> Row<'a> {
    /// Cell value for `column`, if the table has that column.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.cells
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| *value)
    }
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from explicit parts, checking every column matches the index length.
    pub fn from_parts(
        index: Vec<String>,
        columns: IndexMap<String, Vec<Value>>,
    ) -> Result<Self, InvokerError> {
        if let Some((name, values)) = columns.iter().find(|(_, v)| v.len() != index.len()) {
            return Err(shape_error(format!(
                "column `{}` has {} values but the index has {}",
                name,
                values.len(),
                index.len()
            )));
        }
        Ok(Self { index, columns })
    }

    /// Reads a decoded response body.
    ///
    /// Accepted layouts:
    /// - `null` or `{}` or `[]`: empty table
    /// - `{"col": [v, ...], ...}`: columns, rows labelled `0..n`
    /// - `{"col": {"row": v, ...}, ...}`: columns keyed by row label
    /// - `[{"col": v, ...}, ...]`: records, rows labelled `0..n`
    /// - `[v, ...]`: a single column named `0`
    pub fn from_json(value: Value) -> Result<Self, InvokerError> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(map) => Self::from_object(map),
            Value::Array(items) => Self::from_array(items),
            other => Err(shape_error(format!(
                "expected an object or array, got `{}`",
                other
            ))),
        }
    }

    fn from_object(map: Map<String, Value>) -> Result<Self, InvokerError> {
        if map.is_empty() {
            return Ok(Self::new());
        }

        if map.values().all(Value::is_array) {
            let mut rows = None;
            let mut columns = IndexMap::with_capacity(map.len());
            for (name, value) in map {
                let Value::Array(values) = value else {
                    continue;
                };
                match rows {
                    None => rows = Some(values.len()),
                    Some(n) if n != values.len() => {
                        return Err(shape_error(format!(
                            "column `{}` has {} values, expected {}",
                            name,
                            values.len(),
                            n
                        )));
                    }
                    Some(_) => {}
                }
                columns.insert(name, values);
            }
            return Ok(Self {
                index: positional_index(rows.unwrap_or(0)),
                columns,
            });
        }

        if map.values().all(Value::is_object) {
            let mut labels: IndexSet<String> = IndexSet::new();
            for value in map.values() {
                if let Value::Object(cells) = value {
                    labels.extend(cells.keys().cloned());
                }
            }
            let index: Vec<String> = labels.into_iter().collect();
            let columns = map
                .into_iter()
                .map(|(name, value)| {
                    let mut cells = match value {
                        Value::Object(cells) => cells,
                        _ => Map::new(),
                    };
                    let values = index
                        .iter()
                        .map(|label| cells.remove(label).unwrap_or(Value::Null))
                        .collect();
                    (name, values)
                })
                .collect();
            return Ok(Self { index, columns });
        }

        Err(shape_error(
            "object values must be all arrays or all objects".to_string(),
        ))
    }

    fn from_array(items: Vec<Value>) -> Result<Self, InvokerError> {
        if items.is_empty() {
            return Ok(Self::new());
        }

        let index = positional_index(items.len());

        if items.iter().all(Value::is_object) {
            let mut names: IndexSet<String> = IndexSet::new();
            for item in &items {
                if let Value::Object(record) = item {
                    names.extend(record.keys().cloned());
                }
            }
            let mut columns: IndexMap<String, Vec<Value>> = names
                .into_iter()
                .map(|name| (name, Vec::with_capacity(items.len())))
                .collect();
            for item in items {
                let mut record = match item {
                    Value::Object(record) => record,
                    _ => Map::new(),
                };
                for (name, values) in columns.iter_mut() {
                    values.push(record.remove(name).unwrap_or(Value::Null));
                }
            }
            return Ok(Self { index, columns });
        }

        if items.iter().any(|v| v.is_object() || v.is_array()) {
            return Err(shape_error(
                "array items must be all records or all scalars".to_string(),
            ));
        }

        let mut columns = IndexMap::new();
        columns.insert("0".to_string(), items);
        Ok(Self { index, columns })
    }

    /// Row labels in order.
    pub fn index(&self) -> &[String] {
        &self.index
    }

    /// Column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when the table has no rows or no columns.
    ///
    /// A transposed `{"600000.SH": {}}` has one row label but nothing in it,
    /// which counts as empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty() || self.columns.is_empty()
    }

    pub fn row(&self, i: usize) -> Option<Row<'_>> {
        let label = self.index.get(i)?;
        let cells = self
            .columns
            .iter()
            .map(|(name, values)| (name.as_str(), &values[i]))
            .collect();
        Some(Row { label, cells })
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.len()).filter_map(move |i| self.row(i))
    }

    /// Swaps rows and columns.
    ///
    /// Column names become row labels and row labels become column names. Row
    /// labels are expected to be unique; a repeated label keeps its last row.
    pub fn transpose(self) -> Table {
        let Table { index, columns } = self;
        let new_index: Vec<String> = columns.keys().cloned().collect();
        let mut new_columns: IndexMap<String, Vec<Value>> = IndexMap::with_capacity(index.len());

        for (i, label) in index.into_iter().enumerate() {
            let values = columns
                .values()
                .map(|column| column.get(i).cloned().unwrap_or(Value::Null))
                .collect();
            new_columns.insert(label, values);
        }

        Table {
            index: new_index,
            columns: new_columns,
        }
    }

    /// Stacks tables vertically in the given order.
    ///
    /// The result has the union of all columns in first-seen order; cells a part
    /// has no column for are `null`.
    pub fn concat(parts: Vec<Table>) -> Table {
        let mut names: IndexSet<String> = IndexSet::new();
        let mut rows = 0;
        for part in &parts {
            names.extend(part.columns.keys().cloned());
            rows += part.len();
        }

        let mut index = Vec::with_capacity(rows);
        let mut columns: IndexMap<String, Vec<Value>> = names
            .into_iter()
            .map(|name| (name, Vec::with_capacity(rows)))
            .collect();

        for mut part in parts {
            let n = part.len();
            index.append(&mut part.index);
            for (name, values) in columns.iter_mut() {
                match part.columns.swap_remove(name) {
                    Some(mut cells) => values.append(&mut cells),
                    None => values.extend(std::iter::repeat_n(Value::Null, n)),
                }
            }
        }

        Table { index, columns }
    }

    /// One JSON object per row, with the row label under `index`.
    pub fn to_records(&self) -> Vec<Value> {
        self.iter_rows()
            .map(|row| {
                let mut record = Map::with_capacity(row.cells.len() + 1);
                record.insert("index".to_string(), Value::String(row.label.to_string()));
                for (name, value) in row.cells {
                    record.insert(name.to_string(), value.clone());
                }
                Value::Object(record)
            })
            .collect()
    }
}

fn positional_index(n: usize) -> Vec<String> {
    (0..n).map(|i| i.to_string()).collect()
}

fn shape_error(message: String) -> InvokerError {
    ShapeSnafu { message }.build()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_column_arrays() {
        let table = Table::from_json(json!({
            "time": ["2018-06-15", "2018-06-19"],
            "close": [10.1, 10.3],
        }))
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.index(), ["0", "1"]);
        assert_eq!(table.column_names().collect::<Vec<_>>(), ["time", "close"]);
        assert_eq!(table.column("close").unwrap(), [json!(10.1), json!(10.3)]);
    }

    #[test]
    fn reads_nested_columns_with_missing_cells() {
        let table = Table::from_json(json!({
            "open": {"600000.SH": 1.0, "600004.SH": 2.0},
            "close": {"600004.SH": 3.0},
        }))
        .unwrap();

        assert_eq!(table.index(), ["600000.SH", "600004.SH"]);
        assert_eq!(table.column("close").unwrap(), [Value::Null, json!(3.0)]);
    }

    #[test]
    fn reads_records_with_union_of_keys() {
        let table = Table::from_json(json!([
            {"thscode": "600004.SH", "close": 1},
            {"thscode": "600007.SH", "open": 2},
        ]))
        .unwrap();

        assert_eq!(table.column_names().collect::<Vec<_>>(), ["thscode", "close", "open"]);
        let row = table.row(1).unwrap();
        assert_eq!(row.label, "1");
        assert_eq!(row.get("open"), Some(&json!(2)));
        assert_eq!(row.get("close"), Some(&Value::Null));
    }

    #[test]
    fn empty_inputs_give_empty_tables() {
        assert!(Table::from_json(Value::Null).unwrap().is_empty());
        assert!(Table::from_json(json!({})).unwrap().is_empty());
        assert!(Table::from_json(json!([])).unwrap().is_empty());
        assert!(Table::from_json(json!({"close": []})).unwrap().is_empty());
    }

    #[test]
    fn transposed_code_without_fields_is_empty() {
        let table = Table::from_json(json!({"600000.SH": {}})).unwrap();
        assert!(table.is_empty());

        let table = table.transpose();
        assert_eq!(table.len(), 1);
        assert!(table.is_empty());
    }

    #[test]
    fn rejects_non_tabular_bodies() {
        assert!(matches!(
            Table::from_json(json!("oops")),
            Err(InvokerError::Shape { .. })
        ));
        assert!(matches!(
            Table::from_json(json!({"a": [1, 2], "b": [3]})),
            Err(InvokerError::Shape { .. })
        ));
        assert!(matches!(
            Table::from_json(json!({"a": [1], "b": {"x": 1}})),
            Err(InvokerError::Shape { .. })
        ));
    }

    #[test]
    fn from_parts_checks_lengths() {
        let mut columns = IndexMap::new();
        columns.insert("a".to_string(), vec![json!(1)]);
        assert!(Table::from_parts(vec!["r0".into(), "r1".into()], columns).is_err());
    }

    #[test]
    fn transpose_keys_rows_by_code() {
        // wss style: code -> {field -> value}, read as columns keyed by code
        let table = Table::from_json(json!({
            "600000.SH": {"open": 1.0, "close": 2.0},
            "600004.SH": {"open": 3.0, "close": 4.0},
        }))
        .unwrap()
        .transpose();

        assert_eq!(table.index(), ["600000.SH", "600004.SH"]);
        assert_eq!(table.column_names().collect::<Vec<_>>(), ["open", "close"]);
        assert_eq!(table.column("close").unwrap(), [json!(2.0), json!(4.0)]);
    }

    #[test]
    fn concat_preserves_order_and_fills_missing_columns() {
        let first = Table::from_json(json!([{"code": "A", "x": 1}, {"code": "B", "x": 2}])).unwrap();
        let second = Table::from_json(json!([{"code": "C", "y": 3}])).unwrap();

        let table = Table::concat(vec![first, second]);

        assert_eq!(table.len(), 3);
        assert_eq!(table.index(), ["0", "1", "0"]);
        assert_eq!(
            table.column("code").unwrap(),
            [json!("A"), json!("B"), json!("C")]
        );
        assert_eq!(table.column("x").unwrap(), [json!(1), json!(2), Value::Null]);
        assert_eq!(table.column("y").unwrap(), [Value::Null, Value::Null, json!(3)]);
    }

    #[test]
    fn records_carry_the_row_label() {
        let table = Table::from_json(json!({"close": {"600000.SH": 9.5}})).unwrap();
        assert_eq!(
            table.to_records(),
            vec![json!({"index": "600000.SH", "close": 9.5})]
        );
    }
}
