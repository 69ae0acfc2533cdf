//! An immutable, chunked table of Arrow record batches

use crate::{Result, TableError};
use arrow_array::{ArrayRef, RecordBatch};
use arrow_schema::SchemaRef;

/// An immutable table: a schema plus ordered [`RecordBatch`] chunks.
///
/// Chunks share the table schema exactly. Batches hold `Arc`-backed
/// buffers, so cloning, slicing and concatenating tables never copies
/// column data.
#[derive(Debug, Clone)]
pub struct Table {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl Table {
    /// Create a table from a schema and batches, validating that every
    /// batch carries the same schema.
    pub fn new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Result<Self> {
        for (idx, batch) in batches.iter().enumerate() {
            if batch.schema().as_ref() != schema.as_ref() {
                return Err(TableError::schema(format!(
                    "batch {} schema does not match table schema",
                    idx
                )));
            }
        }
        Ok(Self { schema, batches })
    }

    /// Create a single-chunk table from one record batch.
    pub fn from_batch(batch: RecordBatch) -> Self {
        Self {
            schema: batch.schema(),
            batches: vec![batch],
        }
    }

    /// Create a table from batches, taking the schema from the first one.
    pub fn from_batches(batches: Vec<RecordBatch>) -> Result<Self> {
        let schema = batches
            .first()
            .ok_or_else(|| {
                TableError::invalid_argument("cannot build a table from zero batches")
            })?
            .schema();
        Self::new(schema, batches)
    }

    /// The table schema.
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Total number of rows across all chunks.
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(|b| b.num_rows()).sum()
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    /// The record-batch chunks making up this table.
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    /// The chunks of one column, by index.
    pub fn column(&self, column_idx: usize) -> Result<Vec<ArrayRef>> {
        let n_cols = self.num_columns();
        if column_idx >= n_cols {
            return Err(TableError::invalid_argument(format!(
                "invalid column index {} (ncols: {})",
                column_idx, n_cols
            )));
        }
        Ok(self
            .batches
            .iter()
            .map(|b| b.column(column_idx).clone())
            .collect())
    }

    /// The chunks of one column, by name.
    pub fn column_by_name(&self, name: &str) -> Result<Vec<ArrayRef>> {
        let column_idx = self
            .schema
            .index_of(name)
            .map_err(|_| TableError::invalid_argument(format!("cannot find column {}", name)))?;
        self.column(column_idx)
    }

    /// Zero-copy slice of `length` rows starting at `offset`.
    ///
    /// Follows Arrow's table-slice semantics: an offset past the end
    /// yields an empty table and the length is clamped to the rows that
    /// remain.
    pub fn slice(&self, offset: usize, length: usize) -> Table {
        let mut batches = Vec::new();
        let mut to_skip = offset;
        let mut to_take = length;
        for batch in &self.batches {
            let rows = batch.num_rows();
            if to_skip >= rows {
                to_skip -= rows;
                continue;
            }
            if to_take == 0 {
                break;
            }
            let take = to_take.min(rows - to_skip);
            batches.push(batch.slice(to_skip, take));
            to_skip = 0;
            to_take -= take;
        }
        Table {
            schema: self.schema.clone(),
            batches,
        }
    }

    /// Concatenate tables that share a schema into a single table.
    pub fn concat<'a, I>(tables: I) -> Result<Table>
    where
        I: IntoIterator<Item = &'a Table>,
    {
        let tables: Vec<&Table> = tables.into_iter().collect();
        let first = tables
            .first()
            .ok_or_else(|| TableError::invalid_argument("cannot concatenate zero tables"))?;
        let schema = first.schema.clone();
        let mut batches = Vec::new();
        for (idx, table) in tables.iter().enumerate() {
            if table.schema.as_ref() != schema.as_ref() {
                return Err(TableError::schema(format!(
                    "table {} schema does not match the first table's schema",
                    idx
                )));
            }
            batches.extend(table.batches.iter().cloned());
        }
        Ok(Table { schema, batches })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_array::Int64Array;
    use arrow_schema::{DataType, Field, Schema};
    use std::sync::Arc;

    fn int_table(values: Vec<i64>) -> Table {
        let schema = Arc::new(Schema::new(vec![Field::new("v", DataType::Int64, false)]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![Arc::new(Int64Array::from(values)) as ArrayRef],
        )
        .unwrap();
        Table::from_batch(batch)
    }

    #[test]
    fn test_from_batches_takes_schema_from_first() {
        let a = int_table(vec![1, 2]);
        let b = int_table(vec![3]);
        let batches: Vec<RecordBatch> = a
            .batches()
            .iter()
            .chain(b.batches())
            .cloned()
            .collect();
        let table = Table::from_batches(batches).unwrap();
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.schema().as_ref(), a.schema().as_ref());

        let err = Table::from_batches(vec![]).unwrap_err();
        assert!(err.to_string().contains("zero batches"));
    }

    #[test]
    fn test_slice_clamps_to_available_rows() {
        let table = int_table(vec![1, 2, 3, 4, 5]);
        assert_eq!(table.slice(1, 3).num_rows(), 3);
        assert_eq!(table.slice(3, 100).num_rows(), 2);
        assert_eq!(table.slice(10, 5).num_rows(), 0);
        assert_eq!(table.slice(0, 0).num_rows(), 0);
    }

    #[test]
    fn test_slice_spans_chunks() {
        let a = int_table(vec![1, 2, 3]);
        let b = int_table(vec![4, 5, 6]);
        let table = Table::concat([&a, &b]).unwrap();
        let sliced = table.slice(2, 3);
        assert_eq!(sliced.num_rows(), 3);
        assert_eq!(sliced.batches().len(), 2);
    }

    #[test]
    fn test_concat_requires_matching_schema() {
        let a = int_table(vec![1]);
        let schema = Arc::new(Schema::new(vec![Field::new("w", DataType::Int64, false)]));
        let batch = RecordBatch::try_new(
            schema,
            vec![Arc::new(Int64Array::from(vec![2i64])) as ArrayRef],
        )
        .unwrap();
        let b = Table::from_batch(batch);
        assert!(Table::concat([&a, &b]).is_err());
        assert!(Table::concat([]).is_err());
    }

    #[test]
    fn test_column_bounds() {
        let table = int_table(vec![1, 2]);
        assert_eq!(table.column(0).unwrap().len(), 1);
        let err = table.column(3).unwrap_err();
        assert!(err.to_string().contains("invalid column index 3"));
        assert!(table.column_by_name("missing").is_err());
    }
}
