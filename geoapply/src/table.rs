//! Geometry-bearing tables.
//!
//! A table is given to the engine as a [`ColumnMap`]: an ordered list of named columns, each holding either
//! geometries or plain attribute values. Geometry columns are lifted through the apply call, attribute columns are
//! moved over untouched, and the rows are put back together in the original order. A table type that knows how to
//! build itself from a column map gets itself back, any other type gets the column map.

use geoapply_types::error::GeoapplyTypesError;
use geoapply_types::{GeometryNode, TraitTarget};
use serde_json::Value;

use crate::applicator::{Applicator, ApplyToArray};
use crate::apply::{Applied, Apply};
use crate::error::ApplyError;
use crate::traversable::Traversable;

/// Column of a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Column<N> {
    /// Geometry column.
    Geometry(Vec<N>),
    /// Attribute column.
    Values(Vec<Value>),
}

impl<N> Column<N> {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            Column::Geometry(v) => v.len(),
            Column::Values(v) => v.len(),
        }
    }

    /// Returns true if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true for geometry columns.
    pub fn is_geometry(&self) -> bool {
        matches!(self, Column::Geometry(_))
    }
}

/// Ordered set of named columns of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap<N> {
    columns: Vec<(String, Column<N>)>,
}

impl<N> Default for ColumnMap<N> {
    fn default() -> Self {
        Self { columns: vec![] }
    }
}

impl<N> ColumnMap<N> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column. Fails if a column with this name exists or if the column length differs from the other
    /// columns.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        column: Column<N>,
    ) -> Result<(), GeoapplyTypesError> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(GeoapplyTypesError::Table(format!(
                "duplicate column {name}"
            )));
        }

        if let Some(rows) = self.row_count() {
            if rows != column.len() {
                return Err(GeoapplyTypesError::Table(format!(
                    "column {name} has {} rows, expected {rows}",
                    column.len()
                )));
            }
        }

        self.columns.push((name, column));
        Ok(())
    }

    /// Appends a geometry column.
    pub fn with_geometry(
        mut self,
        name: impl Into<String>,
        geometries: Vec<N>,
    ) -> Result<Self, GeoapplyTypesError> {
        self.insert(name, Column::Geometry(geometries))?;
        Ok(self)
    }

    /// Appends an attribute column.
    pub fn with_values(
        mut self,
        name: impl Into<String>,
        values: Vec<Value>,
    ) -> Result<Self, GeoapplyTypesError> {
        self.insert(name, Column::Values(values))?;
        Ok(self)
    }

    /// Column with the given name.
    pub fn get(&self, name: &str) -> Option<&Column<N>> {
        self.columns
            .iter()
            .find(|(column_name, _)| column_name == name)
            .map(|(_, column)| column)
    }

    /// Geometries of the column with the given name, if it is a geometry column.
    pub fn geometry(&self, name: &str) -> Option<&[N]> {
        match self.get(name)? {
            Column::Geometry(v) => Some(v),
            Column::Values(_) => None,
        }
    }

    /// Values of the column with the given name, if it is an attribute column.
    pub fn values(&self, name: &str) -> Option<&[Value]> {
        match self.get(name)? {
            Column::Values(v) => Some(v),
            Column::Geometry(_) => None,
        }
    }

    /// Removes the column with the given name and returns it.
    pub fn remove(&mut self, name: &str) -> Option<Column<N>> {
        let index = self
            .columns
            .iter()
            .position(|(column_name, _)| column_name == name)?;
        Some(self.columns.remove(index).1)
    }

    /// Names of all columns in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Names of the geometry columns in order.
    pub fn geometry_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|(_, column)| column.is_geometry())
            .map(|(name, _)| name.as_str())
    }

    /// Number of rows. `None` for a map without columns.
    pub fn row_count(&self) -> Option<usize> {
        self.columns.first().map(|(_, column)| column.len())
    }

    /// Returns the columns.
    pub fn into_columns(self) -> Vec<(String, Column<N>)> {
        self.columns
    }
}

/// Column of a [`ColumnMap`] with the geometries taken out.
#[derive(Debug)]
pub enum ColumnShell {
    /// Geometry column with this number of rows.
    Geometry(usize),
    /// Attribute column.
    Values(Vec<Value>),
}

impl<N> Traversable for ColumnMap<N>
where
    N: Traversable<Node = N> + GeometryNode,
{
    type Node = N;
    type Part = N;
    type Shell = Vec<(String, ColumnShell)>;

    fn reachable_traits(&self) -> TraitTarget {
        self.columns
            .iter()
            .filter_map(|(_, column)| match column {
                Column::Geometry(cells) => Some(cells),
                Column::Values(_) => None,
            })
            .flatten()
            .fold(TraitTarget::EMPTY, |acc, cell| acc.union(cell.reachable_traits()))
    }

    fn reaches(&self, target: TraitTarget) -> bool {
        self.columns.iter().all(|(_, column)| match column {
            Column::Geometry(cells) => cells.iter().all(|cell| Traversable::reaches(cell, target)),
            Column::Values(_) => true,
        })
    }

    fn traverse<A: Applicator<N>>(self, applicator: &mut A) -> Result<Self, A::Error> {
        let columns = self
            .columns
            .into_iter()
            .map(|(name, column)| {
                let column = match column {
                    Column::Geometry(cells) => {
                        Column::Geometry(ApplyToArray(&mut *applicator).apply_to(cells)?)
                    }
                    values => values,
                };
                Ok((name, column))
            })
            .collect::<Result<Vec<_>, A::Error>>()?;

        Ok(Self { columns })
    }

    fn collect_targets<E>(
        self,
        target: TraitTarget,
        out: &mut Vec<N>,
    ) -> Result<(), ApplyError<E>> {
        for (_, column) in self.columns {
            if let Column::Geometry(cells) = column {
                cells.collect_targets(target, out)?;
            }
        }

        Ok(())
    }

    fn into_parts(self, _target: TraitTarget) -> Result<(Self::Shell, Vec<N>), Self> {
        let mut parts = vec![];
        let shell = self
            .columns
            .into_iter()
            .map(|(name, column)| {
                let column = match column {
                    Column::Geometry(cells) => {
                        let rows = cells.len();
                        parts.extend(cells);
                        ColumnShell::Geometry(rows)
                    }
                    Column::Values(values) => ColumnShell::Values(values),
                };
                (name, column)
            })
            .collect();

        Ok((shell, parts))
    }

    fn from_parts(shell: Self::Shell, parts: Vec<N>) -> Result<Self, GeoapplyTypesError> {
        let expected: usize = shell
            .iter()
            .map(|(_, column)| match column {
                ColumnShell::Geometry(rows) => *rows,
                ColumnShell::Values(_) => 0,
            })
            .sum();
        if expected != parts.len() {
            return Err(GeoapplyTypesError::Table(format!(
                "expected {expected} geometries, got {}",
                parts.len()
            )));
        }

        let mut parts = parts.into_iter();
        let columns = shell
            .into_iter()
            .map(|(name, column)| {
                let column = match column {
                    ColumnShell::Geometry(rows) => {
                        Column::Geometry(parts.by_ref().take(rows).collect())
                    }
                    ColumnShell::Values(values) => Column::Values(values),
                };
                (name, column)
            })
            .collect();

        Ok(Self { columns })
    }
}

/// A table with one or more geometry columns.
pub trait GeometryTable: Sized {
    /// Geometry type of the geometry columns.
    type Node: GeometryNode;

    /// Names of the geometry columns.
    fn geometry_columns(&self) -> Vec<String>;

    /// Converts the table into columns.
    fn into_column_map(self) -> ColumnMap<Self::Node>;

    /// Builds the table back from columns. The default implementation cannot, and returns the columns back.
    fn materialize(columns: ColumnMap<Self::Node>) -> Result<Self, ColumnMap<Self::Node>> {
        Err(columns)
    }
}

impl<N: GeometryNode> GeometryTable for ColumnMap<N> {
    type Node = N;

    fn geometry_columns(&self) -> Vec<String> {
        ColumnMap::geometry_columns(self).map(String::from).collect()
    }

    fn into_column_map(self) -> ColumnMap<N> {
        self
    }

    fn materialize(columns: ColumnMap<N>) -> Result<Self, ColumnMap<N>> {
        Ok(columns)
    }
}

/// Output of [`apply_table`].
#[derive(Debug, Clone, PartialEq)]
pub enum TableOutput<T: GeometryTable> {
    /// The table type was able to materialize itself from the transformed columns.
    Table(T),
    /// Transformed columns of a table type without a materializer.
    Columns(ColumnMap<T::Node>),
}

impl<T: GeometryTable> TableOutput<T> {
    /// Returns the table, if it was materialized.
    pub fn into_table(self) -> Option<T> {
        match self {
            TableOutput::Table(table) => Some(table),
            TableOutput::Columns(_) => None,
        }
    }

    /// Returns the columns, converting the materialized table back if needed.
    pub fn into_column_map(self) -> ColumnMap<T::Node> {
        match self {
            TableOutput::Table(table) => table.into_column_map(),
            TableOutput::Columns(columns) => columns,
        }
    }
}

/// Transforms the geometry columns of a table with the given call.
pub fn apply_table<T, F, E>(
    call: &Apply,
    f: F,
    table: T,
) -> Result<Applied<TableOutput<T>>, ApplyError<E>>
where
    T: GeometryTable,
    T::Node: Traversable<Node = T::Node> + Send,
    F: Fn(T::Node) -> Result<T::Node, E> + Sync,
    E: Send,
{
    let declared = table.geometry_columns();
    let columns = table.into_column_map();
    if let Some(missing) = declared
        .iter()
        .find(|name| columns.geometry(name).is_none())
    {
        return Err(GeoapplyTypesError::Table(format!(
            "declared geometry column {missing} is not in the column map"
        ))
        .into());
    }

    let Applied { value, extent } = call.run(f, columns)?;
    let value = match T::materialize(value) {
        Ok(table) => TableOutput::Table(table),
        Err(columns) => {
            log::debug!("Table type has no materializer, returning columns");
            TableOutput::Columns(columns)
        }
    };

    Ok(Applied { value, extent })
}
