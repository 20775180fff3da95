//! Point cloud data structures and extraction from tables

use crate::error::Result;
use crate::point::*;
use crate::table::DataTable;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A generic point cloud container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointCloud<T> {
    pub points: Vec<T>,
}

/// A point cloud with 3D points
pub type PointCloud3f = PointCloud<Point3f>;

/// Names of the three table columns that hold spatial coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisAttributes {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl Default for AxisAttributes {
    fn default() -> Self {
        Self::new("x", "y", "z")
    }
}

impl AxisAttributes {
    pub fn new<S: Into<String>>(x: S, y: S, z: S) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }

    /// The three names in x, y, z order
    pub fn names(&self) -> [&str; 3] {
        [&self.x, &self.y, &self.z]
    }
}

impl<T> PointCloud<T> {
    /// Create a new empty point cloud
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a point cloud from a vector of points
    pub fn from_points(points: Vec<T>) -> Self {
        Self { points }
    }

    /// Get the number of points in the cloud
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point to the cloud
    pub fn push(&mut self, point: T) {
        self.points.push(point);
    }

    /// Get an iterator over the points
    pub fn iter(&self) -> std::slice::Iter<T> {
        self.points.iter()
    }
}

impl PointCloud<Point3f> {
    /// Extract one point per table row from the three named axis columns
    pub fn from_table(table: &DataTable, axes: &AxisAttributes) -> Result<Self> {
        let xs = table.column(&axes.x)?;
        let ys = table.column(&axes.y)?;
        let zs = table.column(&axes.z)?;

        Ok(xs
            .iter()
            .zip(ys)
            .zip(zs)
            .map(|((&x, &y), &z)| Point3f::new(x as f32, y as f32, z as f32))
            .collect())
    }
}

impl<T> Default for PointCloud<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for PointCloud<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<'a, T> IntoIterator for &'a PointCloud<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<T> FromIterator<T> for PointCloud<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            points: Vec::from_iter(iter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_from_table_uses_named_axes() {
        let table = DataTable::new("d")
            .with_column("a", vec![1.0, 2.0])
            .unwrap()
            .with_column("b", vec![3.0, 4.0])
            .unwrap()
            .with_column("c", vec![5.0, 6.0])
            .unwrap();

        let cloud = PointCloud::from_table(&table, &AxisAttributes::new("c", "a", "b")).unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud[0], Point3f::new(5.0, 1.0, 3.0));
        assert_eq!(cloud[1], Point3f::new(6.0, 2.0, 4.0));
    }

    #[test]
    fn test_from_table_missing_axis() {
        let table = DataTable::new("d").with_column("x", vec![1.0]).unwrap();
        let err = PointCloud::from_table(&table, &AxisAttributes::default()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(name) if name == "y"));
    }
}
