use crate::cell::GeoHash;
use crate::coord::{Coordinate, validate};
use crate::error::GeoHashError;
use crate::geom::BoundingBox;
use crate::index::{LATITUDE_RANGE, LONGITUDE_RANGE, Precision, decode_bounds, encode_bits};
use geo_types::Rect;
use std::iter::FusedIterator;
use std::ops::Range;

/// Row/column geometry of the grid at one precision.
#[derive(Debug, Clone, Copy, PartialEq)]
struct GridLayout {
    bit_count: u32,
    lat_bits: u32,
    lon_bits: u32,
    lat_delta: f64,
    lon_delta: f64,
}

impl GridLayout {
    fn new(precision: Precision) -> Result<Self, GeoHashError> {
        let bit_count = precision.bit_count();
        if bit_count >= usize::BITS {
            return Err(GeoHashError::GridTooLarge(bit_count));
        }

        // Every cell has the size of the all-zero cell.
        let base = decode_bounds(&vec![false; bit_count as usize]);

        Ok(Self {
            bit_count,
            lat_bits: precision.latitude_bit_count(),
            lon_bits: precision.longitude_bit_count(),
            lat_delta: base.height(),
            lon_delta: base.width(),
        })
    }

    fn rows(&self) -> u64 {
        1 << self.lat_bits
    }

    fn cols(&self) -> u64 {
        1 << self.lon_bits
    }

    /// `(row, col)` of the cell a coordinate encodes to. Row 0 is the northernmost.
    fn row_col(&self, latitude: f64, longitude: f64) -> (u64, u64) {
        let bits = encode_bits(latitude, longitude, self.bit_count);
        let mut lat_idx = 0u64;
        let mut lon_idx = 0u64;
        for (i, &bit) in bits.iter().enumerate() {
            if i % 2 == 0 {
                lon_idx = (lon_idx << 1) | u64::from(bit);
            } else {
                lat_idx = (lat_idx << 1) | u64::from(bit);
            }
        }
        (self.rows() - 1 - lat_idx, lon_idx)
    }

    fn bounding_box(&self, row: u64, col: u64) -> BoundingBox {
        let top = LATITUDE_RANGE[1] - row as f64 * self.lat_delta;
        let left = LONGITUDE_RANGE[0] + col as f64 * self.lon_delta;
        BoundingBox::from_edges(top, top - self.lat_delta, left, left + self.lon_delta)
    }

    fn bits(&self, row: u64, col: u64) -> Vec<bool> {
        let lat_idx = self.rows() - 1 - row;
        (0..self.bit_count)
            .map(|i| {
                let (idx, width) = if i % 2 == 0 {
                    (col, self.lon_bits)
                } else {
                    (lat_idx, self.lat_bits)
                };
                (idx >> (width - 1 - i / 2)) & 1 == 1
            })
            .collect()
    }
}

/// A rectangular block of geohash cells at one precision, by default the whole globe.
///
/// Cells are produced lazily in row-major order: north to south, then west to east.
///
/// # Example
///
/// ```
/// use geohash_grid::{GeoHashGrid, GeoHashError, Precision};
///
/// # fn main() -> Result<(), GeoHashError> {
/// let grid = GeoHashGrid::new(Precision::exact(10)?)?;
/// assert_eq!(grid.len(), 1024);
///
/// let first = grid.cells().next().unwrap();
/// assert_eq!(first.top_left.latitude, 90.0);
/// assert_eq!(first.top_left.longitude, -180.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GeoHashGrid {
    precision: Precision,
    layout: GridLayout,
    rows: Range<u64>,
    cols: Range<u64>,
}

impl GeoHashGrid {
    pub fn builder() -> GeoHashGridBuilder {
        GeoHashGridBuilder::new()
    }

    /// The full-globe grid at `precision`.
    pub fn new(precision: Precision) -> Result<Self, GeoHashError> {
        let layout = GridLayout::new(precision)?;
        Ok(Self {
            precision,
            layout,
            rows: 0..layout.rows(),
            cols: 0..layout.cols(),
        })
    }

    /// The cells touched by an extent given in degrees (x = longitude, y = latitude).
    pub fn from_extent(
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
        precision: Precision,
    ) -> Result<Self, GeoHashError> {
        validate(min_lat, min_lon)?;
        validate(max_lat, max_lon)?;

        let layout = GridLayout::new(precision)?;
        let (top_row, left_col) = layout.row_col(max_lat.max(min_lat), min_lon.min(max_lon));
        let (bottom_row, right_col) = layout.row_col(min_lat.min(max_lat), max_lon.max(min_lon));

        Ok(Self {
            precision,
            layout,
            rows: top_row..bottom_row + 1,
            cols: left_col..right_col + 1,
        })
    }

    pub fn from_rect(rect: &Rect<f64>, precision: Precision) -> Result<Self, GeoHashError> {
        Self::from_extent(
            rect.min().x,
            rect.min().y,
            rect.max().x,
            rect.max().y,
            precision,
        )
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn len(&self) -> usize {
        ((self.rows.end - self.rows.start) * (self.cols.end - self.cols.start)) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell rectangles in row-major order.
    pub fn cells(&self) -> GridCells {
        GridCells {
            indices: GridIndices::new(self.rows.clone(), self.cols.clone()),
            layout: self.layout,
        }
    }

    /// Geohashes of the cells, in the same order as [`GeoHashGrid::cells`].
    pub fn geohashes(&self) -> impl ExactSizeIterator<Item = GeoHash> + use<> {
        let layout = self.layout;
        let precision = self.precision;
        GridIndices::new(self.rows.clone(), self.cols.clone())
            .map(move |(row, col)| GeoHash::from_bits_unchecked(layout.bits(row, col), precision))
    }

    /// The cell containing `coord`, if it is part of this grid.
    pub fn get_cell_at<C: Coordinate>(&self, coord: &C) -> Option<BoundingBox> {
        validate(coord.latitude(), coord.longitude()).ok()?;
        let (row, col) = self.layout.row_col(coord.latitude(), coord.longitude());
        if self.rows.contains(&row) && self.cols.contains(&col) {
            Some(self.layout.bounding_box(row, col))
        } else {
            None
        }
    }
}

/// Enumerates every cell on the globe at `precision`.
///
/// Yields exactly `2^bit_count` rectangles without gaps or overlaps.
pub fn all_cells(precision: Precision) -> Result<GridCells, GeoHashError> {
    Ok(GeoHashGrid::new(precision)?.cells())
}

#[derive(Debug, Clone)]
struct GridIndices {
    rows: Range<u64>,
    cols: Range<u64>,
    next: u64,
    end: u64,
}

impl GridIndices {
    fn new(rows: Range<u64>, cols: Range<u64>) -> Self {
        let end = (rows.end - rows.start) * (cols.end - cols.start);
        Self {
            rows,
            cols,
            next: 0,
            end,
        }
    }
}

impl Iterator for GridIndices {
    type Item = (u64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let width = self.cols.end - self.cols.start;
        let row = self.rows.start + self.next / width;
        let col = self.cols.start + self.next % width;
        self.next += 1;
        Some((row, col))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridIndices {}

impl FusedIterator for GridIndices {}

/// Lazy iterator over the cell rectangles of a [`GeoHashGrid`].
#[derive(Debug, Clone)]
pub struct GridCells {
    indices: GridIndices,
    layout: GridLayout,
}

impl Iterator for GridCells {
    type Item = BoundingBox;

    fn next(&mut self) -> Option<Self::Item> {
        let (row, col) = self.indices.next()?;
        Some(self.layout.bounding_box(row, col))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl ExactSizeIterator for GridCells {}

impl FusedIterator for GridCells {}

#[derive(Debug, Default)]
pub struct GeoHashGridBuilder {
    precision: Option<Precision>,
    min_lon: Option<f64>,
    min_lat: Option<f64>,
    max_lon: Option<f64>,
    max_lat: Option<f64>,
}

impl GeoHashGridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn precision(mut self, precision: Precision) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn extent(mut self, min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        self.min_lon = Some(min_lon);
        self.min_lat = Some(min_lat);
        self.max_lon = Some(max_lon);
        self.max_lat = Some(max_lat);
        self
    }

    pub fn rect(self, rect: &Rect<f64>) -> Self {
        self.extent(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }

    /// Builds the grid. Without an extent the grid covers the globe; without a
    /// precision it uses [`Precision::default`].
    pub fn build(self) -> Result<GeoHashGrid, GeoHashError> {
        let precision = self.precision.unwrap_or_default();
        match (self.min_lon, self.min_lat, self.max_lon, self.max_lat) {
            (Some(min_lon), Some(min_lat), Some(max_lon), Some(max_lat)) => {
                GeoHashGrid::from_extent(min_lon, min_lat, max_lon, max_lat, precision)
            }
            _ => GeoHashGrid::new(precision),
        }
    }
}
