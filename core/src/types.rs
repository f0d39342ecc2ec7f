/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for cell and pair totals.
pub type CellCount = u16;

/// Two-dimensional board coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Index into the dealt deck's symbol table.
pub type SymbolId = u16;

/// Milliseconds since an arbitrary epoch chosen by the driver's clock.
pub type TimestampMs = u64;

/// Counter distinguishing scheduled callbacks from before vs. after a reset.
pub type Generation = u32;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Row-major iteration over every coordinate of a `size` grid.
pub fn iter_coords((rows, cols): Coord2) -> impl Iterator<Item = Coord2> {
    (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
}
