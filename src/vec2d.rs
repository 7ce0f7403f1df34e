use std::fmt;
use std::fmt::{Debug, Formatter};
use std::ops::{Index, IndexMut};

use crate::data::Pos;

/// Row-major grid. Dimensions are validated by the owner before construction.
#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) struct Vec2d<T> {
    data: Vec<T>,
    rows: u8,
    cols: u8,
}

impl<T> Vec2d<T> {
    pub(crate) fn rows(&self) -> u8 {
        self.rows
    }

    pub(crate) fn cols(&self) -> u8 {
        self.cols
    }

    pub(crate) fn positions(&self) -> impl Iterator<Item = Pos> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| Pos::new(r, c)))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (Pos, &T)> {
        self.positions().zip(self.data.iter())
    }

    pub(crate) fn swap(&mut self, a: Pos, b: Pos) {
        let a = self.index_of(a);
        let b = self.index_of(b);
        self.data.swap(a, b);
    }

    fn index_of(&self, pos: Pos) -> usize {
        usize::from(pos.r) * usize::from(self.cols) + usize::from(pos.c)
    }
}

impl<T: Copy> Vec2d<T> {
    /// Caller guarantees `data.len() == rows * cols`.
    pub(crate) fn from_vec(data: Vec<T>, rows: u8, cols: u8) -> Self {
        debug_assert_eq!(data.len(), usize::from(rows) * usize::from(cols));
        Vec2d { data, rows, cols }
    }
}

impl<T: Debug> Debug for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols.into()) {
            writeln!(f, "{:?}", row)?;
        }
        Ok(())
    }
}

impl<T> Index<Pos> for Vec2d<T> {
    type Output = T;

    fn index(&self, index: Pos) -> &Self::Output {
        // unchecked indexing is only marginally faster (if at all) to justify unsafe
        &self.data[self.index_of(index)]
    }
}

impl<T> IndexMut<Pos> for Vec2d<T> {
    fn index_mut(&mut self, index: Pos) -> &mut Self::Output {
        let index = self.index_of(index);
        &mut self.data[index]
    }
}
