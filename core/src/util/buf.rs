//! Two-dimensional buffers.

use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};
use core::iter::repeat_n;
use core::ops::{Index, IndexMut};

/// A rectangular 2D buffer that owns its elements, backed by a `Vec`.
///
/// `Buf2` stores its elements contiguously, in standard row-major order,
/// such that element (x, y) maps to element at index
/// ```text
/// buf.width() * y + x
/// ```
/// in the backing vector.
///
/// # Examples
/// ```
/// # use rastrum_core::util::buf::Buf2;
/// // Elements initialized with `Default::default()`
/// let mut buf = Buf2::new_default(4, 4);
/// // Indexing with a pair [x, y] yields element at row y, column x:
/// buf[[2, 1]] = 123;
/// // Indexing with an usize i yields row with index i as a slice:
/// assert_eq!(&buf[1], &[0, 0, 123, 0]);
/// // Thus you can also do this, row first, column second:
/// assert_eq!(buf[1][2], 123)
/// ```
#[derive(Clone, Eq, PartialEq)]
pub struct Buf2<T> {
    w: usize,
    h: usize,
    data: Vec<T>,
}

impl<T> Buf2<T> {
    /// Returns a buffer with size `w` × `h`, with elements initialized
    /// with values from `init` in row-major order.
    ///
    /// # Panics
    /// If there are fewer than `w * h` elements in `init`.
    pub fn new<I>(w: usize, h: usize, init: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let data: Vec<_> = init.into_iter().take(w * h).collect();
        assert_eq!(data.len(), w * h, "too few elements for {w}x{h} buffer");
        Self { w, h, data }
    }
    /// Returns a buffer with size `w` × `h`, with every element
    /// initialized by calling `T::default()`.
    pub fn new_default(w: usize, h: usize) -> Self
    where
        T: Clone + Default,
    {
        Self::new(w, h, repeat_n(T::default(), w * h))
    }
    /// Returns a buffer with size `w` × `h`, with every element
    /// initialized by calling `init_fn(x, y)` where x is the column index
    /// and y the row index of the element being initialized.
    pub fn new_with<F>(w: usize, h: usize, mut init_fn: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            data.extend((0..w).map(|x| init_fn(x, y)));
        }
        Self { w, h, data }
    }

    /// Returns the width of `self`.
    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }
    /// Returns the height of `self`.
    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    /// Returns a view of the backing data of `self`.
    pub fn data(&self) -> &[T] {
        &self.data
    }
    /// Returns a mutable view of the backing data of `self`.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Returns an iterator over the rows of `self`, starting from row 0.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[T]> + '_ {
        // chunks_exact panics on zero chunk size
        self.data.chunks_exact(self.w.max(1))
    }

    /// Returns a reference to the element at (x, y), or `None` if out of
    /// bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        self.to_index(x, y).map(|i| &self.data[i])
    }
    /// Returns a mutable reference to the element at (x, y), or `None`
    /// if out of bounds.
    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        self.to_index(x, y).map(|i| &mut self.data[i])
    }

    /// Fills `self` with clones of `val`.
    pub fn fill(&mut self, val: T)
    where
        T: Clone,
    {
        self.data.fill(val);
    }

    #[inline]
    fn to_index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.w && y < self.h).then(|| self.w * y + x)
    }

    #[inline]
    fn to_index_strict(&self, x: usize, y: usize) -> usize {
        let Some(i) = self.to_index(x, y) else {
            panic!(
                "position (x={x}, y={y}) out of bounds (0..{}, 0..{})",
                self.w, self.h
            );
        };
        i
    }
}

impl<T> Index<[usize; 2]> for Buf2<T> {
    type Output = T;

    /// Returns a reference to the element at position [x, y].
    ///
    /// # Panics
    /// If the position is out of bounds.
    #[inline]
    fn index(&self, [x, y]: [usize; 2]) -> &T {
        &self.data[self.to_index_strict(x, y)]
    }
}

impl<T> IndexMut<[usize; 2]> for Buf2<T> {
    /// Returns a mutable reference to the element at position [x, y].
    ///
    /// # Panics
    /// If the position is out of bounds.
    #[inline]
    fn index_mut(&mut self, [x, y]: [usize; 2]) -> &mut T {
        let i = self.to_index_strict(x, y);
        &mut self.data[i]
    }
}

impl<T> Index<usize> for Buf2<T> {
    type Output = [T];

    /// Returns a reference to the row at index `i`.
    ///
    /// # Panics
    /// If `i` is out of bounds.
    #[inline]
    fn index(&self, i: usize) -> &[T] {
        assert!(i < self.h, "row index {i} out of bounds (0..{})", self.h);
        &self.data[i * self.w..][..self.w]
    }
}

impl<T> IndexMut<usize> for Buf2<T> {
    /// Returns a mutable reference to the row at index `i`.
    ///
    /// # Panics
    /// If `i` is out of bounds.
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut [T] {
        assert!(i < self.h, "row index {i} out of bounds (0..{})", self.h);
        &mut self.data[i * self.w..][..self.w]
    }
}

impl<T: Debug> Debug for Buf2<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buf2")
            .field("w", &self.w)
            .field("h", &self.h)
            .finish_non_exhaustive()
    }
}
