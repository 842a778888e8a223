//! `Debug` helpers for types that carry large buffers.
//!
//! A decoded map holds 16 KiB of palette indices; printing all of it makes
//! `{:?}` output useless. These formatters are meant for
//! `#[debug(with = ...)]` attributes from the `custom_debug` crate.

use std::fmt;

const FIRST_N_ELEMENTS: usize = 8;

/// Collections that can show a short prefix of themselves.
pub trait HasLength {
    type Item: fmt::Debug;

    fn item_count(&self) -> usize;
    fn head(&self, elements: usize) -> &[Self::Item];
}

impl<T: fmt::Debug> HasLength for [T] {
    type Item = T;

    fn item_count(&self) -> usize {
        self.len()
    }

    fn head(&self, elements: usize) -> &[Self::Item] {
        &self[..elements.min(self.len())]
    }
}

impl<T: fmt::Debug> HasLength for Vec<T> {
    type Item = T;

    fn item_count(&self) -> usize {
        self.len()
    }

    fn head(&self, elements: usize) -> &[Self::Item] {
        self.as_slice().head(elements)
    }
}

/// Print the first few elements followed by the number of elements left out.
#[cfg(not(feature = "debug-print-all"))]
pub fn trimmed_collection_fmt<T: HasLength + ?Sized>(n: &T, f: &mut fmt::Formatter) -> fmt::Result {
    let head = n.head(FIRST_N_ELEMENTS);
    let rest = n.item_count() - head.len();

    if rest == 0 {
        write!(f, "{:?}", head)
    } else {
        write!(f, "{:?} + {} elements", head, rest)
    }
}

#[cfg(feature = "debug-print-all")]
pub fn trimmed_collection_fmt<T: HasLength + fmt::Debug + ?Sized>(
    n: &T,
    f: &mut fmt::Formatter,
) -> fmt::Result {
    write!(f, "{:?}", n)
}
