//! Ordered `(line, offset)` coordinates into a document.

/// A position in a document.
///
/// `line_offset` is a UTF-8 byte offset into the logical line. Anchors order
/// by line first, then by offset, which is exactly the derived ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Anchor {
    pub line_index: usize,
    pub line_offset: usize,
}

impl Anchor {
    /// Build an anchor from a line index and a byte offset.
    pub const fn new(line_index: usize, line_offset: usize) -> Self {
        Self {
            line_index,
            line_offset,
        }
    }

    /// Returns `true` when `self` lies in the half-open range spanned by `b`
    /// and `c`, regardless of their order.
    pub fn between(self, b: Anchor, c: Anchor) -> bool {
        let (lo, hi) = ordered(b, c);
        self >= lo && self < hi
    }

    /// Anchor shifted right by `bytes` on the same line.
    pub fn offset_by(self, bytes: usize) -> Self {
        Self {
            line_index: self.line_index,
            line_offset: self.line_offset + bytes,
        }
    }
}

/// Return `(min, max)` of two anchors.
pub fn ordered(a: Anchor, b: Anchor) -> (Anchor, Anchor) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Anchor> {
        let mut anchors = Vec::new();
        for line in 0..4 {
            for offset in 0..4 {
                anchors.push(Anchor::new(line, offset));
            }
        }
        anchors
    }

    #[test]
    fn compare_orders_by_line_then_offset() {
        assert!(Anchor::new(0, 9) < Anchor::new(1, 0));
        assert!(Anchor::new(2, 1) < Anchor::new(2, 3));
        assert_eq!(Anchor::new(3, 3), Anchor::new(3, 3));
        assert_eq!(Anchor::default(), Anchor::new(0, 0));
    }

    #[test]
    fn ordering_is_strict_and_total() {
        let anchors = sample();
        for a in &anchors {
            for b in &anchors {
                let less = a < b;
                let greater = a > b;
                let equal = a == b;
                assert_eq!(
                    [less, greater, equal].iter().filter(|x| **x).count(),
                    1,
                    "{a:?} vs {b:?}"
                );
                for c in &anchors {
                    if a < b && b < c {
                        assert!(a < c, "transitivity {a:?} {b:?} {c:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn between_is_half_open_and_order_independent() {
        let b = Anchor::new(1, 2);
        let c = Anchor::new(2, 1);
        for a in sample() {
            let expected = a >= b && a < c;
            assert_eq!(a.between(b, c), expected, "{a:?}");
            assert_eq!(a.between(c, b), expected, "{a:?} reversed");
        }
        assert!(!b.between(b, b));
    }

    #[test]
    fn ordered_returns_ascending_pair() {
        let a = Anchor::new(4, 0);
        let b = Anchor::new(1, 7);
        assert_eq!(ordered(a, b), (b, a));
        assert_eq!(ordered(b, a), (b, a));
    }
}
