/// Creates a [`SimpleVector`](crate::SimpleVector) from a list of elements.
///
/// - `simvec![]` creates an empty container.
/// - `simvec![a, b, c]` moves the elements in order; capacity equals the
///   element count.
/// - `simvec![value; n]` holds `n` clones of `value`.
#[macro_export]
macro_rules! simvec {
    () => {
        $crate::SimpleVector::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::SimpleVector::from_elem($n, $elem)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::SimpleVector::from([$($x),+])
    };
}
