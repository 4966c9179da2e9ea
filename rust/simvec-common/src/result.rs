pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Extension for results whose error should abort an infallible API.
pub trait ResultExt<T> {
    /// Unwraps the value, or reacts to the error as std collections react to
    /// allocation failures (see [`Error::raise`](crate::error::Error::raise)).
    fn or_raise(self) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    #[inline]
    #[track_caller]
    fn or_raise(self) -> T {
        match self {
            Ok(value) => value,
            Err(e) => e.raise(),
        }
    }
}

#[macro_export]
macro_rules! verify_index {
    ($index:expr, $len:expr) => {{
        $crate::result::verify_index($index, $len)?;
    }};
}

#[inline]
pub fn verify_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        index_out_of_range(index, len)
    }
}

#[cold]
pub fn index_out_of_range(index: usize, len: usize) -> Result<()> {
    Err(crate::error::Error::index_out_of_range(index, len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checked(index: usize, len: usize) -> Result<usize> {
        verify_index!(index, len);
        Ok(index)
    }

    #[test]
    fn test_verify_index() {
        assert_eq!(checked(0, 1).unwrap(), 0);
        assert!(checked(1, 1).unwrap_err().is_index_out_of_range());
        assert!(checked(0, 0).is_err());
    }

    #[test]
    fn test_or_raise_passes_value() {
        let r: Result<u32> = Ok(7);
        assert_eq!(r.or_raise(), 7);
    }
}
