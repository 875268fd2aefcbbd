//! Bounds-checked component, row and column access.
//!
//! nalgebra's indexing panics on a bad index. Callers that take indices from
//! outside (scripting layers, user input) go through these instead and get a
//! rejected request back.

use crate::{MathError, Mat3, Result, Vec3};

/// Component `index` (0 = x, 1 = y, 2 = z) of a vector.
pub fn component(v: &Vec3, index: usize) -> Result<f64> {
    v.get(index)
        .copied()
        .ok_or(MathError::OutOfRange { index, len: 3 })
}

/// Row `index` of a 3x3 matrix.
pub fn row(m: &Mat3, index: usize) -> Result<Vec3> {
    if index >= 3 {
        return Err(MathError::OutOfRange { index, len: 3 });
    }
    Ok(m.row(index).transpose())
}

/// Column `index` of a 3x3 matrix.
pub fn column(m: &Mat3, index: usize) -> Result<Vec3> {
    if index >= 3 {
        return Err(MathError::OutOfRange { index, len: 3 });
    }
    Ok(m.column(index).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_in_range() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(component(&v, 0), Ok(1.0));
        assert_eq!(component(&v, 2), Ok(3.0));
    }

    #[test]
    fn test_component_out_of_range() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(
            component(&v, 3),
            Err(MathError::OutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_row_and_column() {
        let m = Mat3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        assert_eq!(row(&m, 1), Ok(Vec3::new(4.0, 5.0, 6.0)));
        assert_eq!(column(&m, 1), Ok(Vec3::new(2.0, 5.0, 8.0)));
        assert!(row(&m, 3).is_err());
        assert!(column(&m, 7).is_err());
    }
}
