use crate::error::{EvalError, EvalResult};

/// A slice descriptor with optional start, stop and step bounds.
///
/// Slices are plain data; they are normalized against a concrete sequence
/// length only when the subscript is evaluated. Negative bounds count from
/// the end of the sequence, out-of-range bounds are clamped, and a negative
/// step walks the sequence backwards.
///
/// # Example
/// ```
/// use stencil::{Slice, Value, __};
///
/// let middle = __.index(Slice::new(Some(1), Some(3)));
/// let v = middle.eval(vec![1i64, 2, 3, 4]).unwrap();
/// assert_eq!(v, Value::from(vec![2i64, 3]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    /// First included position, or the sequence start.
    pub start: Option<i64>,
    /// First excluded position, or the sequence end.
    pub stop:  Option<i64>,
    /// Step between positions; defaults to `1`.
    pub step:  Option<i64>,
}

impl Slice {
    /// Creates a slice with unit step.
    #[must_use]
    pub const fn new(start: Option<i64>, stop: Option<i64>) -> Self {
        Self { start,
               stop,
               step: None }
    }
    /// Creates a slice with an explicit step.
    #[must_use]
    pub const fn with_step(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Self { start, stop, step }
    }
    /// Resolves the slice against a sequence of `len` elements, producing the
    /// selected positions in iteration order.
    ///
    /// # Errors
    /// Returns an `InvalidArgument` error if the step is zero.
    ///
    /// # Example
    /// ```
    /// use stencil::Slice;
    ///
    /// let every_other = Slice::with_step(None, None, Some(2));
    /// assert_eq!(every_other.resolve(5).unwrap(), vec![0, 2, 4]);
    ///
    /// let reversed = Slice::with_step(None, None, Some(-1));
    /// assert_eq!(reversed.resolve(3).unwrap(), vec![2, 1, 0]);
    /// ```
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn resolve(&self, len: usize) -> EvalResult<Vec<usize>> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(EvalError::InvalidArgument { details: "slice step cannot be zero".to_string() });
        }

        let len = len as i64;
        let from_end = |bound: i64| if bound < 0 { bound + len } else { bound };

        let mut positions = Vec::new();
        if step > 0 {
            let start = self.start.map_or(0, from_end).clamp(0, len);
            let stop = self.stop.map_or(len, from_end).clamp(0, len);

            let mut position = start;
            while position < stop {
                positions.push(position as usize);
                let Some(next) = position.checked_add(step) else {
                    break;
                };
                position = next;
            }
        } else {
            // For negative steps the defaults are the last element down to
            // (exclusively) one before the first.
            let start = self.start.map_or(len - 1, |b| from_end(b).clamp(-1, len - 1));
            let stop = self.stop.map_or(-1, |b| from_end(b).clamp(-1, len - 1));

            let mut position = start;
            while position > stop {
                positions.push(position as usize);
                let Some(next) = position.checked_add(step) else {
                    break;
                };
                position = next;
            }
        }

        Ok(positions)
    }
}

impl std::fmt::Display for Slice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{start}")?;
        }
        write!(f, ":")?;
        if let Some(stop) = self.stop {
            write!(f, "{stop}")?;
        }
        if let Some(step) = self.step {
            write!(f, ":{step}")?;
        }
        Ok(())
    }
}
