//! One-sample memory cell.
//!
//! The building block of the state-variable filter's integrators. Reading and
//! writing are two named operations so every call site shows whether it only
//! observes the register or also commits a new value.

/// Single-sample delay register, `z^-1`.
///
/// # Example
///
/// ```rust
/// use twopole_core::UnitDelay;
///
/// let mut z = UnitDelay::new();
/// assert_eq!(z.read_and_advance(0.5), 0.0);
/// assert_eq!(z.peek(), 0.5);
/// assert_eq!(z.read_and_advance(0.25), 0.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UnitDelay {
    value: f32,
}

impl UnitDelay {
    /// Create a register holding 0.
    pub const fn new() -> Self {
        Self { value: 0.0 }
    }

    /// Return the stored value, then store `next` for the following read.
    #[inline]
    pub fn read_and_advance(&mut self, next: f32) -> f32 {
        let previous = self.value;
        self.value = next;
        previous
    }

    /// Return the stored value without mutating the register.
    #[inline]
    pub fn peek(&self) -> f32 {
        self.value
    }

    /// Store 0.
    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}
