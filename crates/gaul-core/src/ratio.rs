use gaul_error::{gaul_err, GaulResult};

/// A probability-shaped parameter in `[0, 1]`: crossover ratio, mutation
/// ratio, migration ratio. Built-in operators interpret these directly;
/// custom operators may reinterpret the value however they see fit.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Ratio(f32);

impl Ratio {
    pub const ZERO: Ratio = Ratio(0.0);
    pub const ONE: Ratio = Ratio(1.0);

    pub fn new(value: f32) -> GaulResult<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Ratio(value))
        } else {
            Err(gaul_err!(Misconfiguration: "ratio {} outside [0, 1]", value))
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Ratio::ZERO
    }
}
