use serde::Serialize;

/// A color stored as alpha, red, green, blue bytes, in that order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Argb {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Argb {
    /// Default outside-fog color. Full alpha with zero RGB means "no tint",
    /// which is distinct from an explicit black (all zero).
    pub const NO_FOG: Self = Self::new(255, 0, 0, 0);

    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(255, r, g, b)
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        [self.a, self.r, self.g, self.b]
    }

    pub const fn is_zero(self) -> bool {
        self.a == 0 && self.r == 0 && self.g == 0 && self.b == 0
    }
}
