/// Transition counter. Long-running callbacks hold a [`GenerationToken`] and
/// are dropped if any transition happened since it was issued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GenerationToken(u64);

impl Generation {
    #[inline] pub fn bump(&mut self) { self.0 = self.0.wrapping_add(1); }

    #[inline] pub fn token(&self) -> GenerationToken { GenerationToken(self.0) }

    #[inline] pub fn is_current(&self, token: GenerationToken) -> bool { token.0 == self.0 }

    #[inline] pub fn value(&self) -> u64 { self.0 }
}

impl GenerationToken {
    /// Raw value, for carrying across an FFI boundary.
    #[inline] pub fn value(self) -> u64 { self.0 }

    #[inline] pub fn from_value(value: u64) -> Self { Self(value) }
}
