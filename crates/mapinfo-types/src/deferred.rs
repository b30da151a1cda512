use serde::Serialize;
use strum::{EnumCount, EnumIter, FromRepr};

/// What a deferred script action does once its level is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, EnumCount, FromRepr)]
#[repr(u8)]
pub enum DeferredKind {
    Execute = 0,
    ExecuteAlways = 1,
    Suspend = 2,
    Terminate = 3,
}

/// A one-shot script action queued against a level that is not loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeferredAction {
    pub kind: DeferredKind,
    pub script: i32,
    pub args: [i32; 3],
    pub player: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn count() {
        assert_eq!(DeferredKind::COUNT, 4);
    }

    #[test]
    fn round_trip() {
        for k in DeferredKind::iter() {
            assert_eq!(DeferredKind::from_repr(k as u8), Some(k));
        }
    }
}
