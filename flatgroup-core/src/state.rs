use std::fmt;

/// Append mode of a [`FlatGroupedStore`](crate::FlatGroupedStore).
///
/// `Locked` accepts whole groups, `Unlocked` accepts single values that are
/// sealed into one group on the next lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    #[default]
    Locked,
    Unlocked,
}

impl LockState {
    pub fn is_locked(self) -> bool {
        self == LockState::Locked
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockState::Locked => write!(f, "locked"),
            LockState::Unlocked => write!(f, "unlocked"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LockState;

    #[test]
    fn starts_locked() {
        assert_eq!(LockState::default(), LockState::Locked);
        assert!(LockState::default().is_locked());
        assert!(!LockState::Unlocked.is_locked());
        assert_eq!(LockState::Unlocked.to_string(), "unlocked");
    }
}
