use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::app::error::{EmbersError, Result};

/// Cooperative cancellation flag shared between an in-flight operation and
/// whoever supersedes it.
///
/// Every multi-step operation (feed load, tree build, post/user fetch) takes
/// one of these and checks it between network round trips. Once triggered,
/// no further requests are issued and nothing is written back to the caches,
/// so a superseded operation can never clobber its successor's state.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Returns `Err(Cancelled)` once triggered; used at suspension points.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(EmbersError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_is_not_cancelled() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        assert!(token.check().is_ok());
    }

    #[test]
    fn test_cancel_is_visible_through_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
        assert!(matches!(token.check(), Err(EmbersError::Cancelled)));
    }
}
