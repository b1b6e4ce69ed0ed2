//! Receipt returned by the recharge flow.
//!
//! A recharge can touch two stores: the remote API and the local mirror.
//! The receipt records what happened to each so callers and tests can see
//! exactly which writes took place.

/// Outcome of the remote write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteWrite {
    /// The server accepted the recharge.
    Committed { message: String },
    /// No token was held, so nothing was sent.
    Skipped,
}

/// Outcome of the local mirror write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorWrite {
    /// One record appended under `user_key` and one tagged copy in the global list.
    Written { user_key: String },
    /// The session has no user email to key the mirror by.
    NoLocalIdentity,
    /// The store rejected the write and neither local list changed; the
    /// remote outcome still stands.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RechargeReceipt {
    pub remote: RemoteWrite,
    pub mirror: MirrorWrite,
}

impl RechargeReceipt {
    /// Notice shown after a successful recharge.
    #[must_use]
    pub fn notice(&self) -> &'static str {
        match self.remote {
            RemoteWrite::Committed { .. } => "Recharge successful and added to your history.",
            RemoteWrite::Skipped => "Recharge successful and stored locally.",
        }
    }

    #[must_use]
    pub const fn mirrored(&self) -> bool {
        matches!(self.mirror, MirrorWrite::Written { .. })
    }
}
