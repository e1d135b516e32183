//! Access gate
//!
//! Plain equality against a client-visible list. This is a convenience
//! filter, not authentication: no hashing, no server round trip, and anyone
//! who can read the allow-list resource can pass it.

use crate::types::{AllowList, SessionTag};
use std::fmt;

/// Why an identifier was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    /// Nothing left after trimming
    Empty,
    /// Not on the allow-list
    Unknown,
}

impl GateRejection {
    /// User-facing message
    #[inline]
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Empty => "Please enter service number.",
            Self::Unknown => "Invalid service number.",
        }
    }
}

impl fmt::Display for GateRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Membership check over the loaded allow-list
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    allow_list: AllowList,
}

impl AccessGate {
    /// Create gate over a list
    #[inline]
    #[must_use]
    pub fn new(allow_list: AllowList) -> Self {
        Self { allow_list }
    }

    /// Underlying list
    #[inline]
    #[must_use]
    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Check a raw, user-typed identifier
    ///
    /// Surrounding whitespace is ignored; the remainder must match an entry
    /// exactly.
    pub fn check(&self, raw: &str) -> Result<SessionTag, GateRejection> {
        let identifier = raw.trim();
        if identifier.is_empty() {
            return Err(GateRejection::Empty);
        }
        if self.allow_list.contains(identifier) {
            Ok(SessionTag::new(identifier))
        } else {
            Err(GateRejection::Unknown)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn gate() -> AccessGate {
        AccessGate::new(AllowList::new(["SN-100", "SN-200"]))
    }

    #[test]
    fn trimmed_member_is_granted() {
        let tag = gate().check(" SN-100 ").unwrap();
        assert_eq!(tag.as_str(), "SN-100");
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(gate().check(""), Err(GateRejection::Empty));
        assert_eq!(gate().check(" \t\n"), Err(GateRejection::Empty));
    }

    #[test]
    fn non_member_is_unknown() {
        assert_eq!(gate().check("SN-300"), Err(GateRejection::Unknown));
        assert_eq!(gate().check("sn-100"), Err(GateRejection::Unknown));
    }

    #[test]
    fn empty_list_rejects_everything() {
        assert_eq!(AccessGate::default().check("SN-100"), Err(GateRejection::Unknown));
    }

    #[test]
    fn rejection_messages() {
        assert_eq!(GateRejection::Empty.to_string(), "Please enter service number.");
        assert_eq!(GateRejection::Unknown.to_string(), "Invalid service number.");
    }

    proptest! {
        #[test]
        fn prop_members_pass_with_any_padding(
            id in "[A-Za-z0-9-]{1,12}",
            left in "[ \t]{0,3}",
            right in "[ \t\n]{0,3}",
        ) {
            let gate = AccessGate::new(AllowList::new([id.clone()]));
            let raw = format!("{left}{id}{right}");
            let tag = gate.check(&raw).unwrap();
            prop_assert_eq!(tag.as_str(), id.as_str());
        }

        #[test]
        fn prop_non_members_are_rejected(id in "[A-Za-z0-9-]{1,12}") {
            let gate = AccessGate::new(AllowList::new(["SN-100"]));
            prop_assume!(id != "SN-100");
            prop_assert_eq!(gate.check(&id), Err(GateRejection::Unknown));
        }
    }
}
