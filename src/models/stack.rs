//! IP_STACK resolution.
//!
//! Maps a stack-mode token to the ordered list of enabled families. The
//! first family is the primary one and supplies the rendezvous address.

use super::Family;
use crate::error::{RenderError, Result};
use std::fmt;
use std::str::FromStr;

/// Accepted IP_STACK tokens, in the form used by diagnostics.
pub const ACCEPTED_STACKS: &str = "v4|v6|v4v6|v6v4";

/// Stack-mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackMode {
    #[default]
    V4,
    V6,
    V4V6,
    V6V4,
}

impl StackMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StackMode::V4 => "v4",
            StackMode::V6 => "v6",
            StackMode::V4V6 => "v4v6",
            StackMode::V6V4 => "v6v4",
        }
    }

    /// Families in priority order.
    pub fn families(&self) -> &'static [Family] {
        match self {
            StackMode::V4 => &[Family::V4],
            StackMode::V6 => &[Family::V6],
            StackMode::V4V6 => &[Family::V4, Family::V6],
            StackMode::V6V4 => &[Family::V6, Family::V4],
        }
    }
}

impl FromStr for StackMode {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "v4" => Ok(StackMode::V4),
            "v6" => Ok(StackMode::V6),
            "v4v6" => Ok(StackMode::V4V6),
            "v6v4" => Ok(StackMode::V6V4),
            _ => Err(RenderError::invalid(
                "IP_STACK",
                s,
                format!("expected {ACCEPTED_STACKS}"),
            )),
        }
    }
}

impl fmt::Display for StackMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, duplicate-free list of enabled families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackOrder {
    mode: StackMode,
}

impl StackOrder {
    pub fn new(mode: StackMode) -> Self {
        StackOrder { mode }
    }

    pub fn mode(&self) -> StackMode {
        self.mode
    }

    pub fn families(&self) -> &'static [Family] {
        self.mode.families()
    }

    /// Family supplying the rendezvous address.
    pub fn primary(&self) -> Family {
        self.families()[0]
    }

    pub fn contains(&self, family: Family) -> bool {
        self.families().contains(&family)
    }

    pub fn is_single(&self) -> bool {
        self.families().len() == 1
    }

    /// Families left out of a single-stack order. Empty for dual stack.
    pub fn disabled(&self) -> Vec<Family> {
        [Family::V4, Family::V6]
            .into_iter()
            .filter(|f| !self.contains(*f))
            .collect()
    }
}

/// Resolve an IP_STACK token into its stack order.
pub fn resolve(mode: &str) -> Result<StackOrder> {
    let mode: StackMode = mode.parse()?;
    Ok(StackOrder::new(mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_valid_tokens() {
        assert_eq!(resolve("v4").unwrap().families(), &[Family::V4]);
        assert_eq!(resolve("v6").unwrap().families(), &[Family::V6]);
        assert_eq!(resolve("v4v6").unwrap().families(), &[Family::V4, Family::V6]);
        assert_eq!(resolve("v6v4").unwrap().families(), &[Family::V6, Family::V4]);
    }

    #[test]
    fn test_resolve_invalid_tokens() {
        for token in ["", "V4", "v4 ", "v6v6", "dual", "v4,v6"] {
            let err = resolve(token).unwrap_err();
            assert!(
                matches!(err, RenderError::InvalidConfiguration { .. }),
                "token {token:?} should be rejected"
            );
        }
        assert_eq!(
            resolve("ipv4").unwrap_err().to_string(),
            "invalid IP_STACK=ipv4 (expected v4|v6|v4v6|v6v4)"
        );
    }

    #[test]
    fn test_primary_family() {
        assert_eq!(resolve("v4v6").unwrap().primary(), Family::V4);
        assert_eq!(resolve("v6v4").unwrap().primary(), Family::V6);
        assert_eq!(resolve("v6").unwrap().primary(), Family::V6);
    }

    #[test]
    fn test_disabled_families() {
        assert_eq!(resolve("v4").unwrap().disabled(), vec![Family::V6]);
        assert_eq!(resolve("v6").unwrap().disabled(), vec![Family::V4]);
        assert!(resolve("v4v6").unwrap().disabled().is_empty());
        assert!(resolve("v6v4").unwrap().disabled().is_empty());
    }

    #[test]
    fn test_default_mode() {
        assert_eq!(StackMode::default(), StackMode::V4);
        assert_eq!(StackMode::V6V4.to_string(), "v6v4");
    }
}
