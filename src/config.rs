use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How the handler chooses among conflicting transactions in a batch.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// Visit candidates once in batch order and accept every one that is valid against the
    /// ledger as updated by the acceptances so far.
    InOrder,
    /// Validate candidates against the ledger at the start of the batch and accept them greedily
    /// by descending fee, skipping those that conflict with an accepted one.
    MaxFee,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        SelectionPolicy::InOrder
    }
}

impl Display for SelectionPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionPolicy::InOrder => write!(f, "in-order"),
            SelectionPolicy::MaxFee => write!(f, "max-fee"),
        }
    }
}

impl FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in-order" => Ok(SelectionPolicy::InOrder),
            "max-fee" => Ok(SelectionPolicy::MaxFee),
            _ => Err(format!(
                "Unknown selection policy: {}. Expected one of: in-order, max-fee",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandlerParams {
    // Policy used by every batch the handler processes.
    pub policy: SelectionPolicy,
}

impl HandlerParams {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self { policy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_policy() {
        assert_eq!("in-order".parse::<SelectionPolicy>(), Ok(SelectionPolicy::InOrder));
        assert_eq!("max-fee".parse::<SelectionPolicy>(), Ok(SelectionPolicy::MaxFee));
        assert!("fastest".parse::<SelectionPolicy>().is_err());
    }

    #[test]
    fn display_matches_parse() {
        for policy in &[SelectionPolicy::InOrder, SelectionPolicy::MaxFee] {
            assert_eq!(policy.to_string().parse::<SelectionPolicy>(), Ok(*policy));
        }
    }

    #[test]
    fn default_is_in_order() {
        assert_eq!(HandlerParams::default().policy, SelectionPolicy::InOrder);
    }
}
