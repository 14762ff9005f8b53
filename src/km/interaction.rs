//! Hover highlight state shared by curve groups and legend entries.

use log::trace;
use serde::Deserialize;

/// What a pointer-leave does to the active label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeavePolicy {
    /// Leaving any group or entry clears the highlight, whichever label is
    /// active. Relies on the host delivering enter-before-leave when the
    /// pointer crosses between groups.
    #[default]
    Unconditional,
    /// Leaving clears the highlight only if the left label is the active one.
    OnlyIfActive,
}

/// A hover transition reported by a curve group or a legend entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverEvent {
    Enter(String),
    Leave(String),
}

/// The single highlighted label of one chart instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveLabel {
    label: Option<String>,
    policy: LeavePolicy,
}

impl ActiveLabel {
    pub fn new(policy: LeavePolicy) -> Self {
        ActiveLabel {
            label: None,
            policy,
        }
    }

    /// The active label, `""` when nothing is highlighted.
    pub fn get(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }

    /// Whether a group with `label` should be drawn highlighted.
    ///
    /// An empty active label never matches, not even a group whose own label
    /// is empty.
    pub fn is_active(&self, label: &str) -> bool {
        matches!(self.label.as_deref(), Some(active) if !active.is_empty() && active == label)
    }

    /// Set the active label; `""` clears it. Last writer wins.
    pub fn set(&mut self, label: &str) {
        self.label = if label.is_empty() {
            None
        } else {
            Some(label.to_string())
        };
    }

    pub fn clear(&mut self) {
        self.label = None;
    }

    /// Apply a hover event. Returns true when the active label changed.
    pub fn apply(&mut self, event: &HoverEvent) -> bool {
        let before = self.label.clone();
        match event {
            HoverEvent::Enter(label) => self.set(label),
            HoverEvent::Leave(label) => match self.policy {
                LeavePolicy::Unconditional => self.clear(),
                LeavePolicy::OnlyIfActive => {
                    if self.is_active(label) {
                        self.clear();
                    }
                }
            },
        }
        let changed = before != self.label;
        trace!("hover {:?} -> active {:?} (changed: {})", event, self.get(), changed);
        changed
    }
}
