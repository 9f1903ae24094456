//! Cookie-consent bookkeeping.
//!
//! The visitor's choices live in a single cookie (name chosen by the CMS legal
//! document) holding percent-encoded JSON of the shape
//! `{ "<group>": { "<item>": true|false } }`.

use crate::cms::models::LegalGroup;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Name of the group-level "accept everything in this group" checkbox.
pub const GROUP_WILDCARD: &str = "*";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsentState(BTreeMap<String, BTreeMap<String, bool>>);

impl ConsentState {
    /// Parse a cookie value. Anything unreadable counts as "no choices yet".
    pub fn from_cookie(value: &str) -> Self {
        let decoded = match urlencoding::decode(value) {
            Ok(decoded) => decoded,
            Err(e) => {
                debug!("Consent cookie is not valid percent-encoding: {}", e);
                return Self::default();
            }
        };

        serde_json::from_str(&decoded).unwrap_or_else(|e| {
            debug!("Ignoring malformed consent cookie: {}", e);
            Self::default()
        })
    }

    pub fn to_cookie_value(&self) -> String {
        let json = serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string());
        urlencoding::encode(&json).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_checked(&self, group: &str, item: &str) -> bool {
        self.0
            .get(group)
            .and_then(|items| items.get(item))
            .copied()
            .unwrap_or(false)
    }

    pub fn set(&mut self, group: &str, item: &str, value: bool) {
        self.0
            .entry(group.to_string())
            .or_default()
            .insert(item.to_string(), value);
    }

    /// Set every item of every group to `value`, keeping unrelated entries.
    pub fn set_all(&mut self, groups: &[LegalGroup], value: bool) {
        for group in groups {
            for item in &group.items {
                self.set(&group.cookie, &item.cookie, value);
            }
        }
    }

    /// True when every group has an entry and all its items equal `value`.
    pub fn all_items(&self, groups: &[LegalGroup], value: bool) -> bool {
        groups.iter().all(|group| {
            !group.cookie.is_empty()
                && self.0.get(&group.cookie).is_some_and(|stored| {
                    group
                        .items
                        .iter()
                        .all(|item| stored.get(&item.cookie) == Some(&value))
                })
        })
    }

    /// True when the group has an entry and every one of its items is accepted.
    pub fn group_all_true(&self, group: &LegalGroup) -> bool {
        self.0.contains_key(&group.cookie)
            && group
                .items
                .iter()
                .all(|item| self.is_checked(&group.cookie, &item.cookie))
    }

    /// Apply a submitted consent form.
    pub fn apply(&mut self, form: &ConsentForm, groups: &[LegalGroup]) {
        match form.action {
            ConsentAction::AcceptAll => self.set_all(groups, true),
            ConsentAction::DenyAll => self.set_all(groups, false),
            ConsentAction::Close => {
                if self.is_empty() {
                    self.set_all(groups, false);
                }
            }
            ConsentAction::Save => {
                for group in groups {
                    let whole_group = form.is_checked(&group.cookie, GROUP_WILDCARD);
                    for item in &group.items {
                        let value = whole_group || form.is_checked(&group.cookie, &item.cookie);
                        self.set(&group.cookie, &item.cookie, value);
                    }
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentAction {
    AcceptAll,
    DenyAll,
    Save,
    /// Banner dismissed without a decision; denies everything on first visit.
    Close,
}

impl ConsentAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "accept-all" => Some(ConsentAction::AcceptAll),
            "deny-all" => Some(ConsentAction::DenyAll),
            "save" => Some(ConsentAction::Save),
            "close" => Some(ConsentAction::Close),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentAction::AcceptAll => "accept-all",
            ConsentAction::DenyAll => "deny-all",
            ConsentAction::Save => "save",
            ConsentAction::Close => "close",
        }
    }
}

/// Decoded consent form: the pressed button plus every ticked
/// `<group>.<item>` checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentForm {
    pub action: ConsentAction,
    checked: Vec<(String, String)>,
}

impl ConsentForm {
    /// Build from raw form pairs. A missing or unknown action is treated as `save`.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut action = ConsentAction::Save;
        let mut checked = Vec::new();

        for (key, value) in pairs {
            if key == "action" {
                action = ConsentAction::parse(value).unwrap_or(ConsentAction::Save);
            } else if let Some((group, item)) = key.split_once('.') {
                if value == "on" {
                    checked.push((group.to_string(), item.to_string()));
                }
            }
        }

        Self { action, checked }
    }

    pub fn is_checked(&self, group: &str, item: &str) -> bool {
        self.checked.iter().any(|(g, i)| g == group && i == item)
    }
}

/// Checkbox name for an item.
pub fn field_name(group: &str, item: &str) -> String {
    format!("{}.{}", group, item)
}
