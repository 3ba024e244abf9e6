// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0
//! Dashboard view modes.
//!
//! The dashboard has a user view (what you spend on agents) and a
//! developer view (what your agents earn) with its own tab strip. The tab
//! only exists inside the developer view, so it lives in the variant.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeveloperTab {
    #[default]
    Transactions,
    Agents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "tab", rename_all = "lowercase")]
pub enum DashboardView {
    #[default]
    User,
    Developer(DeveloperTab),
}

impl DashboardView {
    /// Switch to the user view.
    pub fn user(self) -> Self {
        DashboardView::User
    }

    /// Switch to the developer view, keeping the current tab if already
    /// there.
    pub fn developer(self) -> Self {
        match self {
            DashboardView::Developer(tab) => DashboardView::Developer(tab),
            DashboardView::User => DashboardView::Developer(DeveloperTab::default()),
        }
    }

    /// Select a developer tab. Switches into the developer view.
    pub fn with_tab(self, tab: DeveloperTab) -> Self {
        DashboardView::Developer(tab)
    }

    pub fn tab(&self) -> Option<DeveloperTab> {
        match self {
            DashboardView::User => None,
            DashboardView::Developer(tab) => Some(*tab),
        }
    }

    /// Label of the headline totals card.
    pub fn headline(&self) -> &'static str {
        match self {
            DashboardView::User => "SPEND",
            DashboardView::Developer(_) => "EARN",
        }
    }
}
