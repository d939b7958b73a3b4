//! Navigation entries and the page-to-loader table

use crate::loaders::LoaderKind;

/// A page of the dashboard shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    Students,
    Teachers,
    Attendance,
    Fees,
    Reports,
    Settings,
}

/// One entry of the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationEntry {
    pub page: Page,
    pub label: &'static str,
}

/// Sidebar entries, in display order.
pub const NAV_ENTRIES: &[NavigationEntry] = &[
    NavigationEntry {
        page: Page::Dashboard,
        label: "Dashboard",
    },
    NavigationEntry {
        page: Page::Students,
        label: "Students",
    },
    NavigationEntry {
        page: Page::Teachers,
        label: "Teachers",
    },
    NavigationEntry {
        page: Page::Attendance,
        label: "Attendance",
    },
    NavigationEntry {
        page: Page::Fees,
        label: "Fees",
    },
    NavigationEntry {
        page: Page::Reports,
        label: "Reports",
    },
    NavigationEntry {
        page: Page::Settings,
        label: "Settings",
    },
];

/// Pages that fetch data when activated. Pages missing here are static.
const PAGE_LOADERS: &[(Page, LoaderKind)] = &[
    (Page::Dashboard, LoaderKind::Dashboard),
    (Page::Students, LoaderKind::Students),
];

impl Page {
    /// Stable identifier, as used on the command line and in logs.
    pub fn id(self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Students => "students",
            Page::Teachers => "teachers",
            Page::Attendance => "attendance",
            Page::Fees => "fees",
            Page::Reports => "reports",
            Page::Settings => "settings",
        }
    }

    pub fn from_id(id: &str) -> Option<Page> {
        let id = id.trim();
        NAV_ENTRIES
            .iter()
            .map(|entry| entry.page)
            .find(|page| page.id().eq_ignore_ascii_case(id))
    }

    /// Loader triggered by activating this page, if any.
    pub fn loader(self) -> Option<LoaderKind> {
        PAGE_LOADERS
            .iter()
            .find(|(page, _)| *page == self)
            .map(|(_, kind)| *kind)
    }

    pub fn entry(self) -> &'static NavigationEntry {
        &NAV_ENTRIES[self.index()]
    }

    /// Position in the sidebar.
    pub fn index(self) -> usize {
        NAV_ENTRIES
            .iter()
            .position(|entry| entry.page == self)
            .unwrap_or(0)
    }
}
