//! Help records and their lookup views.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::subsystem::Subsystem;

/// One help section: a heading and the HTML that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpRecord {
    pub heading: String,
    pub content: String,
}

/// A record addressed to one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub route: String,
    pub record: HelpRecord,
}

type Routes = BTreeMap<String, Vec<HelpRecord>>;

/// Help records by locale, subsystem and route.
///
/// Records for a route keep document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HelpStore {
    locales: BTreeMap<String, BTreeMap<Subsystem, Routes>>,
}

impl HelpStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append records produced by walking one document.
    pub fn extend(
        &mut self,
        locale: &str,
        subsystem: Subsystem,
        records: impl IntoIterator<Item = RouteRecord>,
    ) {
        let mut records = records.into_iter().peekable();
        if records.peek().is_none() {
            return;
        }
        let routes = self
            .locales
            .entry(locale.to_owned())
            .or_default()
            .entry(subsystem)
            .or_default();
        for RouteRecord { route, record } in records {
            routes.entry(route).or_default().push(record);
        }
    }

    /// Records for a route, empty if there are none.
    #[must_use]
    pub fn records_for_route(
        &self,
        locale: &str,
        route: &str,
        subsystem: Subsystem,
    ) -> &[HelpRecord] {
        self.locales
            .get(locale)
            .and_then(|subsystems| subsystems.get(&subsystem))
            .and_then(|routes| routes.get(route))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether the store holds no record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Total number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locales
            .values()
            .flat_map(BTreeMap::values)
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Regroup records by heading.
    ///
    /// When one heading is attached to several routes, the entry lists all of
    /// them; the content of the last route in name order wins.
    #[must_use]
    pub fn by_heading(&self) -> HeadingView {
        let mut view = HeadingView::new();
        for (locale, subsystems) in &self.locales {
            for (subsystem, routes) in subsystems {
                let headings = view
                    .entry(locale.clone())
                    .or_default()
                    .entry(*subsystem)
                    .or_default();
                for (route, records) in routes {
                    for record in records {
                        let entry = headings.entry(record.heading.clone()).or_default();
                        entry.routes.insert(route.clone());
                        entry.content.clone_from(&record.content);
                    }
                }
            }
        }
        view
    }
}

/// Routes sharing one heading, with its content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingEntry {
    pub routes: BTreeSet<String>,
    pub content: String,
}

/// Headings by locale and subsystem.
pub type HeadingView = BTreeMap<String, BTreeMap<Subsystem, BTreeMap<String, HeadingEntry>>>;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(route: &str, heading: &str, content: &str) -> RouteRecord {
        RouteRecord {
            route: route.to_owned(),
            record: HelpRecord {
                heading: heading.to_owned(),
                content: content.to_owned(),
            },
        }
    }

    #[test]
    fn test_records_for_route_keeps_order() {
        let mut store = HelpStore::new();
        store.extend(
            "en",
            Subsystem::Admin,
            [
                record("admin_users", "Users", "a"),
                record("admin_users", "Roles", "b"),
            ],
        );

        let records = store.records_for_route("en", "admin_users", Subsystem::Admin);
        assert_eq!(
            records.iter().map(|r| r.heading.as_str()).collect::<Vec<_>>(),
            vec!["Users", "Roles"]
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_records_for_unknown_key_is_empty() {
        let mut store = HelpStore::new();
        store.extend("en", Subsystem::Admin, [record("admin_users", "Users", "a")]);

        assert!(store.records_for_route("de", "admin_users", Subsystem::Admin).is_empty());
        assert!(store.records_for_route("en", "admin_users", Subsystem::Client).is_empty());
        assert!(store.records_for_route("en", "admin_roles", Subsystem::Admin).is_empty());
    }

    #[test]
    fn test_extend_without_records_adds_no_locale() {
        let mut store = HelpStore::new();
        store.extend("en", Subsystem::Client, Vec::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_by_heading_merges_routes() {
        let mut store = HelpStore::new();
        store.extend(
            "en",
            Subsystem::Admin,
            [
                record("admin_users", "Users", "<p>u</p>"),
                record("admin_users_edit", "Users", "<p>u</p>"),
                record("admin_roles", "Roles", "<p>r</p>"),
            ],
        );

        let view = store.by_heading();
        let headings = &view["en"][&Subsystem::Admin];
        assert_eq!(headings.len(), 2);
        assert_eq!(
            headings["Users"],
            HeadingEntry {
                routes: ["admin_users", "admin_users_edit"]
                    .into_iter()
                    .map(str::to_owned)
                    .collect(),
                content: "<p>u</p>".to_owned(),
            }
        );
    }

    #[test]
    fn test_serde_shape() {
        let mut store = HelpStore::new();
        store.extend("en", Subsystem::Client, [record("app_home", "Home", "x")]);

        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(
            json,
            r#"{"en":{"app":{"app_home":[{"heading":"Home","content":"x"}]}}}"#
        );
        let back: HelpStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, store);
    }
}
