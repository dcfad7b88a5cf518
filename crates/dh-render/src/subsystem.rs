//! Content partitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Content partition sharing the help store.
///
/// Each subsystem has its own source document per locale, and only keeps
/// records for routes it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Subsystem {
    /// Administrative back office.
    #[serde(rename = "admin")]
    Admin,
    /// End-user application.
    #[serde(rename = "app")]
    Client,
}

impl Subsystem {
    /// All subsystems in store order.
    pub const ALL: [Self; 2] = [Self::Admin, Self::Client];

    /// Store key, also the route-name prefix.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Client => "app",
        }
    }

    /// Whether records for `route` belong to this subsystem.
    #[must_use]
    pub fn owns_route(self, route: &str) -> bool {
        route.starts_with(self.key())
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error for a string that names no subsystem.
#[derive(Debug, thiserror::Error)]
#[error("unknown subsystem '{0}' (expected 'admin' or 'app')")]
pub struct UnknownSubsystem(pub String);

impl FromStr for Subsystem {
    type Err = UnknownSubsystem;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|subsystem| subsystem.key() == s)
            .ok_or_else(|| UnknownSubsystem(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owns_route_by_prefix() {
        assert!(Subsystem::Admin.owns_route("admin_users_index"));
        assert!(!Subsystem::Admin.owns_route("app_dashboard"));
        assert!(Subsystem::Client.owns_route("app_dashboard"));
        assert!(!Subsystem::Client.owns_route("admin_users_index"));
    }

    #[test]
    fn test_parse() {
        assert_eq!("admin".parse::<Subsystem>().unwrap(), Subsystem::Admin);
        assert_eq!("app".parse::<Subsystem>().unwrap(), Subsystem::Client);
        assert!("client".parse::<Subsystem>().is_err());
    }

    #[test]
    fn test_serde_keys() {
        assert_eq!(serde_json::to_string(&Subsystem::Client).unwrap(), r#""app""#);
        assert_eq!(
            serde_json::from_str::<Subsystem>(r#""admin""#).unwrap(),
            Subsystem::Admin
        );
    }
}
