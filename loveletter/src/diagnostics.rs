use std::collections::BTreeSet;

use tracing::debug;

/// The `tracing` target of every diagnostic line.
pub const DIAGNOSTICS_TARGET: &str = "loveletter::diagnostics";

/// Zone-filtered diagnostic output.
///
/// Components that explain themselves (the judge dealing cards, bots
/// reasoning about their beliefs) get a `Diagnostics` value and tag every
/// line with a zone such as `"judge"` or `"ai"`. Only enabled zones are
/// forwarded to `tracing`, at debug level under [`DIAGNOSTICS_TARGET`] and
/// with the zone as a field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    zones: BTreeSet<String>,
    all: bool,
}

impl Diagnostics {
    /// Nothing is emitted.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Every zone is emitted.
    pub fn all() -> Self {
        Self {
            zones: BTreeSet::new(),
            all: true,
        }
    }

    /// Only the given zones are emitted. The zone `"all"` enables everything.
    pub fn with_zones<I, S>(zones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut diagnostics = Self::disabled();
        for zone in zones {
            diagnostics.enable(zone);
        }
        diagnostics
    }

    pub fn enable(&mut self, zone: impl Into<String>) {
        let zone = zone.into();
        if zone == "all" {
            self.all = true;
        } else {
            self.zones.insert(zone);
        }
    }

    pub fn disable(&mut self, zone: &str) {
        if zone == "all" {
            self.all = false;
            self.zones.clear();
        } else {
            self.zones.remove(zone);
        }
    }

    pub fn is_enabled(&self, zone: &str) -> bool {
        self.all || self.zones.contains(zone)
    }

    /// Call as `diagnostics.emit("ai", format_args!(...))` to avoid
    /// formatting for disabled zones.
    pub fn emit(&self, zone: &str, message: impl std::fmt::Display) {
        if self.is_enabled(zone) {
            debug!(target: DIAGNOSTICS_TARGET, zone, "{}", message);
        }
    }
}
