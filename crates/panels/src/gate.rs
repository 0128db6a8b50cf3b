//! Which identity sees the admin controls.
//!
//! The gate only decides what is shown. The contract checks the caller on every admin call
//! and rejects anyone else, whatever the gate said.

/// Compares the connected identity against the configured admin address.
///
/// The default gate lets nobody through.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdminGate {
    admin: Option<String>,
    open: bool,
}

impl AdminGate {
    /// Only `admin` passes. `None` keeps the gate closed for everyone.
    pub fn new(admin: Option<String>) -> Self {
        Self { admin, open: false }
    }

    /// Any connected identity passes.
    pub fn open() -> Self {
        Self { admin: None, open: true }
    }

    pub fn admin(&self) -> Option<&str> {
        self.admin.as_deref()
    }

    /// Exact, case-sensitive match. Nobody passes while disconnected.
    pub fn allows(&self, identity: Option<&str>) -> bool {
        match (identity, self.admin.as_deref()) {
            (None, _) => false,
            (Some(_), None) => self.open,
            (Some(identity), Some(admin)) => identity == admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_admin_passes() {
        let gate = AdminGate::new(Some("SP_ADMIN".to_string()));
        assert!(gate.allows(Some("SP_ADMIN")));
        assert!(!gate.allows(Some("SP_USER")));
        assert!(!gate.allows(Some("sp_admin")));
        assert!(!gate.allows(Some("SP_ADMIN ")));
        assert!(!gate.allows(None));
    }

    #[test]
    fn unconfigured_gate_is_closed() {
        for gate in [AdminGate::new(None), AdminGate::default()] {
            assert!(!gate.allows(Some("SP_USER")));
            assert!(!gate.allows(None));
        }
    }

    #[test]
    fn open_gate_needs_a_connection() {
        let gate = AdminGate::open();
        assert!(gate.allows(Some("SP_USER")));
        assert!(!gate.allows(None));
    }
}
