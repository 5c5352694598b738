// SPDX-License-Identifier: MPL-2.0
//! Screen enumeration for application navigation.

/// Screens the user can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Logged-out landing page.
    Welcome,
    Login,
    Register,
    /// The photo/album library (tab state lives on `App`).
    Library,
    /// A single album, by identifier.
    Album(i64),
}
