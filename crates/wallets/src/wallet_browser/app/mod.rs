pub(crate) mod contents {
    /// Replaced with the session token when the page is served.
    pub const TOKEN_PLACEHOLDER: &str = "__SESSION_TOKEN__";

    /// Replaced with the configured network when the page is served.
    pub const NETWORK_PLACEHOLDER: &str = "__NETWORK__";

    pub const INDEX_HTML: &str = include_str!("assets/index.html");
}
