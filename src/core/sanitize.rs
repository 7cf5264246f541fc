// src/core/sanitize.rs

/// Join text nodes, each trimmed on both ends. Whitespace inside a node is
/// kept as served, so `"Fallo  encendido"` stays two-spaced.
pub fn strip_join<'a>(nodes: impl IntoIterator<Item = &'a str>) -> String {
    nodes.into_iter().map(str::trim).collect()
}
