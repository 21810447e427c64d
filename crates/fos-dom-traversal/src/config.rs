//! DOM Configuration

/// Tree configuration options
#[derive(Debug, Clone)]
pub struct DomConfig {
    /// Initial arena capacity (nodes)
    pub node_capacity: usize,

    /// Build `children` views as soon as they are first requested instead
    /// of on the first read. Reads behave the same either way.
    pub eager_element_views: bool,
}

impl Default for DomConfig {
    fn default() -> Self {
        Self {
            node_capacity: 64,
            eager_element_views: false,
        }
    }
}
