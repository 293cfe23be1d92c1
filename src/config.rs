use std::str::FromStr;

use strum::{Display, EnumIter, EnumString};

/// Environment variable read by [`BvhConfig::from_env`]
pub const TRAVERSAL_ENV_VAR: &str = "TRI_BVH_TRAVERSAL";

/// How nearest-hit queries walk internal nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TraversalOrder {
    /// Near child first, far child only if it can still hold a closer hit
    #[default]
    Ordered,
    /// Both children, left then right. Debug aid, same results.
    Naive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BvhConfig {
    pub traversal: TraversalOrder,
}

impl BvhConfig {
    #[inline]
    pub fn with_traversal(mut self, traversal: TraversalOrder) -> Self {
        self.traversal = traversal;
        self
    }

    /// Defaults, overridden by `TRI_BVH_TRAVERSAL` when it holds a known value
    pub fn from_env() -> Self {
        let config = Self::default();

        match std::env::var(TRAVERSAL_ENV_VAR) {
            Ok(value) => match TraversalOrder::from_str(value.trim()) {
                Ok(traversal) => config.with_traversal(traversal),
                Err(_) => {
                    log::warn!(
                        "Ignoring {}={:?}; expected one of `ordered`, `naive`",
                        TRAVERSAL_ENV_VAR,
                        value
                    );
                    config
                }
            },
            Err(_) => config,
        }
    }
}
