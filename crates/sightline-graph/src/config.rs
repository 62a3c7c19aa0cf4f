/// How the search treats a vertex that is already queued when a cheaper
/// route to it is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchMode {
    /// Record the cheaper cost and predecessor but leave the queued priority
    /// untouched. Fast, occasionally suboptimal. This is the default.
    #[default]
    Approximate,
    /// Lower the queued priority in place (decrease-key).
    Strict,
}

/// Tuning knobs for [`VisGraph`](crate::VisGraph) searches.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphConfig {
    /// Multiplier applied to the octile heuristic. Values above 1.0 make the
    /// heuristic inadmissible, trading path quality for fewer expansions.
    pub heuristic_weight: f64,
    /// Cost of the diagonal component of the octile heuristic, minus one.
    pub octile_constant: f64,
    /// Queue update policy.
    pub mode: SearchMode,
}

impl GraphConfig {
    pub const DEFAULT_HEURISTIC_WEIGHT: f64 = 1.6;
    pub const DEFAULT_OCTILE_CONSTANT: f64 = 0.41421356237;

    /// An unweighted, decrease-key configuration: the heuristic stays
    /// admissible and queued priorities are kept exact.
    pub fn exact() -> Self {
        Self {
            heuristic_weight: 1.0,
            mode: SearchMode::Strict,
            ..Self::default()
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            heuristic_weight: Self::DEFAULT_HEURISTIC_WEIGHT,
            octile_constant: Self::DEFAULT_OCTILE_CONSTANT,
            mode: SearchMode::default(),
        }
    }
}
