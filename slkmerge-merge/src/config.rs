use slkmerge_core::lookups::CN;

///
/// Options for [crate::on_slk_intervals].
///
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MergeConfig {
    /// Names of the interval start and end columns, shared by both tables
    pub from_to: (String, String),
    /// Process join key groups on the rayon thread pool
    pub parallel: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            from_to: (CN.slk_from.to_string(), CN.slk_to.to_string()),
            parallel: false,
        }
    }
}

impl MergeConfig {
    pub fn with_from_to(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from_to = (from.into(), to.into());
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub(crate) fn from_to(&self) -> (&str, &str) {
        (self.from_to.0.as_str(), self.from_to.1.as_str())
    }
}
