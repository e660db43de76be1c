//! Builder for configuring and constructing a [`Splitter`].

use crate::splitter::Splitter;
use crate::{Error, Result, Strategy};

/// Both the voice limit and the strategy must be chosen explicitly; there
/// is no implicit default strategy. Auto-tuning (capping the voice count at
/// the input's peak concurrency) is on unless disabled.
///
/// # Example
/// ```ignore
/// let splitter = Splitter::builder()
///     .max_voices(6)
///     .strategy(Strategy::DropExcess)
///     .auto_tune(false)
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct SplitterBuilder {
    max_voices: Option<usize>,
    strategy: Option<Strategy>,
    auto_tune: bool,
}

impl Default for SplitterBuilder {
    fn default() -> Self {
        Self {
            max_voices: None,
            strategy: None,
            auto_tune: true,
        }
    }
}

impl SplitterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of output voices (required, at least 1).
    pub fn max_voices(mut self, max_voices: usize) -> Self {
        self.max_voices = Some(max_voices);
        self
    }

    /// Voice assignment strategy (required).
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Cap the voice count at the input's peak concurrency (default on).
    pub fn auto_tune(mut self, auto_tune: bool) -> Self {
        self.auto_tune = auto_tune;
        self
    }

    pub fn build(self) -> Result<Splitter> {
        let max_voices = self
            .max_voices
            .ok_or_else(|| Error::Config("max_voices is required".into()))?;
        if max_voices == 0 {
            return Err(Error::Config("max_voices must be at least 1".into()));
        }
        let strategy = self
            .strategy
            .ok_or_else(|| Error::Config("strategy is required".into()))?;

        Ok(Splitter::new(max_voices, strategy, self.auto_tune))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_fields_fail_the_build() {
        assert!(SplitterBuilder::new().build().is_err());
        assert!(SplitterBuilder::new().max_voices(4).build().is_err());
        assert!(SplitterBuilder::new()
            .strategy(Strategy::Balanced)
            .build()
            .is_err());
    }

    #[test]
    fn zero_voices_is_rejected_at_build_time() {
        let result = SplitterBuilder::new()
            .max_voices(0)
            .strategy(Strategy::FirstFit)
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn complete_config_builds() {
        assert!(SplitterBuilder::new()
            .max_voices(8)
            .strategy(Strategy::Balanced)
            .build()
            .is_ok());
    }
}
