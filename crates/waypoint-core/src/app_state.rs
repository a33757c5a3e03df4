#![forbid(unsafe_code)]

//! Host application state as seen by the adaptive tutorial.
//!
//! The engine reads these values and never writes them back. The host owns
//! the authoritative copy and pushes snapshots through the app-state bridge.

use std::fmt;
use std::str::FromStr;

/// Top-level pages of the analysis workflow, in workflow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    /// Dataset upload and column overview.
    #[default]
    Upload,
    /// Column selection, scaling and missing-value handling.
    Preprocessing,
    /// Principal component analysis.
    Pca,
    /// K-means / hierarchical clustering.
    Clustering,
    /// Supervised classifier training and prediction.
    Classifier,
    /// Nearest-neighbour similarity search.
    Similarity,
    /// Report assembly and export.
    Report,
}

impl Page {
    /// Every page, in workflow order.
    pub const ALL: [Page; 7] = [
        Page::Upload,
        Page::Preprocessing,
        Page::Pca,
        Page::Clustering,
        Page::Classifier,
        Page::Similarity,
        Page::Report,
    ];

    /// Stable lowercase identifier.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Preprocessing => "preprocessing",
            Self::Pca => "pca",
            Self::Clustering => "clustering",
            Self::Classifier => "classifier",
            Self::Similarity => "similarity",
            Self::Report => "report",
        }
    }

    /// Display title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Upload => "Data upload",
            Self::Preprocessing => "Preprocessing",
            Self::Pca => "PCA",
            Self::Clustering => "Clustering",
            Self::Classifier => "Classifier",
            Self::Similarity => "Similarity search",
            Self::Report => "Report",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error returned when parsing an unknown page identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page: {0}")]
pub struct UnknownPage(pub String);

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

/// Names one boolean milestone in [`AppState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateFlag {
    DataLoaded,
    Preprocessed,
    PcaComputed,
    ClusteringDone,
    ClassifierTrained,
    SimilarityReady,
    ReportReady,
}

impl StateFlag {
    /// Every milestone, in workflow order.
    pub const ALL: [StateFlag; 7] = [
        StateFlag::DataLoaded,
        StateFlag::Preprocessed,
        StateFlag::PcaComputed,
        StateFlag::ClusteringDone,
        StateFlag::ClassifierTrained,
        StateFlag::SimilarityReady,
        StateFlag::ReportReady,
    ];

    /// Stable snake_case identifier, matching the [`AppState`] field name.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::DataLoaded => "data_loaded",
            Self::Preprocessed => "preprocessed",
            Self::PcaComputed => "pca_computed",
            Self::ClusteringDone => "clustering_done",
            Self::ClassifierTrained => "classifier_trained",
            Self::SimilarityReady => "similarity_ready",
            Self::ReportReady => "report_ready",
        }
    }

    /// Human-readable label for "waiting for ..." hints.
    pub const fn label(self) -> &'static str {
        match self {
            Self::DataLoaded => "a dataset to be loaded",
            Self::Preprocessed => "preprocessing to finish",
            Self::PcaComputed => "PCA to be computed",
            Self::ClusteringDone => "clustering to finish",
            Self::ClassifierTrained => "a classifier to be trained",
            Self::SimilarityReady => "a similarity search to run",
            Self::ReportReady => "the report to be generated",
        }
    }
}

impl fmt::Display for StateFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error returned when parsing an unknown milestone identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown state flag: {0}")]
pub struct UnknownStateFlag(pub String);

impl FromStr for StateFlag {
    type Err = UnknownStateFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        StateFlag::ALL
            .into_iter()
            .find(|flag| flag.slug().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| UnknownStateFlag(s.to_string()))
    }
}

/// Snapshot of what the user has accomplished in the host application.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    /// Page currently shown by the host; selects the tutorial step list.
    pub active_page: Page,
    /// Backend session identifier, once a dataset has been uploaded.
    pub session_id: Option<String>,
    pub data_loaded: bool,
    pub preprocessed: bool,
    pub pca_computed: bool,
    pub clustering_done: bool,
    pub classifier_trained: bool,
    pub similarity_ready: bool,
    pub report_ready: bool,
}

impl AppState {
    /// Check a single milestone.
    pub fn is_set(&self, flag: StateFlag) -> bool {
        match flag {
            StateFlag::DataLoaded => self.data_loaded,
            StateFlag::Preprocessed => self.preprocessed,
            StateFlag::PcaComputed => self.pca_computed,
            StateFlag::ClusteringDone => self.clustering_done,
            StateFlag::ClassifierTrained => self.classifier_trained,
            StateFlag::SimilarityReady => self.similarity_ready,
            StateFlag::ReportReady => self.report_ready,
        }
    }

    /// Builder-style setter, mostly for hosts and tests.
    #[must_use]
    pub fn with_flag(mut self, flag: StateFlag, value: bool) -> Self {
        let slot = match flag {
            StateFlag::DataLoaded => &mut self.data_loaded,
            StateFlag::Preprocessed => &mut self.preprocessed,
            StateFlag::PcaComputed => &mut self.pca_computed,
            StateFlag::ClusteringDone => &mut self.clustering_done,
            StateFlag::ClassifierTrained => &mut self.classifier_trained,
            StateFlag::SimilarityReady => &mut self.similarity_ready,
            StateFlag::ReportReady => &mut self.report_ready,
        };
        *slot = value;
        self
    }

    /// Builder-style page setter.
    #[must_use]
    pub fn on_page(mut self, page: Page) -> Self {
        self.active_page = page;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_slug_round_trips_through_from_str() {
        for page in Page::ALL {
            assert_eq!(page.slug().parse::<Page>(), Ok(page));
        }
        assert_eq!(" PCA ".parse::<Page>(), Ok(Page::Pca));
        assert!("charts".parse::<Page>().is_err());
    }

    #[test]
    fn with_flag_sets_only_that_flag() {
        let state = AppState::default().with_flag(StateFlag::PcaComputed, true);
        assert!(state.is_set(StateFlag::PcaComputed));
        assert!(!state.is_set(StateFlag::DataLoaded));
        assert!(!state.is_set(StateFlag::ReportReady));
    }

    #[test]
    fn default_state_is_upload_with_nothing_done() {
        let state = AppState::default();
        assert_eq!(state.active_page, Page::Upload);
        assert!(state.session_id.is_none());
        assert!(StateFlag::ALL.into_iter().all(|flag| !state.is_set(flag)));
    }

    #[test]
    fn state_flag_parses_slugs_and_dashes() {
        for flag in StateFlag::ALL {
            assert_eq!(flag.slug().parse::<StateFlag>(), Ok(flag));
        }
        assert_eq!("pca-computed".parse::<StateFlag>(), Ok(StateFlag::PcaComputed));
        assert!("trained".parse::<StateFlag>().is_err());
    }
}
