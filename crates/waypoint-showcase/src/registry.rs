#![forbid(unsafe_code)]

//! Step registry for the chemometrics workspace.
//!
//! One onboarding list for first-time users plus one tutorial list per
//! [`Page`] for teaching mode. Lists are plain static data; ids are unique
//! within each list (checked by tests and by `StepList::new` at load).

use waypoint_core::app_state::{Page, StateFlag};
use waypoint_core::step::{Anchor, Step};

/// First-run tour of the application shell.
pub static ONBOARDING: &[Step] = &[
    Step::new(
        "welcome",
        "Welcome to the chemometrics workspace",
        "This short tour shows where each stage of an analysis lives. Use the arrow keys or the buttons to move, Esc to leave.",
    )
    .position(Anchor::Center),
    Step::new(
        "sidebar",
        "Analysis stages",
        "The sidebar lists every stage in workflow order: upload, preprocessing, PCA, clustering, classification, similarity and report.",
    )
    .target("#nav-sidebar")
    .position(Anchor::Right),
    Step::new(
        "upload",
        "Start with your data",
        "Upload a CSV or Excel file with one sample per row, or load the bundled example dataset.",
    )
    .target("#nav-upload")
    .position(Anchor::Right),
    Step::new(
        "session",
        "Your session",
        "Each upload opens a session. Results from every stage are kept in it until you upload another file.",
    )
    .target("#session-badge")
    .position(Anchor::Bottom),
    Step::new(
        "teaching-mode",
        "Teaching mode",
        "Turn this on to get a step-by-step tutorial for whichever page you are on.",
    )
    .target("#teaching-toggle")
    .position(Anchor::Left),
    Step::new(
        "assistant",
        "Ask the assistant",
        "The assistant can explain any chart in the context of your current results.",
    )
    .target("#assistant-button")
    .position(Anchor::Top),
];

static UPLOAD: &[Step] = &[
    Step::new(
        "dropzone",
        "Upload a dataset",
        "Accepted formats are .csv, .xlsx and .xls. Numeric columns become variables; text columns are kept as categories.",
    )
    .target("#upload-dropzone")
    .position(Anchor::Bottom)
    .interactive("Drop a file on the highlighted area or click it to browse."),
    Step::new(
        "example",
        "Or use the example",
        "The example dataset has feedstock and concentration labels, so every stage of the workflow has something to show.",
    )
    .target("#load-example")
    .position(Anchor::Right)
    .interactive("Click to load the example dataset."),
    Step::new(
        "columns",
        "Column overview",
        "Check the detected type of each column and a few sample values before moving on.",
    )
    .target("#column-table")
    .position(Anchor::Top)
    .requires(StateFlag::DataLoaded),
];

static PREPROCESSING: &[Step] = &[
    Step::new(
        "column-picker",
        "Choose variables",
        "Only the selected numeric columns take part in PCA, clustering and classification.",
    )
    .target("#column-picker")
    .position(Anchor::Right)
    .requires(StateFlag::DataLoaded),
    Step::new(
        "missing-values",
        "Missing values",
        "Rows with gaps can be dropped, or gaps can be filled with the column mean.",
    )
    .target("#nan-strategy")
    .position(Anchor::Bottom),
    Step::new(
        "standardize",
        "Standardize",
        "Scaling every variable to zero mean and unit variance keeps large-valued columns from dominating.",
    )
    .target("#standardize-toggle")
    .position(Anchor::Bottom),
    Step::new(
        "run-preprocessing",
        "Apply",
        "The summary table shows mean, standard deviation and range for each kept variable.",
    )
    .target("#run-preprocessing")
    .position(Anchor::Top)
    .interactive("Click Apply to preprocess the data."),
];

static PCA: &[Step] = &[
    Step::new(
        "components",
        "Number of components",
        "Leave empty to keep them all; you can narrow it down after looking at the scree plot.",
    )
    .target("#pca-components")
    .position(Anchor::Right)
    .requires(StateFlag::Preprocessed),
    Step::new(
        "run-pca",
        "Compute PCA",
        "PCA rotates the data onto orthogonal directions ordered by how much variance they explain.",
    )
    .target("#run-pca")
    .position(Anchor::Bottom)
    .interactive("Click Compute to run PCA."),
    Step::new(
        "scree",
        "Explained variance",
        "Bars show each component's share; the line shows the cumulative total. Look for the elbow.",
    )
    .target("#scree-plot")
    .position(Anchor::Left)
    .requires(StateFlag::PcaComputed),
    Step::new(
        "scores",
        "Scores plot",
        "Each point is a sample projected onto two components. Samples that cluster together have similar profiles.",
    )
    .target("#scores-plot")
    .position(Anchor::Left)
    .requires(StateFlag::PcaComputed),
    Step::new(
        "loadings",
        "Loadings",
        "Loadings tell you which original variables drive each component.",
    )
    .target("#loadings-plot")
    .position(Anchor::Top)
    .requires(StateFlag::PcaComputed),
];

static CLUSTERING: &[Step] = &[
    Step::new(
        "method",
        "Method",
        "K-means needs the number of clusters up front; hierarchical clustering builds a dendrogram you can cut later.",
    )
    .target("#cluster-method")
    .position(Anchor::Right),
    Step::new(
        "use-pca",
        "Cluster on PCA scores",
        "Clustering on a few components removes noise carried by the minor ones.",
    )
    .target("#cluster-use-pca")
    .position(Anchor::Right)
    .requires(StateFlag::PcaComputed),
    Step::new(
        "run-clustering",
        "Run clustering",
        "Try between 2 and 10 clusters.",
    )
    .target("#run-clustering")
    .position(Anchor::Bottom)
    .interactive("Click Run to cluster the samples."),
    Step::new(
        "silhouette",
        "Silhouette",
        "Values near 1 mean well separated clusters; values near 0 mean overlapping ones.",
    )
    .target("#silhouette-chart")
    .position(Anchor::Left)
    .requires(StateFlag::ClusteringDone),
];

static CLASSIFIER: &[Step] = &[
    Step::new(
        "target",
        "What to predict",
        "Pick the label column the model should learn, such as feedstock or concentration.",
    )
    .target("#classifier-target")
    .position(Anchor::Right)
    .requires(StateFlag::Preprocessed),
    Step::new(
        "model",
        "Model",
        "Random forest, SVM, k-NN and logistic regression are available. Start with random forest.",
    )
    .target("#classifier-model")
    .position(Anchor::Right),
    Step::new(
        "train",
        "Train",
        "Part of the data is held out to measure accuracy on samples the model has not seen.",
    )
    .target("#train-classifier")
    .position(Anchor::Bottom)
    .interactive("Click Train to fit the model."),
    Step::new(
        "confusion",
        "Confusion matrix",
        "Rows are true classes, columns are predictions. Off-diagonal cells are mistakes.",
    )
    .target("#confusion-matrix")
    .position(Anchor::Left)
    .requires(StateFlag::ClassifierTrained),
];

static SIMILARITY: &[Step] = &[
    Step::new(
        "reference",
        "Reference sample",
        "Choose the sample you want to find neighbours for.",
    )
    .target("#similarity-sample")
    .position(Anchor::Right)
    .requires(StateFlag::Preprocessed),
    Step::new(
        "metric",
        "Distance metric",
        "Euclidean distance is a good default; cosine ignores overall intensity.",
    )
    .target("#similarity-metric")
    .position(Anchor::Right),
    Step::new(
        "results",
        "Nearest samples",
        "The closest samples are listed with their distance and labels.",
    )
    .target("#similarity-results")
    .position(Anchor::Top)
    .requires(StateFlag::SimilarityReady),
];

static REPORT: &[Step] = &[
    Step::new(
        "sections",
        "Report sections",
        "Only stages you have completed can be included.",
    )
    .target("#report-sections")
    .position(Anchor::Right)
    .requires(StateFlag::DataLoaded),
    Step::new(
        "export",
        "Export",
        "Download the report, or export the processed data as CSV.",
    )
    .target("#export-report")
    .position(Anchor::Top)
    .requires(StateFlag::ReportReady),
];

/// Tutorial steps for `page`.
pub fn page_steps(page: Page) -> &'static [Step] {
    match page {
        Page::Upload => UPLOAD,
        Page::Preprocessing => PREPROCESSING,
        Page::Pca => PCA,
        Page::Clustering => CLUSTERING,
        Page::Classifier => CLASSIFIER,
        Page::Similarity => SIMILARITY,
        Page::Report => REPORT,
    }
}
