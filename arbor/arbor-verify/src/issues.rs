//! Verification issues and severity types.
//!
//! Defines the structural anomalies the verification engine can report.
//! Issues are diagnostics, never failures: processing always continues.

use arbor_types::Point3;

/// A structural issue found during verification.
#[derive(Debug, Clone)]
pub struct Issue {
    /// Type of issue.
    pub kind: IssueKind,

    /// Severity of the issue.
    pub severity: IssueSeverity,

    /// Human-readable description.
    pub description: String,

    /// Location in space (if applicable).
    pub location: Option<Point3<f64>>,

    /// Arena index of the affected section (if applicable).
    pub section_id: Option<usize>,
}

impl Issue {
    /// Create a new issue.
    #[must_use]
    pub fn new(kind: IssueKind, severity: IssueSeverity, description: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            description: description.into(),
            location: None,
            section_id: None,
        }
    }

    /// Set the location of the issue.
    #[must_use]
    pub fn with_location(mut self, location: Point3<f64>) -> Self {
        self.location = Some(location);
        self
    }

    /// Set the affected section.
    #[must_use]
    pub const fn with_section(mut self, section_id: usize) -> Self {
        self.section_id = Some(section_id);
        self
    }

    /// Check if this is an error-level issue.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.severity, IssueSeverity::Error)
    }

    /// Check if this is a warning.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self.severity, IssueSeverity::Warning)
    }
}

/// Types of verification issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// Section has no samples at all.
    EmptySection,
    /// Section has a single sample (no geometry).
    SingleSampleSection,
    /// Section has only two samples (suspiciously sparse).
    TwoSampleSection,
    /// Section shorter than twice the sum of its terminal radii.
    ShortSection,
    /// Segment shorter than the radius at its start.
    ShortSegment,
    /// Consecutive samples closer than the duplicate threshold.
    DuplicateSamples,
    /// Section has exactly one child (unexpected for a bifurcating tree).
    SingleChild,
    /// Section has more than two children.
    ExcessiveChildren,
    /// Child's first-sample radius exceeds its parent's last-sample radius.
    RadiusInversion,
    /// Two branches overlap when projected onto the soma sphere.
    BranchIntersection,
    /// Two soma profile points overlap when projected onto the soma sphere.
    ProfilePointIntersection,
}

impl IssueKind {
    /// Get a human-readable name for the issue type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EmptySection => "Empty Section",
            Self::SingleSampleSection => "Single-Sample Section",
            Self::TwoSampleSection => "Two-Sample Section",
            Self::ShortSection => "Short Section",
            Self::ShortSegment => "Short Segment",
            Self::DuplicateSamples => "Duplicate Samples",
            Self::SingleChild => "Single Child",
            Self::ExcessiveChildren => "Excessive Children",
            Self::RadiusInversion => "Radius Inversion",
            Self::BranchIntersection => "Branch Intersection",
            Self::ProfilePointIntersection => "Profile-Point Intersection",
        }
    }
}

/// Severity of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IssueSeverity {
    /// Informational only.
    Info,
    /// Suspicious, but downstream processing can cope.
    Warning,
    /// Structurally broken; downstream results for the affected section
    /// are meaningless. Still non-fatal.
    Error,
}

impl IssueSeverity {
    /// Get a human-readable name for the severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}
