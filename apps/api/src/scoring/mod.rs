// Rule-based job fit scoring.
// Pure functions over the profile and posting text; no I/O happens here.

pub mod fit_scoring;
pub mod templates;
pub mod text;
