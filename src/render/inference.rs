//! Inference result display

use crate::client::{InferenceMethod, InferenceResult};

use super::html::escape;

/// Guidance shown when the knowledge base has no statements
pub const NEED_STATEMENTS: &str = "Add at least one statement to the Knowledge Base first.";
/// Guidance shown when the query box is blank
pub const NEED_QUERY: &str = "Please enter a query statement.";
/// Placeholder while the request is in flight
pub const RUNNING: &str = "Running inference...";
/// Generic transport failure
pub const TRANSPORT_FAILED: &str = "Failed to run inference from server.";

/// A rendered inference answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceView {
    pub conclusion: String,
    pub derived: bool,
    /// The method the request was sent with
    pub method: InferenceMethod,
    /// Derivation steps in server order
    pub steps: Vec<String>,
}

impl InferenceView {
    pub fn new(result: InferenceResult, method: InferenceMethod) -> Self {
        Self {
            conclusion: result.conclusion,
            derived: result.derived,
            method,
            steps: result.steps,
        }
    }

    /// `TRUE` / `FALSE` badge text, straight from the boolean
    pub fn badge(&self) -> &'static str {
        if self.derived {
            "TRUE"
        } else {
            "FALSE"
        }
    }

    fn badge_class(&self) -> &'static str {
        if self.derived {
            "true"
        } else {
            "false"
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = format!(
            "Query:   {}\nDerived: {}\nMethod:  {}\nSteps:\n",
            self.conclusion,
            self.badge(),
            self.method
        );
        for (i, step) in self.steps.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, step));
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut html = format!("<strong>Query:</strong> {}<br>", escape(&self.conclusion));
        html.push_str(&format!(
            "<strong>Derived:</strong> <span class=\"{}\">{}</span><br>",
            self.badge_class(),
            self.badge()
        ));
        html.push_str(&format!("<strong>Method:</strong> {}<br>", self.method));
        html.push_str("<strong>Steps:</strong><ol>");
        for step in &self.steps {
            html.push_str(&format!("<li>{}</li>", escape(step)));
        }
        html.push_str("</ol>");
        html
    }
}
