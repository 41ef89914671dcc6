//! Prompt refiner service.
//!
//! Synthesizes an improved prompt from the current prompt, a performance
//! analysis, research findings, and an ordered set of improvement targets.
//! Pure: identical inputs always yield byte-identical output. Persistence is
//! a separate explicit step through the override store.

use serde::{Deserialize, Serialize};

use crate::domain::models::{EvaluationResult, RefinerConfig, ResearchFindings};

/// Recognized improvement targets, applied in caller-supplied order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementTag {
    Clarity,
    ErrorHandling,
    Reasoning,
}

impl ImprovementTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clarity => "clarity",
            Self::ErrorHandling => "error_handling",
            Self::Reasoning => "reasoning",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "clarity" => Some(Self::Clarity),
            "error_handling" => Some(Self::ErrorHandling),
            "reasoning" => Some(Self::Reasoning),
            _ => None,
        }
    }

    /// Parse a tag list, silently dropping unrecognized entries.
    pub fn parse_list<S: AsRef<str>>(tags: &[S]) -> Vec<Self> {
        tags.iter().filter_map(|s| Self::from_str(s.as_ref())).collect()
    }

    /// What the applied change does, for the change summary.
    fn change_description(&self) -> &'static str {
        match self {
            Self::Clarity => "Add explicit instruction for concise, structured responses",
            Self::ErrorHandling => "Add error state definitions and recovery instructions",
            Self::Reasoning => "Add chain-of-thought reasoning instructions",
        }
    }

    /// The instruction block appended to the prompt.
    fn instruction_block(&self) -> &'static str {
        match self {
            Self::Clarity => {
                "Provide clear, concise responses with structured formatting when appropriate."
            }
            Self::ErrorHandling => {
                "When encountering errors, clearly state the issue and suggest recovery actions."
            }
            Self::Reasoning => "For complex tasks, break down your reasoning into clear steps.",
        }
    }
}

/// Fixed block appended when the overall score falls below the
/// clarification threshold.
const CLARIFICATION_BLOCK: &str = "Focus on task completion and accuracy. If uncertain, ask for \
     clarification rather than proceeding with incomplete information.";

/// One applied change, recorded in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedChange {
    pub tag: ImprovementTag,
    pub change: String,
    pub addition: String,
}

/// Diffable record of what a refinement did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeSummary {
    /// Character length of the prompt before refinement.
    pub original_length: usize,
    /// Character length of the synthesized prompt.
    pub improved_length: usize,
    /// Count of tag-driven improvements (the clarification block, being
    /// score-driven, is not counted here).
    pub improvements_applied: usize,
    pub changes: Vec<AppliedChange>,
    /// The target list as supplied by the caller.
    pub targets: Vec<ImprovementTag>,
}

/// Result of one refinement pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinementOutcome {
    pub improved_prompt: String,
    pub change_summary: ChangeSummary,
}

/// Synthesizes improved prompts.
pub struct PromptRefiner {
    config: RefinerConfig,
}

impl PromptRefiner {
    pub fn new(config: RefinerConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self::new(RefinerConfig::default())
    }

    /// Apply the targeted improvements to `current_prompt`.
    ///
    /// Each recognized tag appends its instruction block in supplied order.
    /// Independently, an analysis score below the clarification threshold
    /// appends one fixed clarification-seeking block. Research findings are
    /// logged for audit; they inform the caller's choice of targets rather
    /// than the synthesized text.
    pub fn refine(
        &self,
        current_prompt: &str,
        performance_analysis: &EvaluationResult,
        research_findings: &ResearchFindings,
        target_improvements: &[ImprovementTag],
    ) -> RefinementOutcome {
        tracing::debug!(
            agent_name = %performance_analysis.agent_name,
            overall_score = performance_analysis.overall_score,
            findings = research_findings.findings.len(),
            targets = target_improvements.len(),
            "refining prompt"
        );

        let mut improved_prompt = current_prompt.to_string();
        let mut changes = Vec::with_capacity(target_improvements.len());

        for &tag in target_improvements {
            improved_prompt.push_str("\n\n");
            improved_prompt.push_str(tag.instruction_block());
            changes.push(AppliedChange {
                tag,
                change: tag.change_description().to_string(),
                addition: tag.instruction_block().to_string(),
            });
        }

        if performance_analysis.overall_score < self.config.clarification_threshold {
            improved_prompt.push_str("\n\n");
            improved_prompt.push_str(CLARIFICATION_BLOCK);
        }

        let change_summary = ChangeSummary {
            original_length: current_prompt.chars().count(),
            improved_length: improved_prompt.chars().count(),
            improvements_applied: changes.len(),
            changes,
            targets: target_improvements.to_vec(),
        };

        RefinementOutcome {
            improved_prompt,
            change_summary,
        }
    }
}
