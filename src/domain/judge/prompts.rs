//! Configurable judge prompts

use serde::{Deserialize, Serialize};

use super::template::{PromptTemplate, TemplateError};

const RELEVANCE_PROMPT: &str = r#"Hadith: "${var:claim}"

Quranic Ayah: "${var:verse}"

Only respond with a number from 1 to 10 for how closely this Ayah relates to the Hadith. Your answer must be formatted exactly like this: Score: <number>
Score:
"#;

const RELATIONSHIP_PROMPT: &str = r#"You are a scholar analyzing the relationship between a Hadith and a specific Quranic ayah.

Your task is to carefully examine **all possible cases** and then assign the relationship to exactly **one** of the following categories:

- **Supported** – The ayah clearly confirms or directly aligns with the message of the Hadith.
- **${var:neutral_label}** – The ayah is somewhat related but does not directly or strongly support the Hadith.
- **Contradicted** – The ayah clearly opposes, denies, or invalidates the message of the Hadith.

Base your classification **strictly on the content** of the given ayah and hadith. Do not rely on external sources or assumptions.

Hadith:
"${var:claim}"

Quranic Ayah:
"${var:verse}"

Respond with a JSON object of the form {"classification": "<category>"}.
"#;

const VERDICT_PROMPT: &str = r#"You are an expert in Islamic scholarship. Your task is to first **analyze** the following Hadith and then **validate** it based **only on the provided Quranic ayahs**.

Follow these strict rules for validation:

- If the Hadith is clearly **supported** by one or more ayahs, mark it as **Valid**.
- If the Hadith is clearly **contradicted** by one or more ayahs, mark it as **Invalid**.
- If the ayahs are **insufficient**, **ambiguous**, or **not clearly related**, mark it as **Unknown**.

Do **not** rely on any external knowledge or assumptions. Your decision must be based strictly on the ayahs given.

Hadith:
"${var:claim}"

Supported Ayahs:
${var:supported}

Contradicted Ayahs:
${var:contradicted}

Respond in **only** this JSON format:
{
  "confidence": 0.85,
  "verdict": "Valid",
  "summary": "The ayahs clearly support the message of the hadith."
}
"#;

/// Prompt templates for the three judges, as configured
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JudgePrompts {
    pub relevance: String,
    pub relationship: String,
    pub verdict: String,
}

impl Default for JudgePrompts {
    fn default() -> Self {
        Self {
            relevance: RELEVANCE_PROMPT.to_string(),
            relationship: RELATIONSHIP_PROMPT.to_string(),
            verdict: VERDICT_PROMPT.to_string(),
        }
    }
}

/// Parsed and checked judge prompts
#[derive(Debug, Clone)]
pub struct CompiledPrompts {
    pub relevance: PromptTemplate,
    pub relationship: PromptTemplate,
    pub verdict: PromptTemplate,
}

impl JudgePrompts {
    pub fn compile(&self) -> Result<CompiledPrompts, TemplateError> {
        let relevance = PromptTemplate::parse("relevance", &self.relevance);
        relevance.check(&["claim", "verse"], &["claim", "verse"])?;

        let relationship = PromptTemplate::parse("relationship", &self.relationship);
        relationship.check(&["claim", "verse"], &["claim", "verse", "neutral_label"])?;

        let verdict = PromptTemplate::parse("verdict", &self.verdict);
        verdict.check(
            &["claim", "supported", "contradicted"],
            &["claim", "supported", "contradicted"],
        )?;

        Ok(CompiledPrompts {
            relevance,
            relationship,
            verdict,
        })
    }
}
