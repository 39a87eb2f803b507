//! Static pedagogical framework references
//!
//! KDKA and PRRR are reference taxonomies handed to every agent as contextual
//! input. They are configuration values: the engine passes them through
//! unchanged and nothing in the pipeline interprets them.

use std::sync::LazyLock;

use serde_json::{Value, json};

static KDKA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "summary": "KDKA aligns Knowledge, Delivery, Context, and Assessment so learning design centers the learner and remains constructively aligned across modalities.",
        "pedagogical_basis": [
            "Learning is dynamic and contextual; design must connect content to learner needs.",
            "Delivery should span multiple modalities with accessibility in mind.",
            "Assessment must include formative and summative evidence aligned to outcomes."
        ],
        "how_to_use": "For each module, explicitly list target knowledge, choose delivery modes that fit learners and constraints, situate activities in authentic contexts, and align assessments to the stated outcomes.",
        "dimensions": {
            "knowledge": "Facts, concepts, skills, and metacognition tied to outcomes and Bloom levels.",
            "delivery": "Modalities and methods such as micro-lectures, labs, peer discussion, debates.",
            "context": "Authentic scenarios, stakeholders, constraints, and equity considerations.",
            "assessment": "Formative and summative checks aligned to outcomes; transparent criteria."
        },
        "accessibility_equity_ethics": [
            "Provide transcripts, alt text, and low bandwidth materials.",
            "Avoid PII in datasets; document consent and provenance.",
            "Offer multiple demonstration modes for the same competency."
        ],
        "notes": "Shared context for agents so alignment stays consistent across weekly modules and artifacts."
    })
});

static PRRR: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "summary": "PRRR ensures each experience is Personal, Relatable, Relative, and Real to drive inclusion, engagement, and ethical relevance.",
        "how_to_use": "Every activity should touch at least two PRRR dimensions. Make relevance explicit in prompts, rubrics, and feedback.",
        "dimensions": {
            "personal": "Elicit prior experiences, goals, and choice of dataset/topic.",
            "relatable": "Use analogies and cross disciplinary links that honor diverse perspectives.",
            "relative": "Compare options, methods, metrics, risks, and benefits.",
            "real_world": "Anchor tasks in authentic stakeholders, decisions, and constraints."
        },
        "infusion_prompts": [
            "Personal: describe a tool you used recently - what did it help with and where did it fall short?",
            "Relatable: explain a core concept through a familiar analogy.",
            "Relative: for your scenario, which error is worse and why?",
            "Real world: draft a brief advising a non-expert, with benefits, risks, and mitigations."
        ],
        "ethics_guardrails": [
            "Disclose limitations and uncertainty.",
            "Avoid sensitive data; document assumptions and mitigations.",
            "Encourage respectful debate and multiple viewpoints."
        ],
        "notes": "Embed PRRR signals in prompts, examples, rubrics, and peer review so relevance stays visible and accountable."
    })
});

/// KDKA framework reference object
pub fn kdka() -> &'static Value {
    &KDKA
}

/// PRRR framework reference object
pub fn prrr() -> &'static Value {
    &PRRR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kdka_dimensions() {
        let dimensions = kdka()["dimensions"].as_object().expect("kdka has dimensions");
        for key in ["knowledge", "delivery", "context", "assessment"] {
            assert!(dimensions.contains_key(key), "missing dimension {key}");
        }
    }

    #[test]
    fn test_prrr_dimensions() {
        let dimensions = prrr()["dimensions"].as_object().expect("prrr has dimensions");
        for key in ["personal", "relatable", "relative", "real_world"] {
            assert!(dimensions.contains_key(key), "missing dimension {key}");
        }
    }

    #[test]
    fn test_frameworks_are_stable_references() {
        assert!(std::ptr::eq(kdka(), kdka()));
        assert!(std::ptr::eq(prrr(), prrr()));
    }
}
