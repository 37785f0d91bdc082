//! Prompt assembly.
//!
//! Renders the fixed instruction templates with Handlebars and formats
//! retrieved circuits into the delimited context blocks the generation
//! template expects. Everything here is deterministic and purely textual;
//! no generation happens in this crate.

use crate::templates::{GENERATION_TEMPLATE, KEYWORD_EXTRACTION_TEMPLATE};
use circuitry_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Width of the `=` delimiter lines around each circuit block.
const BLOCK_DELIMITER_WIDTH: usize = 70;

/// A retrieved circuit in the form the assembler needs.
///
/// Callers map their index rows into this struct; the assembler has no
/// knowledge of embeddings or scores, only of ranked presentation order.
#[derive(Debug, Clone)]
pub struct CircuitBlock {
    /// Row position within the index build
    pub position: u32,

    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Category tag
    pub category: String,

    /// Keyword set
    pub keywords: Vec<String>,

    /// Verbatim circuit text
    pub text: String,
}

/// Render the keyword extraction prompt for a raw user query.
pub fn build_extraction_prompt(query: &str) -> AppResult<String> {
    let mut variables = HashMap::new();
    variables.insert("query".to_string(), query.to_string());
    render_template(KEYWORD_EXTRACTION_TEMPLATE, &variables)
}

/// Render the full generation prompt from retrieved circuits and the
/// original user query.
///
/// Blocks are concatenated in the order given (highest similarity first).
/// An empty slice still produces a valid, if context-free, prompt.
pub fn assemble_generation_prompt(blocks: &[CircuitBlock], query: &str) -> AppResult<String> {
    let context: String = blocks.iter().map(format_circuit_block).collect();

    tracing::debug!(
        "Assembled generation context from {} circuit blocks ({} bytes)",
        blocks.len(),
        context.len()
    );

    let mut variables = HashMap::new();
    variables.insert("context".to_string(), context);
    variables.insert("query".to_string(), query.to_string());
    render_template(GENERATION_TEMPLATE, &variables)
}

/// Format one retrieved circuit as a delimited context block.
fn format_circuit_block(block: &CircuitBlock) -> String {
    let delimiter = "=".repeat(BLOCK_DELIMITER_WIDTH);

    format!(
        "\n{delimiter}\nINDEX: {}\nCIRCUIT NAME: {}\nDESCRIPTION: {}\nCATEGORY: {}\nKEYWORDS: {}\n{delimiter}\nCIRCUIT TEXT:\n{}\n\n",
        block.position,
        block.name,
        block.description,
        block.category,
        block.keywords.join(", "),
        block.text,
    )
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Circuit text is plain text, never HTML
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_block() -> CircuitBlock {
        CircuitBlock {
            position: 3,
            name: "XOR Gate".to_string(),
            description: "Exclusive OR logic gate".to_string(),
            category: "digital-logic-gates".to_string(),
            keywords: vec!["XOR".to_string(), "logic gate".to_string()],
            text: "$ 1 0.000005 10.2 50 5 43\n150 208 176 304 176 0 2 0 5".to_string(),
        }
    }

    #[test]
    fn test_extraction_prompt_embeds_query() {
        let prompt = build_extraction_prompt("Design a 6-bit R2R ladder DAC").unwrap();

        assert!(prompt.contains("Design a 6-bit R2R ladder DAC"));
        assert!(prompt.contains("5-15 words maximum"));
        assert!(prompt.contains("Respond with ONLY the keywords"));
    }

    #[test]
    fn test_generation_prompt_renders_blocks_in_order() {
        let mut second = sample_block();
        second.position = 7;
        second.name = "Full Adder".to_string();

        let prompt =
            assemble_generation_prompt(&[sample_block(), second], "show me an XOR gate").unwrap();

        assert!(prompt.contains("CIRCUIT NAME: XOR Gate"));
        assert!(prompt.contains("CIRCUIT NAME: Full Adder"));
        assert!(prompt.contains("INDEX: 3"));
        assert!(prompt.contains("KEYWORDS: XOR, logic gate"));

        // Ranked order is preserved in the rendered context
        let xor_at = prompt.find("CIRCUIT NAME: XOR Gate").unwrap();
        let adder_at = prompt.find("CIRCUIT NAME: Full Adder").unwrap();
        assert!(xor_at < adder_at);
    }

    #[test]
    fn test_generation_prompt_repeats_query() {
        let prompt = assemble_generation_prompt(&[sample_block()], "show me an XOR gate").unwrap();

        // The query appears both in the header and in the closing instruction
        assert!(prompt.matches("show me an XOR gate").count() >= 2);
    }

    #[test]
    fn test_empty_retrieval_still_yields_valid_prompt() {
        let prompt = assemble_generation_prompt(&[], "design a half adder").unwrap();

        assert!(prompt.contains("design a half adder"));
        assert!(prompt.contains("USER QUERY"));
        assert!(!prompt.contains("CIRCUIT NAME:"));
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let blocks = vec![sample_block()];
        let a = assemble_generation_prompt(&blocks, "query").unwrap();
        let b = assemble_generation_prompt(&blocks, "query").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_html_escaping() {
        let mut block = sample_block();
        block.text = "a & b < c".to_string();

        let prompt = assemble_generation_prompt(&[block], "q & a").unwrap();
        assert!(prompt.contains("a & b < c"));
        assert!(prompt.contains("q & a"));
    }
}
