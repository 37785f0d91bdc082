//! Fixed instruction templates.
//!
//! Two templates drive every generative call in the workspace: keyword
//! extraction (query normalization before retrieval) and circuit-text
//! generation (grounded on the retrieved circuits). Both are Handlebars
//! templates with HTML escaping disabled.

/// Extracts a short keyword phrase from a raw user query.
///
/// Numeric parameter values and unit-bearing specifications are noise for
/// similarity search against a corpus indexed on topology/category/keyword
/// text, so the instruction strips them and keeps circuit concepts only.
pub const KEYWORD_EXTRACTION_TEMPLATE: &str = r#"You are a circuit design assistant. Extract the KEY CIRCUIT CONCEPTS from the user's query.

**USER QUERY:**
{{query}}

**YOUR TASK:**
Extract ONLY the circuit type, topology, and component keywords. IGNORE all numerical values, parameters, and specifications.

**RULES:**
- Focus on: circuit type, component names, topology, functionality
- Remove: voltage values, current values, resistance values, all numbers with units
- Extract: what type of circuit, what components, what configuration
- Keep it concise: 5-15 words maximum

**EXAMPLES:**

Query: "Design a 6-bit R2R ladder DAC"
Keywords: R2R ladder DAC 6-bit digital to analog converter

Query: "using fulladd and halfadd, make a 4-bit ripple carry adder"
Keywords: full adder half adder ripple carry adder 4-bit arithmetic

Query: "Design a voltage divider with source resistance using a single power supply 10V for the following specifications Vt = 0.5V, Id = 2mA, Vds = 50% of Vdd, kn = 100uA/v^2"
Keywords: voltage divider source resistance power supply MOSFET bias circuit

Query: "Create an 8-bit binary counter with reset"
Keywords: binary counter 8-bit counter reset sequential logic

Query: "Build a bandpass filter with cutoff frequencies 1kHz and 5kHz using op-amp"
Keywords: bandpass filter op-amp active filter

Query: "Design a common emitter amplifier with voltage gain of 50"
Keywords: common emitter amplifier BJT transistor amplifier

Now extract keywords from the user's query. Respond with ONLY the keywords, no explanations:"#;

/// Produces updated circuit text grounded on the retrieved base circuits.
///
/// The retrieved blocks arrive ranked (most relevant first); that ordering
/// is a priority signal for the model, not merely display order.
pub const GENERATION_TEMPLATE: &str = r#"You are a circuit design assistant working with Falstad circuit text files. The base circuit text retrieved for this request is provided below:
{{context}}

================ USER QUERY ================
{{query}}

The objective is to generate a circuit design based on the user's specifications while maintaining the integrity of the original circuit design.

You have to follow these steps:
1. Analyze the provided base circuit text thoroughly.
2. If the user request is simply to present the circuit without specifying changes, and if it matches the base circuit design, return the base circuit text as is.
3. If the user requests an extension or reduction of the base circuit, adjust the circuit accordingly while ensuring that:
   - All components remain connected and coherent.
   - Adjust component placements based on the base circuit's canvas logic, ensuring no components overlap and that there are no disconnections.
   - Maintain the original design flow; do not alter the fundamental circuit topology unless explicitly requested.
   - Properly space out the components for clarity and create appropriate junction nodes where wires branch out.
   - Ensure that proper power supply or ground connections are established for any new components added.

Avoid any hallucination, and focus on providing accurate and well-structured circuit text.

The final deliverable should be the updated circuit text based on the user's specifications without additional explanations.

Make sure to follow these guidelines for clarity:
- Use proper node connections.
- Ensure no overlapping components.
- Maintain clear spacing between components.
- Adjust component positions based on the original circuit layout.
- Dont cross wires over any component

I want you to provide the finalized circuit text for the user's query:
{{query}}"#;
