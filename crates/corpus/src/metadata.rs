//! Circuit metadata resolution.
//!
//! Maps a circuit identifier (filename stem) to descriptive fields used to
//! build the searchable text. Curated annotations cover the well-known
//! circuits of the corpus; everything else gets a derived default, so
//! resolution is total and never fails.

use serde::{Deserialize, Serialize};

/// Descriptive metadata for one circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitMetadata {
    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Category tag
    pub category: String,

    /// Keyword set
    pub keywords: Vec<String>,
}

/// Result of metadata resolution.
///
/// Keeping the two cases tagged puts the fallback rule in one place
/// instead of scattering presence checks across callers.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// A hand-authored entry matched the identifier
    Curated(CircuitMetadata),

    /// No curated entry; metadata synthesized from the identifier
    Derived(CircuitMetadata),
}

impl Resolved {
    /// Whether the metadata came from the curated table.
    pub fn is_curated(&self) -> bool {
        matches!(self, Resolved::Curated(_))
    }

    /// Unwrap to the metadata regardless of provenance.
    pub fn into_metadata(self) -> CircuitMetadata {
        match self {
            Resolved::Curated(m) | Resolved::Derived(m) => m,
        }
    }
}

struct CuratedEntry {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: &'static str,
    keywords: &'static [&'static str],
}

/// Resolve metadata for a circuit identifier.
///
/// Total function: every identifier yields metadata with all four fields
/// populated and a non-empty keyword set.
pub fn resolve(id: &str) -> Resolved {
    match CURATED.binary_search_by_key(&id, |entry| entry.id) {
        Ok(pos) => {
            let entry = &CURATED[pos];
            Resolved::Curated(CircuitMetadata {
                name: entry.name.to_string(),
                description: entry.description.to_string(),
                category: entry.category.to_string(),
                keywords: entry.keywords.iter().map(|k| k.to_string()).collect(),
            })
        }
        Err(_) => Resolved::Derived(derive_default(id)),
    }
}

/// Synthesize default metadata for an unannotated identifier.
fn derive_default(id: &str) -> CircuitMetadata {
    let spaced = id.replace(['-', '_'], " ");

    CircuitMetadata {
        name: title_case(&spaced),
        description: format!("{} circuit from Falstad simulator", id),
        category: "general".to_string(),
        keywords: vec![spaced, "circuit".to_string()],
    }
}

/// Uppercase the first character of each whitespace-separated word.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Curated annotations, sorted by identifier for binary search.
static CURATED: &[CuratedEntry] = &[
    CuratedEntry {
        id: "3-cgand",
        name: "3-Input AND Gate",
        description: "Three input AND logic gate",
        category: "digital-logic-gates",
        keywords: &["AND gate", "3-input", "logic gate", "digital"],
    },
    CuratedEntry {
        id: "3-cgor",
        name: "3-Input OR Gate",
        description: "Three input OR logic gate",
        category: "digital-logic-gates",
        keywords: &["OR gate", "3-input", "logic gate", "digital"],
    },
    CuratedEntry {
        id: "3-invert",
        name: "Triple Inverter",
        description: "Three NOT gates (inverters)",
        category: "digital-logic-gates",
        keywords: &["NOT gate", "inverter", "logic gate", "digital"],
    },
    CuratedEntry {
        id: "3way",
        name: "3-Way Switch",
        description: "Three-way switching circuit",
        category: "switching-circuits",
        keywords: &["3-way switch", "switching", "wiring"],
    },
    CuratedEntry {
        id: "4way",
        name: "4-Way Switch",
        description: "Four-way switching circuit",
        category: "switching-circuits",
        keywords: &["4-way switch", "switching", "wiring"],
    },
    CuratedEntry {
        id: "555int",
        name: "555 Integrator",
        description: "555-based integrating configuration",
        category: "timers-555",
        keywords: &["555 timer", "integrator", "analog"],
    },
    CuratedEntry {
        id: "555lowduty",
        name: "555 Low Duty Cycle",
        description: "555 astable with low duty-cycle configuration",
        category: "timers-555",
        keywords: &["555 timer", "astable", "low duty cycle", "PWM"],
    },
    CuratedEntry {
        id: "555missing",
        name: "555 Missing Pulse Detector",
        description: "Detects missing pulses using a 555",
        category: "timers-555",
        keywords: &["555 timer", "missing pulse", "detector", "monostable"],
    },
    CuratedEntry {
        id: "555monostable",
        name: "555 Monostable",
        description: "One-shot pulse generator using 555",
        category: "timers-555",
        keywords: &["555 timer", "monostable", "one-shot", "pulse"],
    },
    CuratedEntry {
        id: "555pulsemod",
        name: "555 Pulse Modulation",
        description: "Pulse-width modulation using 555",
        category: "timers-555",
        keywords: &["555 timer", "PWM", "modulation", "astable"],
    },
    CuratedEntry {
        id: "555saw",
        name: "555 Sawtooth Generator",
        description: "Generates a sawtooth waveform using 555",
        category: "timers-555",
        keywords: &["555 timer", "sawtooth", "waveform"],
    },
    CuratedEntry {
        id: "555schmitt",
        name: "555 Schmitt Trigger",
        description: "555 used as a Schmitt trigger",
        category: "timers-555",
        keywords: &["555 timer", "Schmitt trigger", "hysteresis"],
    },
    CuratedEntry {
        id: "555sequencer",
        name: "555 Sequencer",
        description: "Step sequencer built around 555 timing",
        category: "timers-555",
        keywords: &["555 timer", "sequencer", "timing"],
    },
    CuratedEntry {
        id: "555square",
        name: "555 Square Wave Generator",
        description: "Square wave oscillator using 555",
        category: "timers-555",
        keywords: &["555 timer", "square wave", "oscillator", "astable"],
    },
    CuratedEntry {
        id: "7segdecoder",
        name: "7-Segment Decoder",
        description: "Binary/BCD to 7-segment decoder logic",
        category: "digital-logic-decoders",
        keywords: &["7-segment", "decoder", "display", "digital"],
    },
    CuratedEntry {
        id: "allpass1",
        name: "All-Pass Filter (1st Order)",
        description: "First-order all-pass filter",
        category: "analog-filters",
        keywords: &["all-pass", "filter", "phase", "first order"],
    },
    CuratedEntry {
        id: "allpass2",
        name: "All-Pass Filter (2nd Order)",
        description: "Second-order all-pass filter",
        category: "analog-filters",
        keywords: &["all-pass", "filter", "phase", "second order"],
    },
    CuratedEntry {
        id: "amp-invert",
        name: "Inverting Amplifier",
        description: "Op-amp inverting configuration",
        category: "opamp-circuits",
        keywords: &["op-amp", "inverting amplifier", "gain"],
    },
    CuratedEntry {
        id: "bandpass",
        name: "Band-Pass Filter",
        description: "Standard band-pass filter circuit",
        category: "analog-filters",
        keywords: &["band-pass", "filter", "analog", "frequency response"],
    },
    CuratedEntry {
        id: "counter",
        name: "4-Bit Binary Counter",
        description: "4-bit synchronous binary counter circuit",
        category: "digital-sequential",
        keywords: &["binary counter", "4-bit", "sequential", "digital"],
    },
    CuratedEntry {
        id: "decoder",
        name: "Binary Decoder",
        description: "Converts binary input into one-hot output",
        category: "digital-combinational",
        keywords: &["decoder", "binary", "logic", "digital"],
    },
    CuratedEntry {
        id: "diff",
        name: "RC Differentiator Circuit",
        description: "Simple passive differentiator circuit using resistor and capacitor",
        category: "analog-filters",
        keywords: &["RC", "differentiator", "passive", "analog"],
    },
    CuratedEntry {
        id: "divideby2",
        name: "Divide-by-2 Counter",
        description: "Flip-flop circuit dividing input frequency by 2",
        category: "digital-sequential",
        keywords: &["frequency divider", "divide by 2", "flip-flop", "digital"],
    },
    CuratedEntry {
        id: "dram",
        name: "Dynamic RAM Cell",
        description: "Basic DRAM cell showing charge storage and refresh",
        category: "digital-memory",
        keywords: &["DRAM", "memory cell", "charge storage", "digital"],
    },
    CuratedEntry {
        id: "fulladd",
        name: "Full Adder",
        description: "1-bit full adder with carry input and output",
        category: "digital-arithmetic",
        keywords: &["full adder", "adder", "1-bit", "sum", "carry", "digital"],
    },
    CuratedEntry {
        id: "fullrect",
        name: "Full-Wave Rectifier",
        description: "Diode-based full-wave rectifier circuit",
        category: "analog-rectifiers",
        keywords: &["rectifier", "full-wave", "diode", "analog"],
    },
    CuratedEntry {
        id: "fullrectf",
        name: "Full-Wave Rectifier (Filtered)",
        description: "Full-wave rectifier with filter capacitor for DC output",
        category: "analog-rectifiers",
        keywords: &["rectifier", "full-wave", "filtered", "analog"],
    },
    CuratedEntry {
        id: "halfadd",
        name: "Half Adder",
        description: "1-bit half adder circuit without carry input",
        category: "digital-arithmetic",
        keywords: &["half adder", "adder", "sum", "logic", "digital"],
    },
    CuratedEntry {
        id: "inductac",
        name: "AC Inductor Response",
        description: "Demonstrates inductor behavior under AC conditions",
        category: "passive-components",
        keywords: &["inductor", "AC response", "reactance"],
    },
    CuratedEntry {
        id: "lrc",
        name: "LRC Resonant Circuit",
        description: "Demonstrates resonance in LRC network",
        category: "analog-filters",
        keywords: &["LRC", "resonance", "filter"],
    },
    CuratedEntry {
        id: "opint",
        name: "Op-Amp Integrator",
        description: "Standard op-amp integrator circuit",
        category: "opamp-circuits",
        keywords: &["op-amp", "integrator", "analog"],
    },
    CuratedEntry {
        id: "rectify",
        name: "Rectifier Demonstration",
        description: "Basic diode rectification circuit",
        category: "analog-rectifiers",
        keywords: &["rectifier", "diode", "half-wave", "analog"],
    },
    CuratedEntry {
        id: "volume",
        name: "Volume Control Circuit",
        description: "Adjustable audio attenuation circuit",
        category: "audio-circuits",
        keywords: &["volume control", "attenuator", "audio"],
    },
    CuratedEntry {
        id: "wheatstone",
        name: "Wheatstone Bridge",
        description: "Bridge circuit for resistance measurement",
        category: "measurement-circuits",
        keywords: &["Wheatstone bridge", "resistance", "measurement"],
    },
    CuratedEntry {
        id: "xor",
        name: "XOR Gate",
        description: "Exclusive OR logic gate",
        category: "digital-logic-gates",
        keywords: &["XOR", "logic gate", "digital"],
    },
    CuratedEntry {
        id: "xorphasedet",
        name: "XOR Phase Detector",
        description: "Phase detector implemented using XOR logic gate",
        category: "pll-circuits",
        keywords: &["XOR", "phase detector", "PLL"],
    },
    CuratedEntry {
        id: "zeneriv",
        name: "Zener Diode IV Characteristic",
        description: "Plots current-voltage curve of zener diode",
        category: "semiconductor-devices",
        keywords: &["zener diode", "IV curve", "breakdown"],
    },
    CuratedEntry {
        id: "zenerref",
        name: "Zener Reference Circuit",
        description: "Stable voltage reference using zener diode",
        category: "power-circuits",
        keywords: &["zener", "reference", "voltage"],
    },
    CuratedEntry {
        id: "zenerreffollow",
        name: "Zener Reference Follower",
        description: "Buffered zener voltage reference circuit",
        category: "power-circuits",
        keywords: &["zener", "buffer", "reference"],
    },
];
