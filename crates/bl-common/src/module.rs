use serde::{Deserialize, Serialize};

use crate::opcode::Opcode;

/// Format version written into every compiled module.
pub const FORMAT_VERSION: &str = "0.1.0";

/// A compiled BL program, serialized as the `.bl-code` JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeModule {
    pub version: String,
    pub program: String,
    pub source_file: String,
    /// Flat byte-code words: opcodes and jump targets.
    pub code: Vec<u32>,
    /// Mnemonic per instruction, in address order (operands omitted).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<String>,
    pub metadata: CodeMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeMetadata {
    pub compiler_version: String,
    /// Address of the trailing HALT, if the code ends with one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub halt_address: Option<u32>,
}

impl CodeModule {
    pub fn new(program: impl Into<String>, source_file: impl Into<String>, code: Vec<u32>) -> Self {
        let decoded = decode_words(&code);
        let halt_address = match decoded.last() {
            Some(&(ip, Opcode::Halt)) if ip + 1 == code.len() => Some(ip as u32),
            _ => None,
        };
        let instructions = decoded
            .iter()
            .map(|(_, op)| op.mnemonic().to_string())
            .collect();
        Self {
            version: FORMAT_VERSION.to_string(),
            program: program.into(),
            source_file: source_file.into(),
            code,
            instructions,
            metadata: CodeMetadata {
                compiler_version: env!("CARGO_PKG_VERSION").to_string(),
                halt_address,
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Walk the code word by word, skipping jump operands. Stops quietly at
/// the first word that is not a valid opcode; the compiler's listing pass
/// reports that case as an error.
fn decode_words(code: &[u32]) -> Vec<(usize, Opcode)> {
    let mut out = Vec::new();
    let mut ip = 0;
    while ip < code.len() {
        let Some(op) = Opcode::from_byte_code(code[ip]) else {
            break;
        };
        out.push((ip, op));
        ip += if op.has_operand() { 2 } else { 1 };
    }
    out
}
