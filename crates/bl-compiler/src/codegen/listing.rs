use std::fmt;

use bl_common::Opcode;

use crate::error::CodegenError;

/// One decoded instruction of a flat code sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedInstruction {
    pub address: usize,
    pub opcode: Opcode,
    /// Jump target, for opcodes that take one.
    pub operand: Option<u32>,
}

impl fmt::Display for DecodedInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}  {}", self.address, self.opcode.mnemonic())?;
        if let Some(target) = self.operand {
            write!(f, " {}", target)?;
        }
        Ok(())
    }
}

/// Decode `code` into instructions. Fails on words that are not opcodes
/// and on a jump whose operand is cut off.
pub fn disassemble(code: &[u32]) -> Result<Vec<DecodedInstruction>, CodegenError> {
    let mut out = Vec::new();
    let mut address = 0;
    while address < code.len() {
        let word = code[address];
        let opcode =
            Opcode::from_byte_code(word).ok_or(CodegenError::InvalidOpcode { address, word })?;
        let operand = if opcode.has_operand() {
            let target = code
                .get(address + 1)
                .copied()
                .ok_or_else(|| CodegenError::MissingOperand {
                    address,
                    opcode: opcode.mnemonic().to_string(),
                })?;
            Some(target)
        } else {
            None
        };
        out.push(DecodedInstruction {
            address,
            opcode,
            operand,
        });
        address += if operand.is_some() { 2 } else { 1 };
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_jumps_with_operands() {
        let listing = disassemble(&[7, 3, 0, 5]).unwrap();
        let lines: Vec<String> = listing.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "0000  JUMP_IF_NOT_NEXT_IS_EMPTY 3",
                "0002  MOVE",
                "0003  HALT"
            ]
        );
    }

    #[test]
    fn operand_words_are_not_decoded_as_opcodes() {
        // The operand 99 would be an invalid opcode on its own.
        let listing = disassemble(&[6, 99]).unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].operand, Some(99));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            disassemble(&[0, 17]),
            Err(CodegenError::InvalidOpcode {
                address: 1,
                word: 17
            })
        );
        assert_eq!(
            disassemble(&[4, 16]),
            Err(CodegenError::MissingOperand {
                address: 1,
                opcode: "JUMP_IF_NOT_TRUE".into()
            })
        );
        assert_eq!(disassemble(&[]), Ok(Vec::new()));
    }
}
