use std::fmt;

use serde::{Deserialize, Serialize};

/// Instruction set of the BL virtual machine.
///
/// Discriminants are the byte codes written into a compiled program and
/// must stay stable. Jump opcodes are followed by one operand word: the
/// absolute address of the jump target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum Opcode {
    // === Primitive instructions ===
    Move = 0,
    #[serde(rename = "TURNLEFT")]
    TurnLeft = 1,
    #[serde(rename = "TURNRIGHT")]
    TurnRight = 2,
    Infect = 3,
    Skip = 4,

    // === Control ===
    Halt = 5,
    Jump = 6,

    // === Conditional jumps (taken when the condition is false) ===
    JumpIfNotNextIsEmpty = 7,
    JumpIfNotNextIsNotEmpty = 8,
    JumpIfNotNextIsWall = 9,
    JumpIfNotNextIsNotWall = 10,
    JumpIfNotNextIsFriend = 11,
    JumpIfNotNextIsNotFriend = 12,
    JumpIfNotNextIsEnemy = 13,
    JumpIfNotNextIsNotEnemy = 14,
    JumpIfNotRandom = 15,
    JumpIfNotTrue = 16,
}

impl Opcode {
    pub const ALL: [Opcode; 17] = [
        Opcode::Move,
        Opcode::TurnLeft,
        Opcode::TurnRight,
        Opcode::Infect,
        Opcode::Skip,
        Opcode::Halt,
        Opcode::Jump,
        Opcode::JumpIfNotNextIsEmpty,
        Opcode::JumpIfNotNextIsNotEmpty,
        Opcode::JumpIfNotNextIsWall,
        Opcode::JumpIfNotNextIsNotWall,
        Opcode::JumpIfNotNextIsFriend,
        Opcode::JumpIfNotNextIsNotFriend,
        Opcode::JumpIfNotNextIsEnemy,
        Opcode::JumpIfNotNextIsNotEnemy,
        Opcode::JumpIfNotRandom,
        Opcode::JumpIfNotTrue,
    ];

    /// Names a BL program may CALL without defining them.
    pub const PRIMITIVE_NAMES: [&'static str; 5] =
        ["move", "turnleft", "turnright", "infect", "skip"];

    pub fn byte_code(self) -> u32 {
        self as u32
    }

    pub fn from_byte_code(code: u32) -> Option<Opcode> {
        Self::ALL.get(code as usize).copied()
    }

    /// Look up a primitive instruction by its call name, ignoring case.
    pub fn primitive(name: &str) -> Option<Opcode> {
        match name.to_ascii_lowercase().as_str() {
            "move" => Some(Opcode::Move),
            "turnleft" => Some(Opcode::TurnLeft),
            "turnright" => Some(Opcode::TurnRight),
            "infect" => Some(Opcode::Infect),
            "skip" => Some(Opcode::Skip),
            _ => None,
        }
    }

    pub fn is_primitive_name(name: &str) -> bool {
        Self::primitive(name).is_some()
    }

    /// True for opcodes that carry a jump-target operand.
    pub fn has_operand(self) -> bool {
        self.byte_code() >= Opcode::Jump.byte_code()
    }

    /// Upper-case mnemonic, as used in listings and the serialized form.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Move => "MOVE",
            Opcode::TurnLeft => "TURNLEFT",
            Opcode::TurnRight => "TURNRIGHT",
            Opcode::Infect => "INFECT",
            Opcode::Skip => "SKIP",
            Opcode::Halt => "HALT",
            Opcode::Jump => "JUMP",
            Opcode::JumpIfNotNextIsEmpty => "JUMP_IF_NOT_NEXT_IS_EMPTY",
            Opcode::JumpIfNotNextIsNotEmpty => "JUMP_IF_NOT_NEXT_IS_NOT_EMPTY",
            Opcode::JumpIfNotNextIsWall => "JUMP_IF_NOT_NEXT_IS_WALL",
            Opcode::JumpIfNotNextIsNotWall => "JUMP_IF_NOT_NEXT_IS_NOT_WALL",
            Opcode::JumpIfNotNextIsFriend => "JUMP_IF_NOT_NEXT_IS_FRIEND",
            Opcode::JumpIfNotNextIsNotFriend => "JUMP_IF_NOT_NEXT_IS_NOT_FRIEND",
            Opcode::JumpIfNotNextIsEnemy => "JUMP_IF_NOT_NEXT_IS_ENEMY",
            Opcode::JumpIfNotNextIsNotEnemy => "JUMP_IF_NOT_NEXT_IS_NOT_ENEMY",
            Opcode::JumpIfNotRandom => "JUMP_IF_NOT_RANDOM",
            Opcode::JumpIfNotTrue => "JUMP_IF_NOT_TRUE",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_codes_match_table_order() {
        for (i, op) in Opcode::ALL.iter().enumerate() {
            assert_eq!(op.byte_code(), i as u32);
            assert_eq!(Opcode::from_byte_code(i as u32), Some(*op));
        }
        assert_eq!(Opcode::from_byte_code(17), None);
    }

    #[test]
    fn primitive_lookup_is_case_insensitive() {
        assert_eq!(Opcode::primitive("TurnLeft"), Some(Opcode::TurnLeft));
        assert_eq!(Opcode::primitive("INFECT"), Some(Opcode::Infect));
        assert_eq!(Opcode::primitive("halt"), None);
        assert_eq!(Opcode::primitive("jump"), None);
        for name in Opcode::PRIMITIVE_NAMES {
            assert!(Opcode::is_primitive_name(name));
        }
    }

    #[test]
    fn only_jumps_have_operands() {
        assert!(!Opcode::Move.has_operand());
        assert!(!Opcode::Halt.has_operand());
        assert!(Opcode::Jump.has_operand());
        assert!(Opcode::JumpIfNotTrue.has_operand());
    }

    #[test]
    fn serializes_as_mnemonic() {
        for op in Opcode::ALL {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op.mnemonic()));
        }
    }
}
