use std::fmt;

/// The predicates a BL `IF` or `WHILE` can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    NextIsEmpty,
    NextIsNotEmpty,
    NextIsEnemy,
    NextIsNotEnemy,
    NextIsFriend,
    NextIsNotFriend,
    NextIsWall,
    NextIsNotWall,
    Random,
    True,
}

impl Condition {
    pub const ALL: [Condition; 10] = [
        Condition::NextIsEmpty,
        Condition::NextIsNotEmpty,
        Condition::NextIsEnemy,
        Condition::NextIsNotEnemy,
        Condition::NextIsFriend,
        Condition::NextIsNotFriend,
        Condition::NextIsWall,
        Condition::NextIsNotWall,
        Condition::Random,
        Condition::True,
    ];

    /// Convert a condition token such as `next-is-not-wall` by mapping
    /// hyphens to underscores and folding case, then matching the
    /// canonical name.
    pub fn from_token(token: &str) -> Option<Condition> {
        let canonical = token.replace('-', "_").to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.canonical_name() == canonical)
    }

    /// `NEXT_IS_NOT_WALL` style name.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Condition::NextIsEmpty => "NEXT_IS_EMPTY",
            Condition::NextIsNotEmpty => "NEXT_IS_NOT_EMPTY",
            Condition::NextIsEnemy => "NEXT_IS_ENEMY",
            Condition::NextIsNotEnemy => "NEXT_IS_NOT_ENEMY",
            Condition::NextIsFriend => "NEXT_IS_FRIEND",
            Condition::NextIsNotFriend => "NEXT_IS_NOT_FRIEND",
            Condition::NextIsWall => "NEXT_IS_WALL",
            Condition::NextIsNotWall => "NEXT_IS_NOT_WALL",
            Condition::Random => "RANDOM",
            Condition::True => "TRUE",
        }
    }

    /// `next-is-not-wall` style name, as written in source.
    pub fn as_token(self) -> String {
        self.canonical_name().replace('_', "-").to_ascii_lowercase()
    }

    /// The complementary condition; `RANDOM` and `TRUE` have none.
    pub fn negated(self) -> Option<Condition> {
        match self {
            Condition::NextIsEmpty => Some(Condition::NextIsNotEmpty),
            Condition::NextIsNotEmpty => Some(Condition::NextIsEmpty),
            Condition::NextIsEnemy => Some(Condition::NextIsNotEnemy),
            Condition::NextIsNotEnemy => Some(Condition::NextIsEnemy),
            Condition::NextIsFriend => Some(Condition::NextIsNotFriend),
            Condition::NextIsNotFriend => Some(Condition::NextIsFriend),
            Condition::NextIsWall => Some(Condition::NextIsNotWall),
            Condition::NextIsNotWall => Some(Condition::NextIsWall),
            Condition::Random | Condition::True => None,
        }
    }

    pub fn is_negative(self) -> bool {
        matches!(
            self,
            Condition::NextIsNotEmpty
                | Condition::NextIsNotEnemy
                | Condition::NextIsNotFriend
                | Condition::NextIsNotWall
        )
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::is_condition;

    #[test]
    fn every_condition_token_normalizes() {
        let expected = [
            ("next-is-empty", Condition::NextIsEmpty),
            ("next-is-not-empty", Condition::NextIsNotEmpty),
            ("next-is-enemy", Condition::NextIsEnemy),
            ("next-is-not-enemy", Condition::NextIsNotEnemy),
            ("next-is-friend", Condition::NextIsFriend),
            ("next-is-not-friend", Condition::NextIsNotFriend),
            ("next-is-wall", Condition::NextIsWall),
            ("next-is-not-wall", Condition::NextIsNotWall),
            ("random", Condition::Random),
            ("true", Condition::True),
        ];
        for (token, condition) in expected {
            assert!(is_condition(token));
            assert_eq!(Condition::from_token(token), Some(condition));
            assert_eq!(condition.as_token(), token);
        }
    }

    #[test]
    fn normalization_folds_case() {
        assert_eq!(
            Condition::from_token("Next-Is-Wall"),
            Some(Condition::NextIsWall)
        );
        assert_eq!(
            Condition::from_token("NEXT_IS_EMPTY"),
            Some(Condition::NextIsEmpty)
        );
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert_eq!(Condition::from_token("next-is-lava"), None);
        assert_eq!(Condition::from_token(""), None);
        assert_eq!(Condition::from_token("move"), None);
    }

    #[test]
    fn negation_is_an_involution() {
        for c in Condition::ALL {
            if let Some(n) = c.negated() {
                assert_eq!(n.negated(), Some(c));
                assert_ne!(c.is_negative(), n.is_negative());
            }
        }
        assert_eq!(Condition::Random.negated(), None);
        assert_eq!(Condition::True.negated(), None);
    }
}
