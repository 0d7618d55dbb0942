use std::fmt::Display;

use crate::error::{CountingError, Result};

/// A single signed variable `x{index}` or `~x{index}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Literal {
    pub index: usize,
    pub negated: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conjunction {
    literals: Vec<Literal>,
}

impl Conjunction {
    fn satisfied_by(&self, assignment: usize) -> bool {
        self.literals
            .iter()
            .all(|literal| (assignment >> literal.index) & 1 == usize::from(!literal.negated))
    }
}

/// A boolean formula in disjunctive normal form over `x0..x(m-1)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formula {
    conjunctions: Vec<Conjunction>,
    num_of_literals: usize,
}

impl Formula {
    /// Synthesizes the DNF of a truth table given as a `'0'`/`'1'` string of
    /// length `2^m`. Row `i` of the table becomes a conjunction fixing every
    /// literal to the bit pattern of `i` (bit 0 = least significant).
    pub fn from_bit_string(bit_string: &str) -> Result<Self> {
        let len = bit_string.len();
        if len <= 1 {
            return Err(CountingError::InvalidInput(
                "bit string must have at least 2 elements".into(),
            ));
        }
        if !len.is_power_of_two() {
            return Err(CountingError::InvalidInput(format!(
                "bit string length {len} is not a power of 2"
            )));
        }
        if let Some(c) = bit_string.chars().find(|c| *c != '0' && *c != '1') {
            return Err(CountingError::InvalidInput(format!(
                "bit string may only contain '0' or '1', found {c:?}"
            )));
        }

        let num_of_literals = len.ilog2() as usize;
        let mut conjunctions = Vec::new();
        for (index, bit) in bit_string.chars().enumerate() {
            if bit == '0' {
                continue;
            }
            let literals = (0..num_of_literals)
                .map(|k| Literal {
                    index: k,
                    negated: (index >> k) & 1 == 0,
                })
                .collect();
            conjunctions.push(Conjunction { literals });
        }

        // An all-zero table must still produce a formula, so emit an explicit
        // contradiction instead of an empty disjunction.
        if conjunctions.is_empty() {
            let mut literals = vec![Literal {
                index: 0,
                negated: true,
            }];
            literals.extend((0..num_of_literals).map(|k| Literal {
                index: k,
                negated: false,
            }));
            conjunctions.push(Conjunction { literals });
        }

        Ok(Self {
            conjunctions,
            num_of_literals,
        })
    }

    pub fn num_of_literals(&self) -> usize {
        self.num_of_literals
    }

    /// Evaluates the formula against the assignment encoded in `assignment`,
    /// where bit `k` is the value of `x{k}`.
    pub fn evaluate(&self, assignment: usize) -> bool {
        self.conjunctions
            .iter()
            .any(|conjunction| conjunction.satisfied_by(assignment))
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, conjunction) in self.conjunctions.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "(")?;
            for (j, literal) in conjunction.literals.iter().enumerate() {
                if j > 0 {
                    write!(f, " & ")?;
                }
                if literal.negated {
                    write!(f, "~")?;
                }
                write!(f, "x{}", literal.index)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trip(bit_string: &str) {
        let formula = Formula::from_bit_string(bit_string).unwrap();
        for (i, bit) in bit_string.chars().enumerate() {
            assert_eq!(
                formula.evaluate(i),
                bit == '1',
                "mismatch at index {i} for {bit_string}"
            );
        }
    }

    #[test]
    fn test_round_trip() {
        assert_round_trip("10");
        assert_round_trip("01");
        assert_round_trip("1100");
        assert_round_trip("0110");
        assert_round_trip("11000001");
        assert_round_trip("1100000010001001");
    }

    #[test]
    fn test_all_zeros_is_unsatisfiable() {
        for m in 1..=4 {
            let bit_string = "0".repeat(1 << m);
            let formula = Formula::from_bit_string(&bit_string).unwrap();
            assert_eq!(formula.num_of_literals(), m);
            for assignment in 0..(1usize << m) {
                assert!(!formula.evaluate(assignment));
            }
        }
    }

    #[test]
    fn test_all_ones_is_a_tautology() {
        for m in 1..=4 {
            let bit_string = "1".repeat(1 << m);
            let formula = Formula::from_bit_string(&bit_string).unwrap();
            for assignment in 0..(1usize << m) {
                assert!(formula.evaluate(assignment));
            }
        }
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(matches!(
            Formula::from_bit_string(""),
            Err(CountingError::InvalidInput(_))
        ));
        assert!(matches!(
            Formula::from_bit_string("1"),
            Err(CountingError::InvalidInput(_))
        ));
        assert!(matches!(
            Formula::from_bit_string("110"),
            Err(CountingError::InvalidInput(_))
        ));
        assert!(matches!(
            Formula::from_bit_string("10x0"),
            Err(CountingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_display_matches_dnf_syntax() {
        let formula = Formula::from_bit_string("0110").unwrap();
        assert_eq!(formula.to_string(), "(x0 & ~x1) | (~x0 & x1)");

        let contradiction = Formula::from_bit_string("00").unwrap();
        assert_eq!(contradiction.to_string(), "(~x0 & x0)");
    }
}
