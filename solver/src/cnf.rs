use std::collections::HashSet;
use std::fmt;
use std::fmt::Write as FmtWrite;
use std::iter::FromIterator;

use dimacs::parse_dimacs;
use itertools::Itertools;

/// Type used for referencing logical variables.
/// Variables are numbered contiguously from `1` to `num_variables`.
pub type VarId = usize;

/// Representation of logical formulae in CNF form
/// (conjunction of clauses)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CNF {
    /// Vector of inner clauses
    pub clauses: Vec<CNFClause>,
    /// Number of distinct variables the formula ranges over
    pub num_variables: usize,
}

/// Representation of a clause (disjunction of literals)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CNFClause {
    /// Vector of inner literals
    pub vars: Vec<CNFVar>,
}

/// Logical literal: a variable together with its polarity
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Ord, Eq, Hash)]
pub struct CNFVar {
    /// Identifier of a variable
    pub id: VarId,
    /// Variable is negated iff `sign == false`
    pub sign: bool,
}

impl CNF {
    /// Creates an empty CNF formula over the given number of variables
    pub fn empty(num_variables: usize) -> CNF {
        CNF {
            clauses: Vec::new(),
            num_variables,
        }
    }

    /// Creates a CNF formula from a prepared clause list
    pub fn new(clauses: Vec<CNFClause>, num_variables: usize) -> CNF {
        CNF {
            clauses,
            num_variables,
        }
    }

    /// Inserts a new clause into the formula
    pub fn push(&mut self, c: CNFClause) {
        self.clauses.push(c)
    }

    /// Concatenates two formulae
    pub fn extend(&mut self, c: CNF) {
        self.clauses.extend(c.clauses)
    }

    /// Returns number of clauses in the formula
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Collects all variable identifiers that appear in the formula
    pub fn vars(&self) -> HashSet<VarId> {
        self.clauses
            .iter()
            .flat_map(|clause| clause.vars.iter().map(CNFVar::id))
            .unique()
            .collect()
    }

    /// Prints formula in DIMACS compatible form
    pub fn to_dimacs(&self) -> String {
        let mut out = String::new();

        writeln!(out, "p cnf {} {}", self.num_variables, self.clauses.len())
            .expect("writing to a string cannot fail");

        for clause in &self.clauses {
            for var in &clause.vars {
                write!(out, "{} ", var.to_i32()).expect("writing to a string cannot fail");
            }
            out.push_str("0\n");
        }
        out
    }

    /// Parse DIMACS string into CNF structure
    pub fn from_dimacs(input: &str) -> Result<CNF, String> {
        match parse_dimacs(input) {
            Ok(dimacs::Instance::Cnf { num_vars, clauses }) => Ok(CNF {
                clauses: clauses
                    .iter()
                    .map(|clause| {
                        clause
                            .lits()
                            .iter()
                            .map(|lit| CNFVar {
                                id: lit.var().to_u64() as VarId,
                                sign: lit.sign() == dimacs::Sign::Pos,
                            })
                            .collect()
                    })
                    .collect(),
                num_variables: num_vars as usize,
            }),
            Ok(_) => Err("Only CNF formulae are supported".to_string()),
            Err(_) => Err("Parse error".to_string()),
        }
    }
}

impl FromIterator<CNFVar> for CNFClause {
    fn from_iter<I: IntoIterator<Item = CNFVar>>(iter: I) -> Self {
        CNFClause {
            vars: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for CNFClause {
    type Item = CNFVar;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.into_iter()
    }
}

impl CNFClause {
    /// Creates an empty CNF clause
    pub fn new() -> CNFClause {
        CNFClause { vars: vec![] }
    }

    /// Creates a CNF clause containing a single literal
    pub fn single(var: CNFVar) -> CNFClause {
        CNFClause { vars: vec![var] }
    }

    /// Adds a single literal into the clause
    pub fn push(&mut self, v: CNFVar) {
        self.vars.push(v)
    }

    /// Concatenates two clauses
    pub fn extend(&mut self, c: CNFClause) {
        self.vars.extend(c.vars)
    }

    /// Returns number of literals in the clause
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Default for CNFClause {
    fn default() -> Self {
        CNFClause::new()
    }
}

impl CNFVar {
    /// Creates literal with given identifier and positivity
    pub fn new(id: VarId, sign: bool) -> CNFVar {
        CNFVar { id, sign }
    }

    /// Creates a positive literal with given identifier
    pub fn pos(id: VarId) -> CNFVar {
        CNFVar { id, sign: true }
    }

    /// Creates a negative literal with given identifier
    pub fn neg(id: VarId) -> CNFVar {
        CNFVar { id, sign: false }
    }

    /// Gets the identifier of a literal's variable
    pub fn id(&self) -> VarId {
        self.id
    }

    /// Checks if the literal is positive
    pub fn sign(&self) -> bool {
        self.sign
    }

    /// Converts to signed integer. The absolute value indicates
    /// the identifier and sign states for positivity.
    ///
    /// **NOTE** it is not integer-overflow friendly.
    pub fn to_i32(&self) -> i32 {
        if self.sign {
            self.id as i32
        } else {
            -(self.id as i32)
        }
    }

    /// Builds a literal from its signed-integer form. The integer must
    /// be non-zero.
    pub fn from_i32(lit: i32) -> CNFVar {
        CNFVar {
            id: lit.abs() as VarId,
            sign: lit > 0,
        }
    }
}

impl std::ops::Neg for CNFVar {
    type Output = CNFVar;

    fn neg(self) -> Self::Output {
        CNFVar {
            id: self.id,
            sign: !self.sign,
        }
    }
}

impl fmt::Display for CNF {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.clauses {
            writeln!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl fmt::Display for CNFClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.vars {
            write!(f, "({})  ", c)?;
        }
        Ok(())
    }
}

impl fmt::Display for CNFVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_i32())
    }
}
