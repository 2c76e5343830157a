//! The closed operator table the evaluator reduces with.
//!
//! Every operator has a symbol, a priority class and a numeric function.
//! The matcher builds its patterns from this table, so adding an operator
//! here is enough to make it recognizable.

/// Precedence class of an operator, highest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Square root.
    High,
    /// Modulo, divide, multiply.
    Medium,
    /// Plus, minus.
    Low,
}

impl Priority {
    /// All priority classes in the order their passes run.
    pub const PASSES: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Operators belonging to this class.
    pub fn operators(self) -> impl Iterator<Item = Operator> {
        Operator::ALL
            .into_iter()
            .filter(move |op| op.priority() == self)
    }
}

/// Numeric function carried by an operator, tagged by arity.
#[derive(Clone, Copy, Debug)]
pub enum Function {
    /// Prefix operator taking one operand.
    Unary(fn(f64) -> f64),
    /// Infix operator taking a left and a right operand.
    Binary(fn(f64, f64) -> f64),
}

impl Function {
    /// Number of operands the function consumes.
    pub fn arity(&self) -> usize {
        match self {
            Self::Unary(_) => 1,
            Self::Binary(_) => 2,
        }
    }
}

/// An operator the evaluator knows how to reduce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    SquareRoot,
    Modulo,
    Divide,
    Multiply,
    Plus,
    Minus,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::SquareRoot,
        Operator::Modulo,
        Operator::Divide,
        Operator::Multiply,
        Operator::Plus,
        Operator::Minus,
    ];

    /// The character this operator is written as.
    pub fn symbol(self) -> char {
        match self {
            Self::SquareRoot => '√',
            Self::Modulo => '%',
            Self::Divide => '/',
            Self::Multiply => '*',
            Self::Plus => '+',
            Self::Minus => '-',
        }
    }

    /// Look up an operator by its symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    pub fn priority(self) -> Priority {
        match self {
            Self::SquareRoot => Priority::High,
            Self::Modulo | Self::Divide | Self::Multiply => Priority::Medium,
            Self::Plus | Self::Minus => Priority::Low,
        }
    }

    pub fn function(self) -> Function {
        match self {
            Self::SquareRoot => Function::Unary(f64::sqrt),
            Self::Modulo => Function::Binary(|a, b| a % b),
            Self::Divide => Function::Binary(|a, b| a / b),
            Self::Multiply => Function::Binary(|a, b| a * b),
            Self::Plus => Function::Binary(|a, b| a + b),
            Self::Minus => Function::Binary(|a, b| a - b),
        }
    }
}

/// Check whether a character is a known operator symbol.
pub fn is_operator_symbol(c: char) -> bool {
    Operator::from_symbol(c).is_some()
}
