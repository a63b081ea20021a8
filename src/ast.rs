use crate::grammar::Feature;

/// Represents a literal value written directly in a snippet.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Real(f64),
    /// A string literal with escapes already decoded.
    Str(String),
    /// A boolean literal value: `True` or `False`.
    Bool(bool),
    /// `None`.
    None,
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// A builtin function a snippet may call.
///
/// The set is closed: calling any other name makes the line unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `len(x)`
    Len,
    /// `sum(x)`
    Sum,
    /// `max(x)` / `max(a, b, ...)`
    Max,
    /// `min(x)` / `min(a, b, ...)`
    Min,
    /// `sorted(x, reverse=...)`
    Sorted,
    /// `str(x)`
    Str,
    /// `int(x)`
    Int,
    /// `float(x)`
    Float,
    /// `abs(x)`
    Abs,
    /// `round(x[, digits])`
    Round,
}

impl Builtin {
    /// Looks up a builtin by its Python name.
    ///
    /// ```
    /// use pysnip::ast::Builtin;
    ///
    /// assert_eq!(Builtin::from_name("sorted"), Some(Builtin::Sorted));
    /// assert_eq!(Builtin::from_name("input"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let builtin = match name {
            "len" => Self::Len,
            "sum" => Self::Sum,
            "max" => Self::Max,
            "min" => Self::Min,
            "sorted" => Self::Sorted,
            "str" => Self::Str,
            "int" => Self::Int,
            "float" => Self::Float,
            "abs" => Self::Abs,
            "round" => Self::Round,
            _ => return None,
        };
        Some(builtin)
    }

    /// The Python name of the builtin.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Len => "len",
            Self::Sum => "sum",
            Self::Max => "max",
            Self::Min => "min",
            Self::Sorted => "sorted",
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::Abs => "abs",
            Self::Round => "round",
        }
    }

    /// The grammar feature a call to this builtin needs.
    #[must_use]
    pub const fn feature(self) -> Feature {
        match self {
            Self::Len => Feature::Len,
            Self::Sum => Feature::Sum,
            Self::Max | Self::Min => Feature::MinMax,
            Self::Sorted => Feature::Sorted,
            Self::Str | Self::Int | Self::Float | Self::Abs | Self::Round => Feature::Conversion,
        }
    }
}

/// A list method a snippet may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMethod {
    /// `x.append(v)`
    Append,
    /// `x.remove(v)`
    Remove,
    /// `x.pop([i])`
    Pop,
    /// `x.insert(i, v)`
    Insert,
    /// `x.sort(reverse=...)`
    Sort,
    /// `x.extend(other)`
    Extend,
    /// `x.count(v)`
    Count,
    /// `x.index(v)`
    Index,
    /// `x.reverse()`
    Reverse,
    /// `x.clear()`
    Clear,
}

impl ListMethod {
    /// Looks up a list method by its Python name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let method = match name {
            "append" => Self::Append,
            "remove" => Self::Remove,
            "pop" => Self::Pop,
            "insert" => Self::Insert,
            "sort" => Self::Sort,
            "extend" => Self::Extend,
            "count" => Self::Count,
            "index" => Self::Index,
            "reverse" => Self::Reverse,
            "clear" => Self::Clear,
            _ => return None,
        };
        Some(method)
    }

    /// The Python name of the method.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Remove => "remove",
            Self::Pop => "pop",
            Self::Insert => "insert",
            Self::Sort => "sort",
            Self::Extend => "extend",
            Self::Count => "count",
            Self::Index => "index",
            Self::Reverse => "reverse",
            Self::Clear => "clear",
        }
    }

    /// Whether the method changes the list it is called on.
    #[must_use]
    pub const fn mutates(self) -> bool {
        !matches!(self, Self::Count | Self::Index)
    }

    /// The grammar feature a call to this method needs.
    #[must_use]
    pub const fn feature(self) -> Feature {
        match self {
            Self::Append => Feature::Append,
            Self::Remove => Feature::Remove,
            Self::Pop => Feature::Pop,
            Self::Insert => Feature::Insert,
            Self::Sort => Feature::Sort,
            Self::Extend => Feature::Extend,
            Self::Count => Feature::Count,
            Self::Index => Feature::IndexOf,
            Self::Reverse => Feature::Reverse,
            Self::Clear => Feature::Clear,
        }
    }
}

/// Arguments of a call: positional expressions plus `name=value` keywords.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallArgs {
    /// Positional arguments in source order.
    pub positional: Vec<Expr>,
    /// Keyword arguments in source order.
    pub keywords:   Vec<(String, Expr)>,
}

impl CallArgs {
    /// Finds a keyword argument by name.
    #[must_use]
    pub fn keyword(&self, name: &str) -> Option<&Expr> {
        self.keywords
            .iter()
            .find_map(|(key, value)| (key == name).then_some(value))
    }

    fn exprs(&self) -> impl Iterator<Item = &Expr> {
        self.positional
            .iter()
            .chain(self.keywords.iter().map(|(_, value)| value))
    }
}

/// One piece of an f-string.
#[derive(Debug, Clone, PartialEq)]
pub enum FStringPart {
    /// Literal text, with `{{` and `}}` already collapsed.
    Text(String),
    /// A `{expr}` or `{expr:spec}` placeholder.
    Placeholder {
        /// The interpolated expression.
        expr:      Expr,
        /// Fixed decimal places requested by a `:.Nf` spec.
        precision: Option<usize>,
    },
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Each variant models one construct of the supported Python subset and
/// carries the line it was written on.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// A list literal, `[a, b, c]`.
    List {
        /// Elements of the list.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// An f-string, `f"... {expr} ..."`.
    FString {
        /// Text and placeholders in order.
        parts: Vec<FStringPart>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Arithmetic negation, `-x`.
    Negate {
        /// The operand.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A builtin function call, e.g. `len(x)`.
    Call {
        /// The called builtin.
        builtin:   Builtin,
        /// The call arguments.
        arguments: CallArgs,
        /// Line number in the source code.
        line:      usize,
    },
    /// A list method call, e.g. `x.pop()`.
    MethodCall {
        /// The receiver.
        target:    Box<Self>,
        /// The called method.
        method:    ListMethod,
        /// The call arguments.
        arguments: CallArgs,
        /// Line number in the source code.
        line:      usize,
    },
    /// Indexing, `x[i]`.
    Index {
        /// The indexed sequence.
        target: Box<Self>,
        /// The index.
        index:  Box<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// Slicing, `x[a:b]`.
    Slice {
        /// The sliced sequence.
        target: Box<Self>,
        /// Inclusive start, defaulting to the beginning.
        start:  Option<Box<Self>>,
        /// Exclusive end, defaulting to the end.
        end:    Option<Box<Self>>,
        /// Line number in the source code.
        line:   usize,
    },
}

impl Expr {
    /// Appends every grammar feature this expression relies on.
    pub fn collect_features(&self, out: &mut Vec<Feature>) {
        match self {
            Self::Literal { .. } | Self::Variable { .. } => {},
            Self::List { elements, .. } => {
                out.push(Feature::ListLiteral);
                elements.iter().for_each(|e| e.collect_features(out));
            },
            Self::FString { parts, .. } => {
                out.push(Feature::FString);
                for part in parts {
                    if let FStringPart::Placeholder { expr, .. } = part {
                        expr.collect_features(out);
                    }
                }
            },
            Self::Negate { expr, .. } => expr.collect_features(out),
            Self::BinaryOp { left, op, right, .. } => {
                out.push(op.feature());
                left.collect_features(out);
                right.collect_features(out);
            },
            Self::Call { builtin, arguments, .. } => {
                out.push(builtin.feature());
                arguments.exprs().for_each(|e| e.collect_features(out));
            },
            Self::MethodCall { target,
                               method,
                               arguments,
                               .. } => {
                out.push(method.feature());
                target.collect_features(out);
                arguments.exprs().for_each(|e| e.collect_features(out));
            },
            Self::Index { target, index, .. } => {
                out.push(Feature::Indexing);
                target.collect_features(out);
                index.collect_features(out);
            },
            Self::Slice { target, start, end, .. } => {
                out.push(Feature::Indexing);
                target.collect_features(out);
                start.iter().chain(end.iter()).for_each(|e| e.collect_features(out));
            },
        }
    }

    /// Whether the expression is a call, the only kind of expression allowed
    /// as a statement on its own.
    #[must_use]
    pub const fn is_call(&self) -> bool {
        matches!(self, Self::Call { .. } | Self::MethodCall { .. })
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication or repetition (`*`)
    Mul,
    /// True division (`/`)
    Div,
    /// Floor division (`//`)
    FloorDiv,
    /// Modulo (`%`)
    Mod,
}

impl BinaryOperator {
    /// The grammar feature an operation with this operator needs.
    ///
    /// `+` is taught as concatenation long before arithmetic, so it is gated
    /// separately.
    #[must_use]
    pub const fn feature(self) -> Feature {
        match self {
            Self::Add => Feature::Concat,
            Self::Sub | Self::Mul | Self::Div | Self::FloorDiv | Self::Mod => Feature::Arithmetic,
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
        };
        write!(f, "{operator}")
    }
}

/// A `def` header, either a method inside a class or a top-level function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:   String,
    /// The parameter names, `self` included.
    pub params: Vec<String>,
    /// Line number in the source code.
    pub line:   usize,
}

/// Represents one recognized source line.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `name = expr`
    Assignment {
        /// The name of the variable.
        name:  String,
        /// The value which is being assigned.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `name += expr` and friends.
    CompoundAssignment {
        /// The name of the variable.
        name:  String,
        /// The operator applied to the old value and `value`.
        op:    BinaryOperator,
        /// The right-hand side.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `name[index] = expr`
    IndexAssignment {
        /// The name of the list variable.
        name:  String,
        /// The position being replaced.
        index: Expr,
        /// The new element.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `print(...)`
    Print {
        /// The printed values and an optional `sep=` keyword.
        arguments: CallArgs,
        /// Line number in the source code.
        line:      usize,
    },
    /// A call used for its effect, e.g. `fruits.append("kiwi")`.
    Expression {
        /// The call expression.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// `class Name:` or `class Name(Base):`
    ClassDef {
        /// The class name.
        name: String,
        /// The base class, if any.
        base: Option<String>,
        /// Line number in the source code.
        line: usize,
    },
    /// `def name(params):`
    FunctionDef(FunctionDef),
}

impl Statement {
    /// Lists every grammar feature the statement relies on, in the order they
    /// are met.
    ///
    /// ```
    /// use pysnip::{
    ///     grammar::Feature,
    ///     interpreter::{lexer::tokenize_line, parser::statement::parse_line},
    /// };
    ///
    /// let tokens = tokenize_line("top = max(scores)", 1).unwrap();
    /// let statement = parse_line(&tokens, 1).unwrap();
    /// assert_eq!(statement.features(), vec![Feature::Assign, Feature::MinMax]);
    /// ```
    #[must_use]
    pub fn features(&self) -> Vec<Feature> {
        let mut out = Vec::new();
        match self {
            Self::Assignment { value, .. } => {
                out.push(Feature::Assign);
                value.collect_features(&mut out);
            },
            Self::CompoundAssignment { op, value, .. } => {
                out.push(Feature::Assign);
                out.push(Feature::Arithmetic);
                out.push(op.feature());
                value.collect_features(&mut out);
            },
            Self::IndexAssignment { index, value, .. } => {
                out.push(Feature::Indexing);
                index.collect_features(&mut out);
                value.collect_features(&mut out);
            },
            Self::Print { arguments, .. } => {
                out.push(Feature::Print);
                arguments.exprs().for_each(|e| e.collect_features(&mut out));
            },
            Self::Expression { expr, .. } => expr.collect_features(&mut out),
            Self::ClassDef { .. } | Self::FunctionDef(_) => out.push(Feature::Classes),
        }
        out.dedup();
        out
    }
}
