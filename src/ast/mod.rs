
// Abstract Syntax Tree definitions for the Signal compiler.
// One struct per grammar production; alternatives are enums, so every visitor
// has to handle every node kind.

mod traits;
pub use traits::{Child, Node, Terminal};

// AST node modules
mod program;
mod declarations;
mod statements;
mod expressions;
mod literals;

pub use program::{Block, ProcedureIdentifier, Program, SignalProgram};
pub use declarations::{Attribute, Declaration, DeclarationsList, VariableDeclarations};
pub use statements::{
    AlternativePart, AssignStatement, ConditionStatement, IfStatement,
    IncompleteConditionStatement, Statement, StatementsList,
};
pub use expressions::{ConditionalExpression, Expression, VariableIdentifier};
pub use literals::{Constant, Identifier};
