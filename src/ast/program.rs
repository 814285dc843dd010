use crate::ast::{Child, Identifier, Node, StatementsList, Terminal, VariableDeclarations};
use crate::semantic::visiters::AstVisitor;
use crate::utils::errors::SignalResult;

/// Root of the tree. `program` is `Empty` only for a source with no tokens at all.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalProgram {
    pub program: Child<Program>,
}

impl SignalProgram {
    pub fn new(program: Child<Program>) -> Self {
        Self { program }
    }
}

impl Node for SignalProgram {
    const TAG: &'static str = "<signal-program>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        visitor.visit_signal_program(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub program_kw: Terminal,
    pub procedure_identifier: Child<ProcedureIdentifier>,
    pub semicolon: Terminal,
    pub block: Child<Block>,
    pub dot: Terminal,
}

impl Program {
    pub fn new(
        program_kw: Terminal,
        procedure_identifier: Child<ProcedureIdentifier>,
        semicolon: Terminal,
        block: Child<Block>,
        dot: Terminal,
    ) -> Self {
        Self {
            program_kw,
            procedure_identifier,
            semicolon,
            block,
            dot,
        }
    }
}

impl Node for Program {
    const TAG: &'static str = "<program>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        visitor.visit_program(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub variable_declarations: Child<VariableDeclarations>,
    pub begin: Terminal,
    pub statements: Child<StatementsList>,
    pub end: Terminal,
}

impl Block {
    pub fn new(
        variable_declarations: Child<VariableDeclarations>,
        begin: Terminal,
        statements: Child<StatementsList>,
        end: Terminal,
    ) -> Self {
        Self {
            variable_declarations,
            begin,
            statements,
            end,
        }
    }
}

impl Node for Block {
    const TAG: &'static str = "<block>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        visitor.visit_block(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureIdentifier {
    pub identifier: Identifier,
}

impl ProcedureIdentifier {
    pub fn new(identifier: Identifier) -> Self {
        Self { identifier }
    }

    pub fn name(&self) -> &str {
        &self.identifier.token.lexeme
    }
}

impl Node for ProcedureIdentifier {
    const TAG: &'static str = "<procedure-identifier>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        visitor.visit_procedure_identifier(self)
    }
}
