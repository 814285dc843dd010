pub mod code_emitter;
pub mod expression_handlers;
pub mod statement_handlers;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::{debug, trace};

use crate::ast::AlternativePart;
use crate::ast::AssignStatement;
use crate::ast::Attribute;
use crate::ast::Block;
use crate::ast::Child;
use crate::ast::ConditionStatement;
use crate::ast::ConditionalExpression;
use crate::ast::Constant;
use crate::ast::Declaration;
use crate::ast::DeclarationsList;
use crate::ast::Identifier;
use crate::ast::IfStatement;
use crate::ast::IncompleteConditionStatement;
use crate::ast::Node;
use crate::ast::ProcedureIdentifier;
use crate::ast::Program;
use crate::ast::SignalProgram;
use crate::ast::StatementsList;
use crate::ast::VariableDeclarations;
use crate::ast::VariableIdentifier;
use crate::semantic::visiters::AstVisitor;
use crate::utils::config::assembly::{
    body_label, variable_symbol, CODE_SECTION, DATA_SECTION, ENTRY_PROC, LABEL_PREFIX,
    PROLOGUE, REGISTER_A, REGISTER_B,
};
use crate::utils::errors::{SignalError, SignalResult};

use code_emitter::{CodeEmitter, StringCodeEmitter};

/// Destination of the next operand load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    A,
    B,
}

impl Register {
    pub fn name(self) -> &'static str {
        match self {
            Register::A => REGISTER_A,
            Register::B => REGISTER_B,
        }
    }
}

/// One-pass MASM generator. Children missing because of syntax errors produce no code;
/// a use of an undeclared variable stops generation with an error.
pub struct Generator {
    pub(crate) data: String,
    pub(crate) code: String,
    pub(crate) listing: String,
    pub(crate) register: Register,
    pub(crate) label_counter: u32,
    pub(crate) pending_labels: Vec<(String, String)>,
    pub(crate) procedure_name: String,
    pub(crate) declared: HashSet<String>,
}

impl Generator {
    pub fn new() -> Self {
        Self {
            data: String::with_capacity(256),
            code: String::with_capacity(4096),
            listing: String::new(),
            register: Register::A,
            label_counter: 0,
            pending_labels: Vec::new(),
            procedure_name: ENTRY_PROC.to_string(),
            declared: HashSet::new(),
        }
    }

    pub fn generate(mut self, root: &SignalProgram) -> SignalResult<String> {
        debug!("generating code");
        root.accept(&mut self)?;
        Ok(self.listing)
    }

    pub(crate) fn create_label(&mut self) -> String {
        self.label_counter += 1;
        format!("{}{}", LABEL_PREFIX, self.label_counter)
    }

    pub(crate) fn code_emitter(&mut self) -> StringCodeEmitter<'_> {
        StringCodeEmitter::new(&mut self.code)
    }

    /// Assembler name of a declared variable; an undeclared one is an error at its token.
    pub(crate) fn declared_name(&self, variable: &VariableIdentifier) -> SignalResult<String> {
        let name = variable.name();
        if self.declared.contains(name) {
            Ok(variable_symbol(name))
        } else {
            Err(SignalError::undeclared(&variable.identifier.token))
        }
    }

    fn child<T: Node>(&mut self, child: &Child<T>) -> SignalResult<()> {
        match child {
            Child::Present(node) => node.accept(self),
            Child::Empty | Child::Missing => Ok(()),
        }
    }

    fn assemble_listing(&mut self) -> SignalResult<()> {
        let body = body_label(&self.procedure_name);
        let mut listing = String::with_capacity(self.data.len() + self.code.len() + 256);
        let mut out = StringCodeEmitter::new(&mut listing);

        for directive in PROLOGUE {
            out.emit_directive(directive)?;
        }
        out.emit_blank()?;
        out.emit_directive(DATA_SECTION)?;
        out.append(&self.data);
        out.emit_blank()?;
        out.emit_directive(CODE_SECTION)?;
        out.emit_directive(&format!("{} PROC", ENTRY_PROC))?;
        out.emit_jmp(&body)?;
        out.emit_label(&body)?;
        out.append(&self.code);
        out.emit_xor(REGISTER_A, REGISTER_A)?;
        out.emit_ret()?;
        out.emit_directive(&format!("{} ENDP", ENTRY_PROC))?;
        out.emit_directive(&format!("END {}", ENTRY_PROC))?;

        self.listing = listing;
        Ok(())
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl AstVisitor for Generator {
    fn visit_signal_program(&mut self, node: &SignalProgram) -> SignalResult<()> {
        self.child(&node.program)
    }

    fn visit_program(&mut self, node: &Program) -> SignalResult<()> {
        self.child(&node.procedure_identifier)?;
        self.child(&node.block)?;
        self.assemble_listing()
    }

    fn visit_block(&mut self, node: &Block) -> SignalResult<()> {
        self.child(&node.variable_declarations)?;
        self.child(&node.statements)
    }

    fn visit_variable_declarations(&mut self, node: &VariableDeclarations) -> SignalResult<()> {
        self.child(&node.declarations)
    }

    fn visit_declarations_list(&mut self, node: &DeclarationsList) -> SignalResult<()> {
        for declaration in node.iter() {
            declaration.accept(self)?;
        }
        Ok(())
    }

    fn visit_declaration(&mut self, node: &Declaration) -> SignalResult<()> {
        let Some(variable) = node.variable.node() else {
            return Ok(());
        };
        let name = variable.name().to_string();
        if self.declared.insert(name.clone()) {
            trace!("declare {}", name);
            StringCodeEmitter::new(&mut self.data).emit_var(&variable_symbol(&name))?;
        }
        Ok(())
    }

    fn visit_attribute(&mut self, _node: &Attribute) -> SignalResult<()> {
        Ok(())
    }

    fn visit_statements_list(&mut self, node: &StatementsList) -> SignalResult<()> {
        for statement in node.iter() {
            statement.accept(self)?;
        }
        Ok(())
    }

    fn visit_if_statement(&mut self, node: &IfStatement) -> SignalResult<()> {
        self.child(&node.condition)
    }

    fn visit_condition_statement(&mut self, node: &ConditionStatement) -> SignalResult<()> {
        statement_handlers::handle_condition(self, node)
    }

    fn visit_incomplete_condition_statement(
        &mut self,
        node: &IncompleteConditionStatement,
    ) -> SignalResult<()> {
        statement_handlers::handle_incomplete_condition(self, node)
    }

    fn visit_alternative_part(&mut self, node: &AlternativePart) -> SignalResult<()> {
        self.child(&node.statements)
    }

    fn visit_assign_statement(&mut self, node: &AssignStatement) -> SignalResult<()> {
        statement_handlers::handle_assign(self, node)
    }

    fn visit_conditional_expression(&mut self, node: &ConditionalExpression) -> SignalResult<()> {
        expression_handlers::handle_comparison(self, node)
    }

    fn visit_variable_identifier(&mut self, node: &VariableIdentifier) -> SignalResult<()> {
        expression_handlers::handle_variable_load(self, node)
    }

    fn visit_procedure_identifier(&mut self, node: &ProcedureIdentifier) -> SignalResult<()> {
        self.procedure_name = node.name().to_string();
        Ok(())
    }

    fn visit_identifier(&mut self, _node: &Identifier) -> SignalResult<()> {
        Ok(())
    }

    fn visit_constant(&mut self, node: &Constant) -> SignalResult<()> {
        expression_handlers::handle_constant_load(self, node)
    }
}

/// Generates the listing for `root` without touching the filesystem.
pub fn generate_listing(root: &SignalProgram) -> SignalResult<String> {
    Generator::new().generate(root)
}

/// Generates the listing for `root` into `path`. The file is created before traversal;
/// if generation fails it is removed again so no partial listing is left behind.
pub fn write_listing(root: &SignalProgram, path: &Path) -> SignalResult<String> {
    fs::File::create(path).map_err(|source| SignalError::OutputFile {
        path: path.to_path_buf(),
        source,
    })?;

    match generate_listing(root) {
        Ok(listing) => {
            fs::write(path, &listing).map_err(|source| SignalError::OutputFile {
                path: path.to_path_buf(),
                source,
            })?;
            debug!("wrote {}", path.display());
            Ok(listing)
        }
        Err(error) => {
            if let Err(remove_error) = fs::remove_file(path) {
                log::warn!("could not remove {}: {}", path.display(), remove_error);
            }
            Err(error)
        }
    }
}
