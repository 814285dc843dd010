use crate::ast::{Child, Node, Terminal, VariableIdentifier};
use crate::semantic::visiters::AstVisitor;
use crate::utils::errors::SignalResult;

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarations {
    pub var_kw: Terminal,
    pub declarations: Child<DeclarationsList>,
}

impl VariableDeclarations {
    pub fn new(var_kw: Terminal, declarations: Child<DeclarationsList>) -> Self {
        Self {
            var_kw,
            declarations,
        }
    }
}

impl Node for VariableDeclarations {
    const TAG: &'static str = "<variable-declarations>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        visitor.visit_variable_declarations(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationsList {
    pub declaration: Child<Declaration>,
    pub rest: Child<DeclarationsList>,
}

impl DeclarationsList {
    pub fn new(declaration: Child<Declaration>, rest: Child<DeclarationsList>) -> Self {
        Self { declaration, rest }
    }

    /// Declarations in source order, skipping holes left by syntax errors.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        let mut list = Some(self);
        std::iter::from_fn(move || {
            while let Some(current) = list {
                list = current.rest.node();
                if let Some(declaration) = current.declaration.node() {
                    return Some(declaration);
                }
            }
            None
        })
    }
}

impl Node for DeclarationsList {
    const TAG: &'static str = "<declarations-list>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        visitor.visit_declarations_list(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub variable: Child<VariableIdentifier>,
    pub colon: Terminal,
    pub attribute: Child<Attribute>,
    pub semicolon: Terminal,
}

impl Declaration {
    pub fn new(
        variable: Child<VariableIdentifier>,
        colon: Terminal,
        attribute: Child<Attribute>,
        semicolon: Terminal,
    ) -> Self {
        Self {
            variable,
            colon,
            attribute,
            semicolon,
        }
    }
}

impl Node for Declaration {
    const TAG: &'static str = "<declaration>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        visitor.visit_declaration(self)
    }
}

/// `INTEGER` or `FLOAT`, stored as the keyword code.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub type_code: u32,
}

impl Attribute {
    pub fn new(type_code: u32) -> Self {
        Self { type_code }
    }
}

impl Node for Attribute {
    const TAG: &'static str = "<attribute>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        visitor.visit_attribute(self)
    }
}
