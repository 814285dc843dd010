use crate::ast::{Child, Constant, Identifier, Node, Terminal};
use crate::semantic::visiters::AstVisitor;
use crate::utils::errors::SignalResult;

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    pub left: Child<Expression>,
    pub equal: Terminal,
    pub right: Child<Expression>,
}

impl ConditionalExpression {
    pub fn new(left: Child<Expression>, equal: Terminal, right: Child<Expression>) -> Self {
        Self { left, equal, right }
    }
}

impl Node for ConditionalExpression {
    const TAG: &'static str = "<conditional-expression>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        visitor.visit_conditional_expression(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Variable(VariableIdentifier),
    Constant(Constant),
}

impl Node for Expression {
    const TAG: &'static str = "<expression>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        match self {
            Expression::Variable(variable) => variable.accept(visitor),
            Expression::Constant(constant) => constant.accept(visitor),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableIdentifier {
    pub identifier: Identifier,
}

impl VariableIdentifier {
    pub fn new(identifier: Identifier) -> Self {
        Self { identifier }
    }

    pub fn name(&self) -> &str {
        &self.identifier.token.lexeme
    }
}

impl Node for VariableIdentifier {
    const TAG: &'static str = "<variable-identifier>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        visitor.visit_variable_identifier(self)
    }
}
