use crate::ast::{Child, ConditionalExpression, Expression, Node, Terminal, VariableIdentifier};
use crate::semantic::visiters::AstVisitor;
use crate::utils::errors::SignalResult;

#[derive(Debug, Clone, PartialEq)]
pub struct StatementsList {
    pub statement: Child<Statement>,
    pub rest: Child<StatementsList>,
}

impl StatementsList {
    pub fn new(statement: Child<Statement>, rest: Child<StatementsList>) -> Self {
        Self { statement, rest }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        let mut list = Some(self);
        std::iter::from_fn(move || {
            while let Some(current) = list {
                list = current.rest.node();
                if let Some(statement) = current.statement.node() {
                    return Some(statement);
                }
            }
            None
        })
    }
}

impl Node for StatementsList {
    const TAG: &'static str = "<statements-list>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        visitor.visit_statements_list(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    If(IfStatement),
    Assign(AssignStatement),
}

impl Node for Statement {
    const TAG: &'static str = "<statement>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        match self {
            Statement::If(stmt) => stmt.accept(visitor),
            Statement::Assign(stmt) => stmt.accept(visitor),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Child<ConditionStatement>,
    pub endif: Terminal,
    pub semicolon: Terminal,
}

impl IfStatement {
    pub fn new(condition: Child<ConditionStatement>, endif: Terminal, semicolon: Terminal) -> Self {
        Self {
            condition,
            endif,
            semicolon,
        }
    }
}

impl Node for IfStatement {
    const TAG: &'static str = "<if-statement>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        visitor.visit_if_statement(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionStatement {
    pub incomplete: Child<IncompleteConditionStatement>,
    pub alternative: Child<AlternativePart>,
}

impl ConditionStatement {
    pub fn new(
        incomplete: Child<IncompleteConditionStatement>,
        alternative: Child<AlternativePart>,
    ) -> Self {
        Self {
            incomplete,
            alternative,
        }
    }
}

impl Node for ConditionStatement {
    const TAG: &'static str = "<condition-statement>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        visitor.visit_condition_statement(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncompleteConditionStatement {
    pub if_kw: Terminal,
    pub condition: Child<ConditionalExpression>,
    pub then_kw: Terminal,
    pub statements: Child<StatementsList>,
}

impl IncompleteConditionStatement {
    pub fn new(
        if_kw: Terminal,
        condition: Child<ConditionalExpression>,
        then_kw: Terminal,
        statements: Child<StatementsList>,
    ) -> Self {
        Self {
            if_kw,
            condition,
            then_kw,
            statements,
        }
    }
}

impl Node for IncompleteConditionStatement {
    const TAG: &'static str = "<incomplete-condition-statement>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        visitor.visit_incomplete_condition_statement(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlternativePart {
    pub else_kw: Terminal,
    pub statements: Child<StatementsList>,
}

impl AlternativePart {
    pub fn new(else_kw: Terminal, statements: Child<StatementsList>) -> Self {
        Self {
            else_kw,
            statements,
        }
    }
}

impl Node for AlternativePart {
    const TAG: &'static str = "<alternative-part>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        visitor.visit_alternative_part(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStatement {
    pub variable: Child<VariableIdentifier>,
    pub assign: Terminal,
    pub expression: Child<Expression>,
    pub semicolon: Terminal,
}

impl AssignStatement {
    pub fn new(
        variable: Child<VariableIdentifier>,
        assign: Terminal,
        expression: Child<Expression>,
        semicolon: Terminal,
    ) -> Self {
        Self {
            variable,
            assign,
            expression,
            semicolon,
        }
    }
}

impl Node for AssignStatement {
    const TAG: &'static str = "<assign-statement>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        visitor.visit_assign_statement(self)
    }
}
