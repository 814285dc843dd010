use crate::ast::*;
use crate::semantic::visiters::AstVisitor;
use crate::utils::errors::SignalResult;

/// Counts the nodes present in a tree; placeholders for empty or missing children
/// are not counted.
#[derive(Debug, Default)]
pub struct NodeCounter {
    count: usize,
}

impl NodeCounter {
    pub fn count(root: &SignalProgram) -> usize {
        let mut counter = NodeCounter::default();
        match root.accept(&mut counter) {
            Ok(()) => counter.count,
            Err(_) => 0,
        }
    }

    fn child<T: Node>(&mut self, child: &Child<T>) -> SignalResult<()> {
        match child.node() {
            Some(node) => node.accept(self),
            None => Ok(()),
        }
    }
}

impl AstVisitor for NodeCounter {
    fn visit_signal_program(&mut self, node: &SignalProgram) -> SignalResult<()> {
        self.count += 1;
        self.child(&node.program)
    }

    fn visit_program(&mut self, node: &Program) -> SignalResult<()> {
        self.count += 1;
        self.child(&node.procedure_identifier)?;
        self.child(&node.block)
    }

    fn visit_block(&mut self, node: &Block) -> SignalResult<()> {
        self.count += 1;
        self.child(&node.variable_declarations)?;
        self.child(&node.statements)
    }

    fn visit_variable_declarations(&mut self, node: &VariableDeclarations) -> SignalResult<()> {
        self.count += 1;
        self.child(&node.declarations)
    }

    fn visit_declarations_list(&mut self, node: &DeclarationsList) -> SignalResult<()> {
        self.count += 1;
        self.child(&node.declaration)?;
        self.child(&node.rest)
    }

    fn visit_declaration(&mut self, node: &Declaration) -> SignalResult<()> {
        self.count += 1;
        self.child(&node.variable)?;
        self.child(&node.attribute)
    }

    fn visit_attribute(&mut self, _node: &Attribute) -> SignalResult<()> {
        self.count += 1;
        Ok(())
    }

    fn visit_statements_list(&mut self, node: &StatementsList) -> SignalResult<()> {
        self.count += 1;
        self.child(&node.statement)?;
        self.child(&node.rest)
    }

    fn visit_if_statement(&mut self, node: &IfStatement) -> SignalResult<()> {
        self.count += 1;
        self.child(&node.condition)
    }

    fn visit_condition_statement(&mut self, node: &ConditionStatement) -> SignalResult<()> {
        self.count += 1;
        self.child(&node.incomplete)?;
        self.child(&node.alternative)
    }

    fn visit_incomplete_condition_statement(
        &mut self,
        node: &IncompleteConditionStatement,
    ) -> SignalResult<()> {
        self.count += 1;
        self.child(&node.condition)?;
        self.child(&node.statements)
    }

    fn visit_alternative_part(&mut self, node: &AlternativePart) -> SignalResult<()> {
        self.count += 1;
        self.child(&node.statements)
    }

    fn visit_assign_statement(&mut self, node: &AssignStatement) -> SignalResult<()> {
        self.count += 1;
        self.child(&node.variable)?;
        self.child(&node.expression)
    }

    fn visit_conditional_expression(&mut self, node: &ConditionalExpression) -> SignalResult<()> {
        self.count += 1;
        self.child(&node.left)?;
        self.child(&node.right)
    }

    fn visit_variable_identifier(&mut self, node: &VariableIdentifier) -> SignalResult<()> {
        self.count += 1;
        node.identifier.accept(self)
    }

    fn visit_procedure_identifier(&mut self, node: &ProcedureIdentifier) -> SignalResult<()> {
        self.count += 1;
        node.identifier.accept(self)
    }

    fn visit_identifier(&mut self, _node: &Identifier) -> SignalResult<()> {
        self.count += 1;
        Ok(())
    }

    fn visit_constant(&mut self, _node: &Constant) -> SignalResult<()> {
        self.count += 1;
        Ok(())
    }
}
