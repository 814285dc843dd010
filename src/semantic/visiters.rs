use crate::ast::AlternativePart;
use crate::ast::AssignStatement;
use crate::ast::Attribute;
use crate::ast::Block;
use crate::ast::ConditionStatement;
use crate::ast::ConditionalExpression;
use crate::ast::Constant;
use crate::ast::Declaration;
use crate::ast::DeclarationsList;
use crate::ast::Identifier;
use crate::ast::IfStatement;
use crate::ast::IncompleteConditionStatement;
use crate::ast::ProcedureIdentifier;
use crate::ast::Program;
use crate::ast::SignalProgram;
use crate::ast::StatementsList;
use crate::ast::VariableDeclarations;
use crate::ast::VariableIdentifier;
use crate::utils::errors::SignalResult;

pub trait AstVisitor {
    fn visit_signal_program(&mut self, node: &SignalProgram) -> SignalResult<()>;
    fn visit_program(&mut self, node: &Program) -> SignalResult<()>;
    fn visit_block(&mut self, node: &Block) -> SignalResult<()>;
    fn visit_variable_declarations(&mut self, node: &VariableDeclarations) -> SignalResult<()>;
    fn visit_declarations_list(&mut self, node: &DeclarationsList) -> SignalResult<()>;
    fn visit_declaration(&mut self, node: &Declaration) -> SignalResult<()>;
    fn visit_attribute(&mut self, node: &Attribute) -> SignalResult<()>;
    fn visit_statements_list(&mut self, node: &StatementsList) -> SignalResult<()>;
    fn visit_if_statement(&mut self, node: &IfStatement) -> SignalResult<()>;
    fn visit_condition_statement(&mut self, node: &ConditionStatement) -> SignalResult<()>;
    fn visit_incomplete_condition_statement(
        &mut self,
        node: &IncompleteConditionStatement,
    ) -> SignalResult<()>;
    fn visit_alternative_part(&mut self, node: &AlternativePart) -> SignalResult<()>;
    fn visit_assign_statement(&mut self, node: &AssignStatement) -> SignalResult<()>;
    fn visit_conditional_expression(&mut self, node: &ConditionalExpression) -> SignalResult<()>;
    fn visit_variable_identifier(&mut self, node: &VariableIdentifier) -> SignalResult<()>;
    fn visit_procedure_identifier(&mut self, node: &ProcedureIdentifier) -> SignalResult<()>;
    fn visit_identifier(&mut self, node: &Identifier) -> SignalResult<()>;
    fn visit_constant(&mut self, node: &Constant) -> SignalResult<()>;
}
