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
use crate::ast::Terminal;
use crate::ast::VariableDeclarations;
use crate::ast::VariableIdentifier;
use crate::semantic::symboltable::SymbolTables;
use crate::semantic::visiters::AstVisitor;
use crate::utils::config::codes;
use crate::utils::errors::SignalResult;
use crate::utils::string_utils::write_line;

const INDENT: &str = "-";
pub const EMPTY_MARKER: &str = "<empty>";
pub const MISSING_NODE_MARKER: &str = "<error-nullptr>";
pub const MISSING_SYMBOL_MARKER: &str = "<error-symbol>";

/// Renders the tree one line per node and per attribute, nesting children one level
/// deeper. Attributes are `code text`, with the text taken from the symbol tables.
pub struct PrintVisitor<'a> {
    tables: &'a SymbolTables,
    output: String,
    depth: usize,
}

impl<'a> PrintVisitor<'a> {
    pub fn new(tables: &'a SymbolTables) -> Self {
        Self {
            tables,
            output: String::new(),
            depth: 0,
        }
    }

    pub fn print(mut self, root: &SignalProgram) -> SignalResult<String> {
        root.accept(&mut self)?;
        Ok(self.output)
    }

    fn line(&mut self, text: &str) -> SignalResult<()> {
        write_line(
            &mut self.output,
            format_args!("{}{}", INDENT.repeat(self.depth), text),
        )
    }

    fn start_node(&mut self, tag: &str) -> SignalResult<()> {
        self.depth += 1;
        self.line(tag)
    }

    fn end_node(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn attribute(&mut self, text: &str) -> SignalResult<()> {
        self.depth += 1;
        let result = self.line(text);
        self.depth -= 1;
        result
    }

    fn terminal(&mut self, terminal: Terminal) -> SignalResult<()> {
        let text = match terminal {
            None => MISSING_SYMBOL_MARKER.to_string(),
            Some(code) if code < codes::DELIMITER_BASE => match char::from_u32(code) {
                Some(ch) => format!("{} {}", code, ch),
                None => code.to_string(),
            },
            Some(code) => match self.tables.keyword_text(code) {
                Some(text) => format!("{} {}", code, text),
                None => code.to_string(),
            },
        };
        self.attribute(&text)
    }

    fn child<T: Node>(&mut self, child: &Child<T>) -> SignalResult<()> {
        match child {
            Child::Present(node) => node.accept(self),
            Child::Empty => {
                self.start_node(T::TAG)?;
                self.attribute(EMPTY_MARKER)?;
                self.end_node();
                Ok(())
            }
            Child::Missing => self.attribute(MISSING_NODE_MARKER),
        }
    }
}

impl AstVisitor for PrintVisitor<'_> {
    fn visit_signal_program(&mut self, node: &SignalProgram) -> SignalResult<()> {
        self.line(SignalProgram::TAG)?;
        self.child(&node.program)
    }

    fn visit_program(&mut self, node: &Program) -> SignalResult<()> {
        self.start_node(Program::TAG)?;
        self.terminal(node.program_kw)?;
        self.child(&node.procedure_identifier)?;
        self.terminal(node.semicolon)?;
        self.child(&node.block)?;
        self.terminal(node.dot)?;
        self.end_node();
        Ok(())
    }

    fn visit_block(&mut self, node: &Block) -> SignalResult<()> {
        self.start_node(Block::TAG)?;
        self.child(&node.variable_declarations)?;
        self.terminal(node.begin)?;
        self.child(&node.statements)?;
        self.terminal(node.end)?;
        self.end_node();
        Ok(())
    }

    fn visit_variable_declarations(&mut self, node: &VariableDeclarations) -> SignalResult<()> {
        self.start_node(VariableDeclarations::TAG)?;
        self.terminal(node.var_kw)?;
        self.child(&node.declarations)?;
        self.end_node();
        Ok(())
    }

    fn visit_declarations_list(&mut self, node: &DeclarationsList) -> SignalResult<()> {
        self.start_node(DeclarationsList::TAG)?;
        self.child(&node.declaration)?;
        self.child(&node.rest)?;
        self.end_node();
        Ok(())
    }

    fn visit_declaration(&mut self, node: &Declaration) -> SignalResult<()> {
        self.start_node(Declaration::TAG)?;
        self.child(&node.variable)?;
        self.terminal(node.colon)?;
        self.child(&node.attribute)?;
        self.terminal(node.semicolon)?;
        self.end_node();
        Ok(())
    }

    fn visit_attribute(&mut self, node: &Attribute) -> SignalResult<()> {
        self.start_node(Attribute::TAG)?;
        self.terminal(Some(node.type_code))?;
        self.end_node();
        Ok(())
    }

    fn visit_statements_list(&mut self, node: &StatementsList) -> SignalResult<()> {
        self.start_node(StatementsList::TAG)?;
        self.child(&node.statement)?;
        self.child(&node.rest)?;
        self.end_node();
        Ok(())
    }

    fn visit_if_statement(&mut self, node: &IfStatement) -> SignalResult<()> {
        self.start_node(IfStatement::TAG)?;
        self.child(&node.condition)?;
        self.terminal(node.endif)?;
        self.terminal(node.semicolon)?;
        self.end_node();
        Ok(())
    }

    fn visit_condition_statement(&mut self, node: &ConditionStatement) -> SignalResult<()> {
        self.start_node(ConditionStatement::TAG)?;
        self.child(&node.incomplete)?;
        self.child(&node.alternative)?;
        self.end_node();
        Ok(())
    }

    fn visit_incomplete_condition_statement(
        &mut self,
        node: &IncompleteConditionStatement,
    ) -> SignalResult<()> {
        self.start_node(IncompleteConditionStatement::TAG)?;
        self.terminal(node.if_kw)?;
        self.child(&node.condition)?;
        self.terminal(node.then_kw)?;
        self.child(&node.statements)?;
        self.end_node();
        Ok(())
    }

    fn visit_alternative_part(&mut self, node: &AlternativePart) -> SignalResult<()> {
        self.start_node(AlternativePart::TAG)?;
        self.terminal(node.else_kw)?;
        self.child(&node.statements)?;
        self.end_node();
        Ok(())
    }

    fn visit_assign_statement(&mut self, node: &AssignStatement) -> SignalResult<()> {
        self.start_node(AssignStatement::TAG)?;
        self.child(&node.variable)?;
        self.terminal(node.assign)?;
        self.child(&node.expression)?;
        self.terminal(node.semicolon)?;
        self.end_node();
        Ok(())
    }

    fn visit_conditional_expression(&mut self, node: &ConditionalExpression) -> SignalResult<()> {
        self.start_node(ConditionalExpression::TAG)?;
        self.child(&node.left)?;
        self.terminal(node.equal)?;
        self.child(&node.right)?;
        self.end_node();
        Ok(())
    }

    fn visit_variable_identifier(&mut self, node: &VariableIdentifier) -> SignalResult<()> {
        self.start_node(VariableIdentifier::TAG)?;
        node.identifier.accept(self)?;
        self.end_node();
        Ok(())
    }

    fn visit_procedure_identifier(&mut self, node: &ProcedureIdentifier) -> SignalResult<()> {
        self.start_node(ProcedureIdentifier::TAG)?;
        node.identifier.accept(self)?;
        self.end_node();
        Ok(())
    }

    fn visit_identifier(&mut self, node: &Identifier) -> SignalResult<()> {
        self.start_node(Identifier::TAG)?;
        let name = self
            .tables
            .identifier_name(node.code)
            .unwrap_or(&node.token.lexeme)
            .to_string();
        self.attribute(&format!("{} {}", node.code, name))?;
        self.end_node();
        Ok(())
    }

    fn visit_constant(&mut self, node: &Constant) -> SignalResult<()> {
        self.start_node(Constant::TAG)?;
        let text = self
            .tables
            .constant_text(node.code)
            .unwrap_or(&node.token.lexeme)
            .to_string();
        self.attribute(&format!("{} {}", node.code, text))?;
        self.end_node();
        Ok(())
    }
}

/// Renders `root` using `tables` for the reverse lookups.
pub fn print_ast(root: &SignalProgram, tables: &SymbolTables) -> SignalResult<String> {
    PrintVisitor::new(tables).print(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::token::Token;

    #[test]
    fn test_empty_program_prints_placeholder() -> SignalResult<()> {
        let tables = SymbolTables::new();
        let output = print_ast(&SignalProgram::new(Child::Empty), &tables)?;
        assert_eq!(output, "<signal-program>\n-<program>\n--<empty>\n");
        Ok(())
    }

    #[test]
    fn test_missing_program_prints_error_marker() -> SignalResult<()> {
        let tables = SymbolTables::new();
        let output = print_ast(&SignalProgram::new(Child::Missing), &tables)?;
        assert_eq!(output, "<signal-program>\n-<error-nullptr>\n");
        Ok(())
    }

    #[test]
    fn test_terminals_render_code_and_text() -> SignalResult<()> {
        let mut tables = SymbolTables::new();
        let code = tables.identifiers.intern("p");
        tables.seal();

        let program = Program::new(
            Some(codes::PROGRAM),
            Child::present(ProcedureIdentifier::new(Identifier::new(Token::new(
                1, 9, code, "p",
            )))),
            None,
            Child::Missing,
            Some(codes::DOT),
        );
        let output = print_ast(&SignalProgram::new(Child::present(program)), &tables)?;
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines,
            vec![
                "<signal-program>",
                "-<program>",
                "--402 PROGRAM",
                "--<procedure-identifier>",
                "---<identifier>",
                "----1001 p",
                "--<error-symbol>",
                "--<error-nullptr>",
                "--46 .",
            ]
        );
        Ok(())
    }
}
