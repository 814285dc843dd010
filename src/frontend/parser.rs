use log::{debug, trace, warn};

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
use crate::ast::Expression;
use crate::ast::Identifier;
use crate::ast::IfStatement;
use crate::ast::IncompleteConditionStatement;
use crate::ast::ProcedureIdentifier;
use crate::ast::Program;
use crate::ast::SignalProgram;
use crate::ast::Statement;
use crate::ast::StatementsList;
use crate::ast::Terminal;
use crate::ast::VariableDeclarations;
use crate::ast::VariableIdentifier;
use crate::frontend::token::Token;
use crate::utils::config::codes;
use crate::utils::errors::{Diagnostic, ErrorHandler};

/// Outcome of [`Parser::consume`]. A missing token has no position or code to read.
#[derive(Debug, Clone, PartialEq)]
pub enum Consumed {
    Matched(Token),
    Missing,
}

impl Consumed {
    pub fn code(&self) -> Terminal {
        match self {
            Consumed::Matched(token) => Some(token.code),
            Consumed::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Consumed::Missing)
    }
}

/// Recursive-descent parser over a lexed token sequence. The cursor only moves forward
/// and never past the end-of-file sentinel.
pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
    sentinel: Token,
    errors: &'a mut ErrorHandler,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], errors: &'a mut ErrorHandler) -> Self {
        let sentinel = match tokens.last() {
            Some(last) => Token::eof(last.line, last.column),
            None => Token::eof(1, 0),
        };
        Self {
            tokens,
            current: 0,
            sentinel,
            errors,
        }
    }

    /// Parses the whole token sequence. Syntax errors are recorded in the error handler;
    /// the returned tree marks the holes they left.
    pub fn parse(mut self) -> SignalProgram {
        debug!("parsing {} tokens", self.tokens.len());
        self.parse_translation_unit()
    }

    fn parse_translation_unit(&mut self) -> SignalProgram {
        if self.is_at_end() {
            warn!("empty translation unit");
            return SignalProgram::new(Child::Empty);
        }

        let program = self.parse_program();
        if let Some(node) = program.node() {
            if node.dot.is_some() && !self.is_at_end() {
                self.error_at_current("Expect end of file after '.'.");
            }
        }
        SignalProgram::new(program)
    }

    fn parse_program(&mut self) -> Child<Program> {
        trace!("program");
        let program_kw = match self.consume(
            codes::PROGRAM,
            "Expect 'PROGRAM' at the start of the translation unit.",
        ) {
            Consumed::Missing => return Child::Missing,
            matched => matched.code(),
        };

        let procedure_identifier = self.parse_procedure_identifier();
        let semicolon = if procedure_identifier.is_missing() {
            self.error_at_current("Missing program name.");
            self.synchronize();
            if self.previous_is(codes::SEMICOLON) {
                Some(codes::SEMICOLON)
            } else {
                None
            }
        } else {
            self.consume(
                codes::SEMICOLON,
                "Expect ';' at the end of program declaration.",
            )
            .code()
        };

        let block = self.parse_block();
        let dot = self
            .consume(codes::DOT, "Expect '.' at the end of the program.")
            .code();

        Child::present(Program::new(
            program_kw,
            procedure_identifier,
            semicolon,
            block,
            dot,
        ))
    }

    fn parse_procedure_identifier(&mut self) -> Child<ProcedureIdentifier> {
        if self.peek().is_identifier() {
            let token = self.advance();
            Child::present(ProcedureIdentifier::new(Identifier::new(token)))
        } else {
            Child::Missing
        }
    }

    fn parse_block(&mut self) -> Child<Block> {
        trace!("block");
        let variable_declarations = self.parse_variable_declarations();
        let begin = self
            .consume(codes::BEGIN, "Expect 'BEGIN' at the start of the block.")
            .code();
        let statements = self.parse_statements_list();
        let end = self
            .consume(codes::END, "Expect 'END' at the end of the block.")
            .code();
        Child::present(Block::new(variable_declarations, begin, statements, end))
    }

    fn parse_variable_declarations(&mut self) -> Child<VariableDeclarations> {
        if !self.match_code(codes::VAR) {
            return Child::Empty;
        }
        trace!("variable declarations");
        let declarations = self.parse_declarations_list();
        Child::present(VariableDeclarations::new(Some(codes::VAR), declarations))
    }

    fn parse_declarations_list(&mut self) -> Child<DeclarationsList> {
        if self.is_at_end() || self.at_declarations_end() {
            return Child::Empty;
        }

        let start = self.current;
        let declaration = self.parse_declaration();
        self.ensure_progress(start);
        let rest = self.parse_declarations_list();
        Child::present(DeclarationsList::new(declaration, rest))
    }

    fn parse_declaration(&mut self) -> Child<Declaration> {
        trace!("declaration at {}", self.peek());
        let variable = self.parse_variable_identifier();
        if variable.is_missing() {
            self.error_at_current("Expect variable name in declaration.");
            self.synchronize();
            return Child::Missing;
        }

        let colon = match self.consume(
            codes::COLON,
            "Expect ':' after variable name in declaration.",
        ) {
            Consumed::Missing => {
                self.synchronize();
                return Child::present(Declaration::new(variable, None, Child::Missing, None));
            }
            matched => matched.code(),
        };

        let attribute = self.parse_attribute();
        if attribute.is_missing() {
            self.synchronize_safe();
        }

        let semicolon = self
            .consume(codes::SEMICOLON, "Expect ';' after declaration.")
            .code();
        Child::present(Declaration::new(variable, colon, attribute, semicolon))
    }

    fn parse_attribute(&mut self) -> Child<Attribute> {
        if self.check(codes::INTEGER) || self.check(codes::FLOAT) {
            let token = self.advance();
            Child::present(Attribute::new(token.code))
        } else {
            self.error_at_current("Expect type 'INTEGER' or 'FLOAT' in declaration.");
            Child::Missing
        }
    }

    fn parse_statements_list(&mut self) -> Child<StatementsList> {
        if self.is_at_end() || self.at_statements_end() {
            return Child::Empty;
        }

        let start = self.current;
        let statement = self.parse_statement();
        self.ensure_progress(start);
        let rest = self.parse_statements_list();
        Child::present(StatementsList::new(statement, rest))
    }

    fn parse_statement(&mut self) -> Child<Statement> {
        trace!("statement at {}", self.peek());
        if self.check(codes::IF) {
            Child::present(Statement::If(self.parse_if_statement()))
        } else if self.peek().is_identifier() {
            Child::present(Statement::Assign(self.parse_assign_statement()))
        } else {
            self.error_at_current("Expect statement.");
            self.synchronize();
            Child::Missing
        }
    }

    fn parse_if_statement(&mut self) -> IfStatement {
        let condition = Child::present(self.parse_condition_statement());
        let endif = self.consume(codes::ENDIF, "Expect 'ENDIF' at the end of if statement.");
        let semicolon = match endif {
            Consumed::Missing => None,
            Consumed::Matched(_) => self
                .consume(codes::SEMICOLON, "Expect ';' after 'ENDIF'.")
                .code(),
        };
        IfStatement::new(condition, endif.code(), semicolon)
    }

    fn parse_condition_statement(&mut self) -> ConditionStatement {
        let incomplete = Child::present(self.parse_incomplete_condition_statement());
        let alternative = self.parse_alternative_part();
        ConditionStatement::new(incomplete, alternative)
    }

    fn parse_incomplete_condition_statement(&mut self) -> IncompleteConditionStatement {
        let if_kw = self.consume(codes::IF, "Expect 'IF'.").code();
        let condition = self.parse_conditional_expression();
        let then_kw = self
            .consume(codes::THEN, "Expect 'THEN' after condition.")
            .code();
        let statements = self.parse_statements_list();
        IncompleteConditionStatement::new(if_kw, condition, then_kw, statements)
    }

    fn parse_alternative_part(&mut self) -> Child<AlternativePart> {
        if !self.match_code(codes::ELSE) {
            return Child::Empty;
        }
        let statements = self.parse_statements_list();
        Child::present(AlternativePart::new(Some(codes::ELSE), statements))
    }

    fn parse_conditional_expression(&mut self) -> Child<ConditionalExpression> {
        let left = self.parse_expression();
        if left.is_missing() {
            self.error_at_current("Expect expression in condition.");
            self.synchronize_safe();
            return Child::Missing;
        }

        let equal = match self.consume(codes::EQUAL, "Expect '=' in condition.") {
            Consumed::Missing => {
                self.synchronize_safe();
                return Child::present(ConditionalExpression::new(left, None, Child::Missing));
            }
            matched => matched.code(),
        };

        let right = self.parse_expression();
        if right.is_missing() {
            self.error_at_current("Expect expression after '='.");
            self.synchronize_safe();
        }
        Child::present(ConditionalExpression::new(left, equal, right))
    }

    fn parse_assign_statement(&mut self) -> AssignStatement {
        let variable = self.parse_variable_identifier();
        let assign = match self.consume(
            codes::ASSIGN,
            "Expect ':=' after variable name in assignment.",
        ) {
            Consumed::Missing => {
                self.synchronize();
                return AssignStatement::new(variable, None, Child::Missing, None);
            }
            matched => matched.code(),
        };

        let expression = self.parse_expression();
        if expression.is_missing() {
            self.error_at_current("Expect expression after ':='.");
            if !self.check(codes::SEMICOLON) {
                return AssignStatement::new(variable, assign, expression, None);
            }
        }

        let semicolon = self
            .consume(codes::SEMICOLON, "Expect ';' after assignment.")
            .code();
        AssignStatement::new(variable, assign, expression, semicolon)
    }

    /// Expressions never report on their own; the caller knows the context.
    fn parse_expression(&mut self) -> Child<Expression> {
        if self.peek().is_identifier() {
            let token = self.advance();
            Child::present(Expression::Variable(VariableIdentifier::new(
                Identifier::new(token),
            )))
        } else if self.peek().is_constant() {
            let token = self.advance();
            Child::present(Expression::Constant(Constant::new(token)))
        } else {
            Child::Missing
        }
    }

    fn parse_variable_identifier(&mut self) -> Child<VariableIdentifier> {
        if self.peek().is_identifier() {
            let token = self.advance();
            Child::present(VariableIdentifier::new(Identifier::new(token)))
        } else {
            Child::Missing
        }
    }

    // cursor

    fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&self.sentinel)
    }

    fn previous(&self) -> Option<&Token> {
        self.current
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
    }

    fn previous_is(&self, code: u32) -> bool {
        self.previous().map_or(false, |token| token.code == code)
    }

    fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    fn check(&self, code: u32) -> bool {
        !self.is_at_end() && self.peek().code == code
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !token.is_eof() {
            self.current += 1;
        }
        token
    }

    fn match_code(&mut self, code: u32) -> bool {
        if self.check(code) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Advances past a token of kind `code`, or reports `message` at the current token.
    pub fn consume(&mut self, code: u32, message: &str) -> Consumed {
        if self.check(code) {
            Consumed::Matched(self.advance())
        } else {
            self.error_at_current(message);
            Consumed::Missing
        }
    }

    fn error_at_current(&mut self, message: &str) {
        let diagnostic = Diagnostic::syntax(self.peek(), message);
        self.errors.report(diagnostic);
    }

    // Tokens that close a declaration section.
    fn at_declarations_end(&self) -> bool {
        matches!(
            self.peek().code,
            codes::BEGIN | codes::END | codes::IF | codes::DOT
        )
    }

    fn at_statements_end(&self) -> bool {
        matches!(
            self.peek().code,
            codes::END | codes::ELSE | codes::ENDIF | codes::DOT
        )
    }

    /// A list element that consumed nothing drops the offending token.
    fn ensure_progress(&mut self, start: usize) {
        if self.current == start && !self.is_at_end() {
            trace!("discarding {}", self.peek());
            self.advance();
        }
    }

    /// Panic-mode recovery: discard tokens until one past a `;` consumed here, or until
    /// a token that starts a declaration or a statement.
    pub fn synchronize(&mut self) {
        let start = self.current;
        while !self.is_at_end() {
            if self.current > start && self.previous_is(codes::SEMICOLON) {
                return;
            }
            match self.peek().code {
                codes::PROGRAM | codes::VAR | codes::BEGIN | codes::END | codes::IF => return,
                _ => {}
            }
            self.advance();
        }
    }

    /// Like [`Parser::synchronize`] but also stops in front of `;` and the keywords that
    /// continue an if statement.
    pub fn synchronize_safe(&mut self) {
        while !self.is_at_end() {
            match self.peek().code {
                codes::SEMICOLON
                | codes::THEN
                | codes::ELSE
                | codes::ENDIF
                | codes::PROGRAM
                | codes::VAR
                | codes::BEGIN
                | codes::END
                | codes::IF => return,
                _ => {}
            }
            self.advance();
        }
    }

    pub fn position(&self) -> usize {
        self.current
    }
}

/// Parses a token sequence produced by the lexer.
pub fn parse(tokens: &[Token], errors: &mut ErrorHandler) -> SignalProgram {
    Parser::new(tokens, errors).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer;

    fn lexed(source: &str) -> Vec<Token> {
        let mut errors = ErrorHandler::new();
        lexer::scan(source, &mut errors).tokens
    }

    #[test]
    fn test_consume_reports_missing_token() {
        let tokens = lexed("x");
        let mut errors = ErrorHandler::new();
        let mut parser = Parser::new(&tokens, &mut errors);

        assert!(parser.consume(codes::SEMICOLON, "Expect ';'.").is_missing());
        assert_eq!(parser.position(), 0);
        assert_eq!(errors.errors()[0].message, "at 'x'; Expect ';'.");
    }

    #[test]
    fn test_consume_at_end_reports_at_end() {
        let tokens = lexed("");
        let mut errors = ErrorHandler::new();
        let mut parser = Parser::new(&tokens, &mut errors);

        let consumed = parser.consume(codes::DOT, "Expect '.'.");
        assert_eq!(consumed, Consumed::Missing);
        assert_eq!(errors.errors()[0].message, "at end; Expect '.'.");
    }

    #[test]
    fn test_synchronize_stops_after_semicolon() {
        let tokens = lexed("a b ; c");
        let mut errors = ErrorHandler::new();
        let mut parser = Parser::new(&tokens, &mut errors);

        parser.synchronize();
        assert_eq!(parser.position(), 3);
        assert_eq!(parser.peek().lexeme, "c");
    }

    #[test]
    fn test_synchronize_stops_before_keyword() {
        let tokens = lexed("a 1 BEGIN x");
        let mut errors = ErrorHandler::new();
        let mut parser = Parser::new(&tokens, &mut errors);

        parser.synchronize();
        assert_eq!(parser.peek().code, codes::BEGIN);
    }

    #[test]
    fn test_synchronize_safe_stops_before_semicolon() {
        let tokens = lexed("a 1 ; x");
        let mut errors = ErrorHandler::new();
        let mut parser = Parser::new(&tokens, &mut errors);

        parser.synchronize_safe();
        assert_eq!(parser.peek().code, codes::SEMICOLON);
    }

    #[test]
    fn test_synchronize_stops_at_end() {
        let tokens = lexed("a b c");
        let mut errors = ErrorHandler::new();
        let mut parser = Parser::new(&tokens, &mut errors);

        parser.synchronize();
        assert!(parser.is_at_end());
        parser.advance();
        assert!(parser.is_at_end());
    }

    #[test]
    fn test_cursor_without_sentinel() {
        let mut errors = ErrorHandler::new();
        let parser = Parser::new(&[], &mut errors);
        assert!(parser.is_at_end());
        assert!(parser.previous().is_none());
    }
}
