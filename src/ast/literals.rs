use crate::ast::Node;
use crate::frontend::token::Token;
use crate::semantic::visiters::AstVisitor;
use crate::utils::errors::SignalResult;

/// Identifier leaf. Keeps its originating token so later passes can point at the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub code: u32,
    pub token: Token,
}

impl Identifier {
    pub fn new(token: Token) -> Self {
        Self {
            code: token.code,
            token,
        }
    }
}

impl Node for Identifier {
    const TAG: &'static str = "<identifier>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        visitor.visit_identifier(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub code: u32,
    pub token: Token,
}

impl Constant {
    pub fn new(token: Token) -> Self {
        Self {
            code: token.code,
            token,
        }
    }
}

impl Node for Constant {
    const TAG: &'static str = "<unsigned-integer>";

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()> {
        visitor.visit_constant(self)
    }
}
