/*
*                    signalc -- Signal compiler.
*
* signal-program          = [ program ] ;
* program                 = "PROGRAM" procedure-identifier ";" block "." ;
* block                   = variable-declarations "BEGIN" statements-list "END" ;
* variable-declarations   = "VAR" declarations-list | <empty> ;
* declarations-list       = declaration declarations-list | <empty> ;
* declaration             = variable-identifier ":" attribute ";" ;
* attribute               = "INTEGER" | "FLOAT" ;
* statements-list         = statement statements-list | <empty> ;
* statement               = if-statement | assign-statement ;
* if-statement            = condition-statement "ENDIF" ";" ;
* condition-statement     = incomplete-condition-statement alternative-part ;
* incomplete-condition-statement = "IF" conditional-expression "THEN" statements-list ;
* alternative-part        = "ELSE" statements-list | <empty> ;
* conditional-expression  = expression "=" expression ;
* assign-statement        = variable-identifier ":=" expression ";" ;
* expression              = variable-identifier | unsigned-integer ;
*/

use crate::semantic::visiters::AstVisitor;
use crate::utils::errors::SignalResult;

/// Code of a keyword or delimiter the production consumed; `None` when it was missing.
pub type Terminal = Option<u32>;

/// A child slot. `Empty` is the grammar's epsilon, `Missing` is a hole left by a
/// syntax error; the printer renders the two differently.
#[derive(Debug, Clone, PartialEq)]
pub enum Child<T> {
    Present(Box<T>),
    Empty,
    Missing,
}

impl<T> Child<T> {
    pub fn present(node: T) -> Self {
        Child::Present(Box::new(node))
    }

    pub fn node(&self) -> Option<&T> {
        match self {
            Child::Present(node) => Some(node),
            Child::Empty | Child::Missing => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Child::Present(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Child::Empty)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Child::Missing)
    }
}

pub trait Node {
    /// Tag the printer uses for this production, e.g. `<block>`.
    const TAG: &'static str;

    fn accept(&self, visitor: &mut dyn AstVisitor) -> SignalResult<()>;
}
