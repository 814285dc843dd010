pub mod node_counter;
pub mod printer;
pub mod symboltable;
pub mod visiters;

pub use node_counter::NodeCounter;
pub use printer::{print_ast, PrintVisitor};
pub use symboltable::{InternTable, SymbolTables};
pub use visiters::AstVisitor;
