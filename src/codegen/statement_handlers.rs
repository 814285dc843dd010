use crate::ast::{AssignStatement, ConditionStatement, IncompleteConditionStatement, Node};
use crate::codegen::code_emitter::CodeEmitter;
use crate::codegen::{Generator, Register};
use crate::utils::errors::SignalResult;

/// `mov eax, <expr>` then `mov <var>, eax`. Without an expression nothing is stored.
pub fn handle_assign(gen: &mut Generator, stmt: &AssignStatement) -> SignalResult<()> {
    let (Some(variable), Some(expression)) = (stmt.variable.node(), stmt.expression.node())
    else {
        return Ok(());
    };

    gen.register = Register::A;
    expression.accept(gen)?;
    let target = gen.declared_name(variable)?;
    gen.code_emitter().emit_mov(&target, Register::A.name())
}

/// Compare, skip the then-branch when not equal, then jump past the else-branch.
/// The two labels are left for the enclosing condition statement to place.
pub fn handle_incomplete_condition(
    gen: &mut Generator,
    stmt: &IncompleteConditionStatement,
) -> SignalResult<()> {
    let else_label = gen.create_label();
    let end_label = gen.create_label();

    if let Some(condition) = stmt.condition.node() {
        condition.accept(gen)?;
    }
    gen.code_emitter().emit_jne(&else_label)?;
    if let Some(statements) = stmt.statements.node() {
        statements.accept(gen)?;
    }
    gen.code_emitter().emit_jmp(&end_label)?;

    gen.pending_labels.push((else_label, end_label));
    Ok(())
}

pub fn handle_condition(gen: &mut Generator, stmt: &ConditionStatement) -> SignalResult<()> {
    let Some(incomplete) = stmt.incomplete.node() else {
        return Ok(());
    };
    incomplete.accept(gen)?;

    let Some((else_label, end_label)) = gen.pending_labels.pop() else {
        return Ok(());
    };
    gen.code_emitter().emit_label(&else_label)?;
    if let Some(alternative) = stmt.alternative.node() {
        alternative.accept(gen)?;
    }
    gen.code_emitter().emit_label(&end_label)
}
