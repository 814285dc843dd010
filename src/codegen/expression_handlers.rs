use crate::ast::{ConditionalExpression, Constant, Node, VariableIdentifier};
use crate::codegen::code_emitter::CodeEmitter;
use crate::codegen::{Generator, Register};
use crate::utils::errors::SignalResult;
use crate::utils::string_utils::leading_digits;

/// Left operand into A, right operand into B, then `cmp`.
pub fn handle_comparison(gen: &mut Generator, expr: &ConditionalExpression) -> SignalResult<()> {
    if let Some(left) = expr.left.node() {
        gen.register = Register::A;
        left.accept(gen)?;
    }
    if let Some(right) = expr.right.node() {
        gen.register = Register::B;
        right.accept(gen)?;
    }
    gen.register = Register::A;
    gen.code_emitter()
        .emit_cmp(Register::A.name(), Register::B.name())
}

pub fn handle_variable_load(gen: &mut Generator, variable: &VariableIdentifier) -> SignalResult<()> {
    let name = gen.declared_name(variable)?;
    let register = gen.register.name();
    gen.code_emitter().emit_mov(register, &name)
}

pub fn handle_constant_load(gen: &mut Generator, constant: &Constant) -> SignalResult<()> {
    let digits = leading_digits(&constant.token.lexeme);
    let value = if digits.is_empty() { "0" } else { digits };
    let register = gen.register.name();
    gen.code_emitter().emit_mov(register, value)
}
