use crate::utils::config::assembly::{INSTRUCTION_INDENT, LABEL_SUFFIX, VAR_DIRECTIVE};
use crate::utils::errors::SignalResult;
use crate::utils::string_utils::write_line;

/// Line-oriented MASM output. Instructions are indented, labels and directives are not.
pub trait CodeEmitter {
    fn emit(&mut self, instruction: &str) -> SignalResult<()>;
    fn emit_directive(&mut self, directive: &str) -> SignalResult<()>;
    fn emit_blank(&mut self) -> SignalResult<()>;

    fn emit_label(&mut self, label: &str) -> SignalResult<()> {
        self.emit_directive(&format!("{}{}", label, LABEL_SUFFIX))
    }

    fn emit_var(&mut self, name: &str) -> SignalResult<()> {
        self.emit(&format!("{} {}", name, VAR_DIRECTIVE))
    }

    fn emit_mov(&mut self, dest: &str, src: &str) -> SignalResult<()> {
        self.emit(&format!("mov {}, {}", dest, src))
    }

    fn emit_cmp(&mut self, left: &str, right: &str) -> SignalResult<()> {
        self.emit(&format!("cmp {}, {}", left, right))
    }

    fn emit_xor(&mut self, dest: &str, src: &str) -> SignalResult<()> {
        self.emit(&format!("xor {}, {}", dest, src))
    }

    fn emit_jne(&mut self, label: &str) -> SignalResult<()> {
        self.emit(&format!("jne {}", label))
    }

    fn emit_jmp(&mut self, label: &str) -> SignalResult<()> {
        self.emit(&format!("jmp {}", label))
    }

    fn emit_ret(&mut self) -> SignalResult<()> {
        self.emit("ret")
    }
}

pub struct StringCodeEmitter<'a> {
    output: &'a mut String,
}

impl<'a> StringCodeEmitter<'a> {
    pub fn new(output: &'a mut String) -> Self {
        StringCodeEmitter { output }
    }

    /// Appends already formatted lines.
    pub fn append(&mut self, lines: &str) {
        self.output.push_str(lines);
    }
}

impl<'a> CodeEmitter for StringCodeEmitter<'a> {
    fn emit(&mut self, instruction: &str) -> SignalResult<()> {
        write_line(
            self.output,
            format_args!("{}{}", INSTRUCTION_INDENT, instruction),
        )
    }

    fn emit_directive(&mut self, directive: &str) -> SignalResult<()> {
        write_line(self.output, format_args!("{}", directive))
    }

    fn emit_blank(&mut self) -> SignalResult<()> {
        write_line(self.output, format_args!(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_and_label_layout() -> SignalResult<()> {
        let mut output = String::new();
        let mut emitter = StringCodeEmitter::new(&mut output);
        emitter.emit_label("?L1")?;
        emitter.emit_mov("eax", "x")?;
        emitter.emit_var("y")?;

        assert_eq!(output, "?L1:\n    mov eax, x\n    y dd ?\n");
        Ok(())
    }
}
