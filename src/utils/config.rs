// Token code ranges. A token's category is recovered from the range its code falls in.
pub mod codes {
    pub const NONE: u32 = 0;
    pub const EOF: u32 = 1;
    pub const EMPTY: u32 = 2;

    // Single character delimiters carry their own ordinal
    pub const DOT: u32 = b'.' as u32;
    pub const COLON: u32 = b':' as u32;
    pub const SEMICOLON: u32 = b';' as u32;
    pub const EQUAL: u32 = b'=' as u32;

    pub const DELIMITER_BASE: u32 = 301;
    pub const ASSIGN: u32 = DELIMITER_BASE + 1;

    pub const KEYWORD_BASE: u32 = 401;
    pub const PROGRAM: u32 = KEYWORD_BASE + 1;
    pub const VAR: u32 = KEYWORD_BASE + 2;
    pub const BEGIN: u32 = KEYWORD_BASE + 3;
    pub const END: u32 = KEYWORD_BASE + 4;
    pub const INTEGER: u32 = KEYWORD_BASE + 5;
    pub const FLOAT: u32 = KEYWORD_BASE + 6;
    pub const IF: u32 = KEYWORD_BASE + 7;
    pub const THEN: u32 = KEYWORD_BASE + 8;
    pub const ELSE: u32 = KEYWORD_BASE + 9;
    pub const ENDIF: u32 = KEYWORD_BASE + 10;

    pub const CONSTANT_BASE: u32 = 501;
    pub const IDENTIFIER_BASE: u32 = 1001;

    /// Keyword table seed. `:=` lives here too so the lexer can look it up by lexeme.
    pub const KEYWORDS: &[(&str, u32)] = &[
        ("PROGRAM", PROGRAM),
        ("VAR", VAR),
        ("BEGIN", BEGIN),
        ("END", END),
        ("INTEGER", INTEGER),
        ("FLOAT", FLOAT),
        ("IF", IF),
        ("THEN", THEN),
        ("ELSE", ELSE),
        ("ENDIF", ENDIF),
        (":=", ASSIGN),
    ];
}

// Lexer constants
pub mod lexer {
    pub const TAB_WIDTH: usize = 4;
    pub const FIRST_LINE: usize = 1;
}

// Assembly generation constants
pub mod assembly {
    pub const INSTRUCTION_INDENT: &str = "    ";
    pub const LABEL_SUFFIX: &str = ":";

    pub const REGISTER_A: &str = "eax";
    pub const REGISTER_B: &str = "ebx";

    // casemap:none keeps `x` and `X` apart, as they are in Signal
    pub const PROLOGUE: &[&str] = &[
        ".386",
        ".model flat, C",
        "option casemap:none",
        ".stack 4096",
    ];
    pub const DATA_SECTION: &str = ".data";
    pub const CODE_SECTION: &str = ".code";
    pub const ENTRY_PROC: &str = "main";
    pub const VAR_DIRECTIVE: &str = "dd ?";

    // '$' and '?' never appear in a Signal identifier; every symbol the generator
    // defines starts with one of them.
    pub const VARIABLE_PREFIX: &str = "$";
    pub const BODY_LABEL_PREFIX: &str = "?";
    pub const BODY_LABEL_SUFFIX: &str = "_body";
    pub const LABEL_PREFIX: &str = "?L";

    pub const DEFAULT_EXTENSION: &str = "asm";

    /// Data slot name of a Signal variable.
    pub fn variable_symbol(name: &str) -> String {
        format!("{}{}", VARIABLE_PREFIX, name)
    }

    /// Label the entry procedure jumps to, derived from the program name.
    pub fn body_label(procedure: &str) -> String {
        format!("{}{}{}", BODY_LABEL_PREFIX, procedure, BODY_LABEL_SUFFIX)
    }
}

// Driver and reporting constants
pub mod driver {
    pub const SOURCE_EXTENSION: &str = "sig";
    pub const INFO_FILE: &str = "comp_info.txt";
    pub const DEFAULT_ASSEMBLER: &str = "ml";
    pub const DEFAULT_LINKER: &str = "link";
}
