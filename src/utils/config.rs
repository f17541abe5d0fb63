// Source file constants
pub mod source {
    pub const SOURCE_EXTENSION: &str = "blame";
    pub const TARGET_EXTENSION: &str = "c";
}

// Parser and scope table constants
pub mod parser {
    // Name of the single implicit scope every parser starts in
    pub const GLOBAL_SCOPE: &str = "global";
}

// C emission constants
pub mod emitter {
    use lazy_static::lazy_static;
    use regex::Regex;
    use std::collections::HashSet;

    pub const DEFAULT_INDENT: usize = 4;
    pub const VARIABLE_TYPE: &str = "long";
    pub const HEADER: &str = "#include <stdio.h>\n#include <stdlib.h>\n#include <string.h>\n\nint main() {\n";
    pub const RETURN_STATEMENT: &str = "return 0;";
    pub const FOOTER: &str = "}\n";
    pub const MANGLE_PREFIX: &str = "_";

    lazy_static! {
        pub static ref RESERVED_KEYWORDS: HashSet<&'static str> = [
            "auto", "break", "case", "char", "const", "continue", "default", "do",
            "double", "else", "enum", "extern", "float", "for", "goto", "if",
            "inline", "int", "long", "register", "restrict", "return", "short",
            "signed", "sizeof", "static", "struct", "switch", "typedef", "union",
            "unsigned", "void", "volatile", "while", "_Bool", "_Complex", "_Imaginary",
            // C11
            "_Alignas", "_Alignof", "_Atomic", "_Generic", "_Noreturn", "_Static_assert",
            "_Thread_local",
            // Names visible through the headers every translation unit includes
            "main", "printf", "exit", "malloc", "free", "strlen", "NULL", "EOF", "BUFSIZ",
            "FILENAME_MAX", "FOPEN_MAX", "L_tmpnam", "TMP_MAX", "SEEK_SET", "SEEK_CUR",
            "SEEK_END", "EXIT_SUCCESS", "EXIT_FAILURE", "RAND_MAX", "MB_CUR_MAX", "stdin",
            "stdout", "stderr", "errno", "size_t", "FILE", "fpos_t", "div_t", "ldiv_t",
            "wchar_t",
        ]
        .iter()
        .copied()
        .collect();

        pub static ref C_IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
    }

    pub fn is_reserved(name: &str) -> bool {
        RESERVED_KEYWORDS.contains(name)
    }

    /// Prefixes `name` and, if that spelling is still reserved or already
    /// in `taken`, appends `_1`, `_2`, ... until it is free.
    pub fn mangle_identifier(name: &str, taken: &HashSet<String>) -> String {
        let base = format!("{}{}", MANGLE_PREFIX, name);
        let mut candidate = base.clone();
        let mut suffix = 1;
        while is_reserved(&candidate) || taken.contains(&candidate) {
            candidate = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        candidate
    }

    pub fn is_valid_identifier(name: &str) -> bool {
        C_IDENTIFIER.is_match(name)
    }
}
