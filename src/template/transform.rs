//! Statement emission for classified template tokens
//!
//! Every statement is guarded by the result slot so that nothing is written
//! after the first failed write, while statement units still run.

use super::{CodeUnit, EscapeMode, TemplateToken};

/// Local holding the first write error of a generated function
pub const RESULT_VAR: &str = "__erb_result";

/// Emits body statements for a generated writer function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitter {
    /// Name of the writer parameter in the generated signature
    pub writer: String,
    /// Path of the module providing `html` and `url` adapters
    pub runtime: String,
}

impl Default for Emitter {
    fn default() -> Self {
        Self {
            writer: "writer".to_string(),
            runtime: "::erbgen::escape".to_string(),
        }
    }
}

impl Emitter {
    pub fn new(writer: impl Into<String>, runtime: impl Into<String>) -> Self {
        Self {
            writer: writer.into(),
            runtime: runtime.into(),
        }
    }

    /// Statements for every token, in order
    pub fn body(&self, tokens: &[TemplateToken]) -> Vec<String> {
        tokens.iter().map(|token| self.emit(token)).collect()
    }

    /// A single statement for one token
    pub fn emit(&self, token: &TemplateToken) -> String {
        match token {
            TemplateToken::Text(text) => self.guarded(format!(
                "::std::io::Write::write_all(&mut *{}, {:?}.as_bytes())",
                self.writer, text
            )),
            TemplateToken::Code(CodeUnit::Statement(code)) => format!("{};", code),
            TemplateToken::Code(CodeUnit::Output { mode, expr }) => {
                let value = match mode {
                    EscapeMode::Raw => format!("({})", expr),
                    EscapeMode::UrlEncode => format!("{}::url(&({}))", self.runtime, expr),
                    EscapeMode::HtmlEscapeExplicit | EscapeMode::HtmlEscapeDefault => {
                        format!("{}::html(&({}))", self.runtime, expr)
                    }
                };
                self.guarded(format!(
                    "::std::io::Write::write_fmt(&mut *{}, ::std::format_args!(\"{{}}\", {}))",
                    self.writer, value
                ))
            }
        }
    }

    fn guarded(&self, write: String) -> String {
        format!(
            "if {var}.is_ok() {{ {var} = {write}; }}",
            var = RESULT_VAR,
            write = write
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::compile;
    use pretty_assertions::assert_eq;

    fn output(mode: EscapeMode, expr: &str) -> TemplateToken {
        TemplateToken::Code(CodeUnit::Output {
            mode,
            expr: expr.to_string(),
        })
    }

    #[test]
    fn test_literal_is_quoted() {
        let stmt = Emitter::default().emit(&TemplateToken::Text("say \"hi\"\n\t\\".to_string()));
        assert_eq!(
            stmt,
            r#"if __erb_result.is_ok() { __erb_result = ::std::io::Write::write_all(&mut *writer, "say \"hi\"\n\t\\".as_bytes()); }"#
        );
    }

    #[test]
    fn test_output_modes() {
        let emitter = Emitter::default();
        assert_eq!(
            emitter.emit(&output(EscapeMode::Raw, "a.b")),
            r#"if __erb_result.is_ok() { __erb_result = ::std::io::Write::write_fmt(&mut *writer, ::std::format_args!("{}", (a.b))); }"#
        );
        assert_eq!(
            emitter.emit(&output(EscapeMode::UrlEncode, "q")),
            r#"if __erb_result.is_ok() { __erb_result = ::std::io::Write::write_fmt(&mut *writer, ::std::format_args!("{}", ::erbgen::escape::url(&(q)))); }"#
        );
        let explicit = emitter.emit(&output(EscapeMode::HtmlEscapeExplicit, "t"));
        let default = emitter.emit(&output(EscapeMode::HtmlEscapeDefault, "t"));
        assert_eq!(explicit, default);
        assert!(default.contains("::erbgen::escape::html(&(t))"));
    }

    #[test]
    fn test_statement_is_verbatim() {
        let stmt = Emitter::default().emit(&TemplateToken::Code(CodeUnit::Statement(
            "for x in xs {".to_string(),
        )));
        assert_eq!(stmt, "for x in xs {;");
    }

    #[test]
    fn test_custom_writer_and_runtime() {
        let emitter = Emitter::new("out", "crate::esc");
        let stmt = emitter.emit(&output(EscapeMode::HtmlEscapeDefault, "x"));
        assert!(stmt.contains("&mut *out"));
        assert!(stmt.contains("crate::esc::html(&(x))"));
    }

    #[test]
    fn test_compile_order() {
        let body = compile("Hi <%= =name %>!<% n += 1 %>", &Emitter::default()).unwrap();
        assert_eq!(body.len(), 4);
        assert!(body[0].contains("\"Hi \""));
        assert!(body[1].contains("(name)"));
        assert!(body[2].contains("\"!\""));
        assert_eq!(body[3], "n += 1;");
    }
}
