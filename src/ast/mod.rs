//! Syntax tree consumed by the rules
//!
//! A deliberately small, tagged-variant model of a Go file. It keeps what
//! rules look at (top-level declarations, call shapes, comment tokens) and
//! collapses everything else into `Other` variants that rules skip.

mod qualified;

pub use qualified::is_pkg_dot_name;

use crate::models::Position;

/// An identifier occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub pos: Position,
}

impl Ident {
    pub fn new(name: impl Into<String>, pos: Position) -> Self {
        Self {
            name: name.into(),
            pos,
        }
    }

    /// Go exports an identifier when its first character is an uppercase letter
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }
}

/// Expression nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    /// `operand.field`
    Selector { operand: Box<Expr>, field: Ident },
    /// `function(args...)`
    Call {
        function: Box<Expr>,
        args: Vec<Expr>,
        pos: Position,
    },
    /// Literal token kept verbatim (`"x"`, `42`, `'c'`)
    BasicLit { value: String, pos: Position },
    /// Anything the rules have no use for
    Other { kind: String, pos: Position },
}

impl Expr {
    pub fn pos(&self) -> &Position {
        match self {
            Expr::Ident(id) => &id.pos,
            Expr::Selector { operand, .. } => operand.pos(),
            Expr::Call { pos, .. } | Expr::BasicLit { pos, .. } | Expr::Other { pos, .. } => pos,
        }
    }
}

/// Keyword introducing a general declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclToken {
    Import,
    Const,
    Type,
    Var,
}

/// `name1, name2 T = value1, value2`
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
    pub type_name: Option<String>,
    pub values: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
    Value(ValueSpec),
    Type { name: Ident },
    Import { name: Option<String>, path: String, pos: Position },
}

/// `var (...)`, `const (...)`, `type ...`, `import ...`
#[derive(Debug, Clone, PartialEq)]
pub struct GenDecl {
    pub token: DeclToken,
    pub pos: Position,
    pub specs: Vec<Spec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: Ident,
    /// Receiver type text for methods
    pub receiver: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Gen(GenDecl),
    Func(FuncDecl),
}

/// One raw comment token, delimiters included (`// ...` or `/* ... */`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub pos: Position,
    /// Position just past the last byte of the token
    pub end: Position,
}

/// Adjacent comments with no blank line between them
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

/// A parsed Go source file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct File {
    pub package: Option<Ident>,
    pub decls: Vec<Decl>,
    pub comments: Vec<CommentGroup>,
}

/// What every rule receives: one file's name, source text and tree.
///
/// Built once per analyzed file and only ever read by rules.
#[derive(Debug, Clone)]
pub struct FileModel {
    name: String,
    content: String,
    ast: File,
}

impl FileModel {
    pub fn new(name: impl Into<String>, content: impl Into<String>, ast: File) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            ast,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn ast(&self) -> &File {
        &self.ast
    }

    pub fn comments(&self) -> &[CommentGroup] {
        &self.ast.comments
    }

    /// General declarations introduced by `token`, in source order
    pub fn gen_decls(&self, token: DeclToken) -> impl Iterator<Item = &GenDecl> {
        self.ast.decls.iter().filter_map(move |decl| match decl {
            Decl::Gen(gen) if gen.token == token => Some(gen),
            Decl::Gen(_) | Decl::Func(_) => None,
        })
    }
}
